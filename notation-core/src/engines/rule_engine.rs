//! A `CorrectionEngine` implementation backed by the compiled rule dictionary.
//! License: MIT OR APACHE 2.0

use log::{debug, info};

use crate::config::RuleDictionary;
use crate::engine::{CorrectionEngine, Scan};
use crate::errors::NotationError;
use crate::highlight::resolve_overlaps;
use crate::matching::find_matches_reporting;
use crate::notation_match::NotationMatch;
use crate::patterns::compiler::{compile_dictionary, CompiledDictionary, PatternFailure};
use crate::replace;
use crate::summary::aggregate_by_rule;

#[derive(Debug)]
pub struct RuleEngine {
    compiled: CompiledDictionary,
    config: RuleDictionary,
}

impl RuleEngine {
    /// Compiles the dictionary. Bad patterns do not fail construction; they are
    /// available from [`RuleEngine::compile_errors`] and in every [`Scan`].
    pub fn new(config: RuleDictionary) -> Self {
        let compiled = compile_dictionary(&config);
        info!(
            "RuleEngine ready: {} rules, {} patterns, {} pattern errors.",
            compiled.rules.len(),
            compiled.pattern_count(),
            compiled.errors.len()
        );
        Self { compiled, config }
    }

    pub fn compile_errors(&self) -> &[PatternFailure] {
        &self.compiled.errors
    }
}

impl CorrectionEngine for RuleEngine {
    fn scan(&self, text: &str) -> Scan {
        let (matches, scan_failures) = find_matches_reporting(text, &self.compiled);
        let spans = resolve_overlaps(text, &matches);

        let mut summary = aggregate_by_rule(&matches);
        summary.sort_by_key(|item| self.compiled.position(&item.rule_id).unwrap_or(usize::MAX));

        let mut failures = self.compiled.errors.clone();
        failures.extend(scan_failures);

        debug!(
            "Scan: {} matches, {} highlighted, {} rules hit.",
            matches.len(),
            spans.iter().filter(|s| s.as_match().is_some()).count(),
            summary.len()
        );

        Scan {
            matches,
            spans,
            summary,
            failures,
        }
    }

    fn replace_occurrence(&self, text: &str, m: &NotationMatch) -> Result<String, NotationError> {
        replace::replace_occurrence(text, m)
    }

    fn replace_by_rule(&self, text: &str, rule_id: &str) -> Result<String, NotationError> {
        replace::replace_by_rule(text, &self.compiled, rule_id)
    }

    fn replace_all(&self, text: &str) -> String {
        replace::replace_all(text, &self.compiled)
    }

    fn compiled_rules(&self) -> &CompiledDictionary {
        &self.compiled
    }

    fn get_rules(&self) -> &RuleDictionary {
        &self.config
    }
}
