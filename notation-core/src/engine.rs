// notation-core/src/engine.rs
//! Defines the core `CorrectionEngine` trait and the `Scan` snapshot.
//!
//! The trait decouples front ends (CLI, interactive review, headless helpers)
//! from how a dictionary is compiled and applied. Every output is a pure
//! function of the engine's dictionary and the text passed in; nothing is
//! cached between calls.
//!
//! License: MIT OR APACHE 2.0

use serde::Serialize;

use crate::config::RuleDictionary;
use crate::errors::NotationError;
use crate::highlight::HighlightSpan;
use crate::notation_match::NotationMatch;
use crate::patterns::compiler::{CompiledDictionary, PatternFailure};
use crate::summary::RuleSummary;

/// Everything derived from one version of the buffer.
///
/// A `Scan` is only valid for the exact text it was produced from. After any
/// replacement, scan again before reading it or feeding a match back in.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Scan {
    /// All matches, possibly overlapping, sorted by start.
    pub matches: Vec<NotationMatch>,
    /// Non-overlapping partition of the buffer.
    pub spans: Vec<HighlightSpan>,
    /// Per-rule aggregates, in dictionary order.
    pub summary: Vec<RuleSummary>,
    /// Patterns that failed to compile or failed while scanning.
    pub failures: Vec<PatternFailure>,
}

impl Scan {
    pub fn is_clean(&self) -> bool {
        self.matches.is_empty()
    }

    /// Matches that survived overlap resolution, left to right.
    pub fn highlighted(&self) -> impl Iterator<Item = &NotationMatch> {
        self.spans.iter().filter_map(HighlightSpan::as_match)
    }

    /// First highlighted match starting at or after `cursor`.
    pub fn next_highlight_from(&self, cursor: usize) -> Option<&NotationMatch> {
        self.highlighted().find(|m| m.start >= cursor)
    }
}

/// A trait that defines the core functionality of a correction engine.
pub trait CorrectionEngine: Send + Sync {
    /// Finds matches, resolves highlights and aggregates per rule.
    fn scan(&self, text: &str) -> Scan;

    /// Replaces one occurrence taken from a scan of this exact `text`.
    fn replace_occurrence(&self, text: &str, m: &NotationMatch) -> Result<String, NotationError>;

    /// Replaces every occurrence of one rule's patterns.
    fn replace_by_rule(&self, text: &str, rule_id: &str) -> Result<String, NotationError>;

    /// Applies every rule, in dictionary order.
    fn replace_all(&self, text: &str) -> String;

    /// Applies `rule_ids` in the given order, or every rule when the list is empty.
    fn replace_rules(&self, text: &str, rule_ids: &[String]) -> Result<String, NotationError> {
        if rule_ids.is_empty() {
            return Ok(self.replace_all(text));
        }
        rule_ids
            .iter()
            .try_fold(text.to_string(), |current, rule_id| self.replace_by_rule(&current, rule_id))
    }

    /// Returns a reference to the compiled dictionary used by the engine.
    fn compiled_rules(&self) -> &CompiledDictionary;

    /// Returns a reference to the engine's source dictionary.
    fn get_rules(&self) -> &RuleDictionary;
}
