// notation-core/src/summary.rs
//! Per-rule aggregation of a scan, for summary reporting.

use serde::Serialize;
use std::collections::HashMap;

use crate::notation_match::NotationMatch;

/// A summary of all matches for one rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleSummary {
    pub rule_id: String,
    pub occurrences: usize,
    pub suggestion: String,
    /// Distinct matched substrings, in first-seen order.
    pub matched_texts: Vec<String>,
}

/// Groups the full (not overlap-filtered) match list by rule.
///
/// Groups come out in order of each rule's first match.
pub fn aggregate_by_rule(matches: &[NotationMatch]) -> Vec<RuleSummary> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut summary: Vec<RuleSummary> = Vec::new();

    for m in matches {
        let slot = *index.entry(m.rule_id.as_str()).or_insert_with(|| {
            summary.push(RuleSummary {
                rule_id: m.rule_id.clone(),
                occurrences: 0,
                suggestion: m.suggestion.clone(),
                matched_texts: Vec::new(),
            });
            summary.len() - 1
        });
        let item = &mut summary[slot];
        item.occurrences += 1;
        if !item.matched_texts.iter().any(|t| t == &m.matched) {
            item.matched_texts.push(m.matched.clone());
        }
    }

    summary
}
