// notation-core/src/matching.rs
//! Locates every occurrence of every wrong pattern in a buffer.
//!
//! The result is the full, possibly overlapping match set. Overlap resolution
//! happens later in [`crate::highlight`]; aggregation in [`crate::summary`]
//! deliberately sees the unfiltered set.

use log::{debug, warn};

use crate::notation_match::{log_notation_match_debug, CharOffsets, NotationMatch};
use crate::patterns::compiler::{CompiledDictionary, PatternFailure};

/// Scans `text` and returns all matches sorted by start offset.
///
/// Matches with equal starts keep discovery order: dictionary order, then
/// pattern order within the rule, then left-to-right.
pub fn find_matches(text: &str, dictionary: &CompiledDictionary) -> Vec<NotationMatch> {
    find_matches_reporting(text, dictionary).0
}

/// Like [`find_matches`], also returning patterns that failed while scanning.
///
/// A pattern that errors mid-scan (for example by hitting the backtrack limit)
/// keeps the matches found before the error and contributes nothing after it.
pub fn find_matches_reporting(
    text: &str,
    dictionary: &CompiledDictionary,
) -> (Vec<NotationMatch>, Vec<PatternFailure>) {
    let offsets = CharOffsets::new(text);
    let mut matches = Vec::new();
    let mut failures = Vec::new();

    for rule in &dictionary.rules {
        for pattern in &rule.patterns {
            for found in pattern.regex.find_iter(text) {
                let found = match found {
                    Ok(m) => m,
                    Err(e) => {
                        warn!(
                            "Pattern '{}' of rule '{}' failed while scanning: {}",
                            pattern.source, rule.id, e
                        );
                        failures.push(PatternFailure {
                            rule_id: rule.id.clone(),
                            pattern: pattern.source.clone(),
                            message: e.to_string(),
                        });
                        break;
                    }
                };

                let m = NotationMatch {
                    start: offsets.char_index(found.start()),
                    end: offsets.char_index(found.end()),
                    rule_id: rule.id.clone(),
                    matched: found.as_str().to_string(),
                    suggestion: rule.suggestion.clone(),
                };
                log_notation_match_debug(module_path!(), &m);
                matches.push(m);
            }
        }
    }

    // `sort_by_key` is stable, which is what keeps discovery order on ties.
    matches.sort_by_key(|m| m.start);
    debug!("Scan finished with {} matches.", matches.len());
    (matches, failures)
}
