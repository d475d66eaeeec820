// notation-core/src/headless.rs
//! Convenience wrappers for using the engine in headless mode (non-UI).
//! One-shot helpers that compile a dictionary, run a single operation and
//! return plain values.

use anyhow::Result;

use crate::config::RuleDictionary;
use crate::engine::{CorrectionEngine, Scan};
use crate::engines::rule_engine::RuleEngine;

/// Scans `content` once and returns the full snapshot.
pub fn headless_scan_string(config: RuleDictionary, content: &str) -> Scan {
    RuleEngine::new(config).scan(content)
}

/// Applies every rule to `content`, or only `rule_ids` (in the given order)
/// when that list is non-empty.
pub fn headless_fix_string(config: RuleDictionary, content: &str, rule_ids: &[String]) -> Result<String> {
    Ok(RuleEngine::new(config).replace_rules(content, rule_ids)?)
}
