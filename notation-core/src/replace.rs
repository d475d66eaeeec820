// notation-core/src/replace.rs
//! The three replacement operations.
//!
//! All of them are pure: they take the current buffer and return a new one.
//! Any scan taken before the call is invalid afterwards.

use log::{debug, warn};

use crate::errors::NotationError;
use crate::notation_match::{log_replacement_debug, CharOffsets, NotationMatch};
use crate::patterns::compiler::{CompiledDictionary, CompiledPattern, CompiledRule};

/// Replaces a single occurrence with its suggestion.
///
/// `m` must come from a scan of exactly this `text`. The matched substring is
/// checked against the buffer so a stale match fails instead of corrupting it.
pub fn replace_occurrence(text: &str, m: &NotationMatch) -> Result<String, NotationError> {
    let offsets = CharOffsets::new(text);
    let out_of_range = || NotationError::OffsetOutOfRange {
        start: m.start,
        end: m.end,
        len: offsets.char_len(),
    };

    if m.start > m.end {
        return Err(out_of_range());
    }
    let start = offsets.byte_offset(m.start).ok_or_else(out_of_range)?;
    let end = offsets.byte_offset(m.end).ok_or_else(out_of_range)?;

    let found = &text[start..end];
    if found != m.matched {
        return Err(NotationError::StaleMatch {
            rule_id: m.rule_id.clone(),
            start: m.start,
            end: m.end,
            expected: m.matched.clone(),
            found: found.to_string(),
        });
    }

    log_replacement_debug(module_path!(), &m.rule_id, found, &m.suggestion);
    let mut out = String::with_capacity(text.len() - found.len() + m.suggestion.len());
    out.push_str(&text[..start]);
    out.push_str(&m.suggestion);
    out.push_str(&text[end..]);
    Ok(out)
}

/// Replaces every occurrence of every pattern of one rule.
///
/// Patterns are applied in declared order, each against the output of the
/// previous one.
pub fn replace_by_rule(
    text: &str,
    dictionary: &CompiledDictionary,
    rule_id: &str,
) -> Result<String, NotationError> {
    let rule = dictionary
        .get(rule_id)
        .ok_or_else(|| NotationError::UnknownRule(rule_id.to_string()))?;
    Ok(apply_rule(text.to_string(), rule))
}

/// Applies every rule in dictionary order, each to the previous rule's output.
///
/// A later rule may rewrite text produced by an earlier one.
pub fn replace_all(text: &str, dictionary: &CompiledDictionary) -> String {
    let out = dictionary
        .rules
        .iter()
        .fold(text.to_string(), |current, rule| apply_rule(current, rule));
    debug!(
        "replace_all applied {} rules; length {} -> {} chars.",
        dictionary.rules.len(),
        text.chars().count(),
        out.chars().count()
    );
    out
}

fn apply_rule(text: String, rule: &CompiledRule) -> String {
    rule.patterns.iter().fold(text, |current, pattern| {
        match substitute(&current, pattern, &rule.suggestion) {
            Ok(Some(replaced)) => {
                log_replacement_debug(module_path!(), &rule.id, &pattern.source, &rule.suggestion);
                replaced
            }
            Ok(None) => current,
            Err(e) => {
                warn!(
                    "Pattern '{}' of rule '{}' failed during replacement, leaving text unchanged: {}",
                    pattern.source, rule.id, e
                );
                current
            }
        }
    })
}

/// Global, non-overlapping substitution with a literal replacement.
///
/// Returns `Ok(None)` when nothing matched. The replacement is inserted as-is;
/// `$` sequences are not expanded.
fn substitute(
    text: &str,
    pattern: &CompiledPattern,
    replacement: &str,
) -> Result<Option<String>, fancy_regex::Error> {
    let mut out = String::with_capacity(text.len());
    let mut last = 0usize;
    let mut replaced_any = false;

    for found in pattern.regex.find_iter(text) {
        let found = found?;
        out.push_str(&text[last..found.start()]);
        out.push_str(replacement);
        last = found.end();
        replaced_any = true;
    }

    if !replaced_any {
        return Ok(None);
    }
    out.push_str(&text[last..]);
    Ok(Some(out))
}
