// notation-core/src/notation_match.rs
//! Core data structures for located notations, plus the character-offset
//! bookkeeping and debug-logging helpers shared by the scanning and replacing
//! modules.

use lazy_static::lazy_static;
use log::debug;
use serde::{Deserialize, Serialize};

lazy_static! {
    /// Whether matched document text may appear verbatim in debug logs.
    static ref MATCHED_TEXT_DEBUG_ALLOWED: bool = {
        std::env::var("NOTATION_LOG_MATCHED_TEXT")
            .map(|s| s.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    };
}

/// One located occurrence of a wrong pattern.
///
/// Offsets are half-open character (Unicode scalar) indices into the buffer the
/// match was scanned from. They mean nothing against any other buffer version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct NotationMatch {
    pub start: usize,
    pub end: usize,
    pub rule_id: String,
    /// The literal text that matched.
    pub matched: String,
    /// The owning rule's first correct candidate.
    pub suggestion: String,
}

/// Maps between byte offsets and character offsets of one string.
#[derive(Debug)]
pub(crate) struct CharOffsets {
    byte_starts: Vec<usize>,
    byte_len: usize,
}

impl CharOffsets {
    pub(crate) fn new(text: &str) -> Self {
        Self {
            byte_starts: text.char_indices().map(|(i, _)| i).collect(),
            byte_len: text.len(),
        }
    }

    pub(crate) fn char_len(&self) -> usize {
        self.byte_starts.len()
    }

    /// Character index of a byte offset that lies on a char boundary.
    pub(crate) fn char_index(&self, byte: usize) -> usize {
        self.byte_starts.partition_point(|&b| b < byte)
    }

    /// Byte offset of a character index; `None` past the end.
    pub(crate) fn byte_offset(&self, char_index: usize) -> Option<usize> {
        match char_index.cmp(&self.byte_starts.len()) {
            std::cmp::Ordering::Less => Some(self.byte_starts[char_index]),
            std::cmp::Ordering::Equal => Some(self.byte_len),
            std::cmp::Ordering::Greater => None,
        }
    }
}

/// Hides document text behind a length marker.
pub fn redact_matched_text(s: &str) -> String {
    format!("[{} chars]", s.chars().count())
}

fn get_loggable_content(content: &str) -> String {
    if *MATCHED_TEXT_DEBUG_ALLOWED {
        content.to_string()
    } else {
        redact_matched_text(content)
    }
}

pub fn log_notation_match_debug(module_path: &str, m: &NotationMatch) {
    debug!(
        "{} Found match: Rule='{}', Span={}..{}, Matched='{}', Suggested='{}'",
        module_path,
        m.rule_id,
        m.start,
        m.end,
        get_loggable_content(&m.matched),
        m.suggestion
    );
}

pub fn log_replacement_debug(module_path: &str, rule_id: &str, original: &str, replacement: &str) {
    debug!(
        "{} Replacement: Original='{}', Replaced='{}' for rule '{}'",
        module_path,
        get_loggable_content(original),
        replacement,
        rule_id
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redacts_by_char_count() {
        assert_eq!(redact_matched_text("五月祭"), "[3 chars]");
    }

    #[test]
    fn char_offsets_roundtrip_multibyte() {
        let text = "a五月b";
        let offsets = CharOffsets::new(text);
        assert_eq!(offsets.char_len(), 4);
        assert_eq!(offsets.byte_offset(1), Some(1));
        assert_eq!(offsets.byte_offset(2), Some(4));
        assert_eq!(offsets.byte_offset(4), Some(text.len()));
        assert_eq!(offsets.byte_offset(5), None);
        assert_eq!(offsets.char_index(4), 2);
        assert_eq!(offsets.char_index(text.len()), 4);
    }
}
