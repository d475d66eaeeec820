// notation-core/src/highlight.rs
//! Overlap resolution: turns the sorted match list into a gap-filled,
//! non-overlapping partition of the buffer for display.

use log::{debug, warn};
use serde::Serialize;

use crate::notation_match::{CharOffsets, NotationMatch};

/// One segment of the buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HighlightSpan {
    Plain { start: usize, end: usize, text: String },
    Matched(NotationMatch),
}

impl HighlightSpan {
    pub fn text(&self) -> &str {
        match self {
            HighlightSpan::Plain { text, .. } => text,
            HighlightSpan::Matched(m) => &m.matched,
        }
    }

    pub fn as_match(&self) -> Option<&NotationMatch> {
        match self {
            HighlightSpan::Matched(m) => Some(m),
            HighlightSpan::Plain { .. } => None,
        }
    }
}

/// Resolves overlaps with a first-starting-wins policy.
///
/// `matches` must be sorted by start offset and derived from `text`. A match
/// starting before the end of the last accepted match is dropped.
pub fn resolve_overlaps(text: &str, matches: &[NotationMatch]) -> Vec<HighlightSpan> {
    let offsets = CharOffsets::new(text);
    let mut spans = Vec::with_capacity(matches.len() * 2 + 1);
    let mut cursor = 0usize;
    let mut dropped = 0usize;

    for m in matches {
        if m.start < cursor {
            dropped += 1;
            continue;
        }
        let (Some(gap_start), Some(start), Some(_)) = (
            offsets.byte_offset(cursor),
            offsets.byte_offset(m.start),
            offsets.byte_offset(m.end),
        ) else {
            warn!(
                "Ignoring match {}..{} of rule '{}': outside a buffer of {} characters.",
                m.start,
                m.end,
                m.rule_id,
                offsets.char_len()
            );
            continue;
        };

        if m.start > cursor {
            spans.push(HighlightSpan::Plain {
                start: cursor,
                end: m.start,
                text: text[gap_start..start].to_string(),
            });
        }
        spans.push(HighlightSpan::Matched(m.clone()));
        cursor = m.end;
    }

    let len = offsets.char_len();
    if cursor < len {
        let tail = offsets.byte_offset(cursor).unwrap_or(text.len());
        spans.push(HighlightSpan::Plain {
            start: cursor,
            end: len,
            text: text[tail..].to_string(),
        });
    }

    debug!("Resolved {} spans, {} overlapping matches dropped.", spans.len(), dropped);
    spans
}
