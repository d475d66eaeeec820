//! errors.rs - Custom error types for the notation-core library.
//!
//! This module defines a structured error enum for the library, providing
//! specific, actionable error types that can be handled programmatically.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// This enum represents all possible error types in the `notation-core` library.
///
/// Marked `#[non_exhaustive]` so new variants can be added without breaking
/// downstream matches.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum NotationError {
    #[error("Failed to compile pattern '{pattern}' of rule '{rule_id}': {source}")]
    PatternCompilation {
        rule_id: String,
        pattern: String,
        #[source]
        source: fancy_regex::Error,
    },

    #[error("Rule '{0}': pattern length ({1}) exceeds maximum allowed ({2})")]
    PatternLengthExceeded(String, usize, usize),

    #[error("Rule '{0}' declares wrong patterns but no correct candidate")]
    MissingSuggestion(String),

    #[error("Rule '{0}' does not exist in the dictionary")]
    UnknownRule(String),

    #[error("Match offsets {start}..{end} are out of range for a buffer of {len} characters")]
    OffsetOutOfRange { start: usize, end: usize, len: usize },

    #[error("Stale match for rule '{rule_id}' at {start}..{end}: expected '{expected}', buffer holds '{found}'")]
    StaleMatch {
        rule_id: String,
        start: usize,
        end: usize,
        expected: String,
        found: String,
    },
}
