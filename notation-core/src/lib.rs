// notation-core/src/lib.rs
//! # Notation Core Library
//!
//! `notation-core` provides the platform-independent logic for checking Japanese
//! text against a style-guide dictionary. A dictionary maps discouraged
//! notations ("wrong" patterns) to preferred ones ("correct" candidates). The
//! library compiles those patterns, locates every occurrence in a buffer,
//! resolves overlapping occurrences for display, aggregates them per rule, and
//! applies replacements one occurrence, one rule, or the whole dictionary at a
//! time.
//!
//! The library is pure and stateless: every result is a function of the
//! dictionary and the text passed in. Callers own the text buffer and must
//! re-scan after each replacement.
//!
//! ## Modules
//!
//! * `config`: `NotationRule` and `RuleDictionary`, loading, validation, merging and filtering.
//! * `patterns`: the pattern compiler and its escaping policy.
//! * `notation_match`: the `NotationMatch` record and offset helpers.
//! * `matching`: finds the full, sorted match list.
//! * `highlight`: first-starting-wins overlap resolution into display spans.
//! * `summary`: per-rule aggregates.
//! * `replace`: occurrence, rule and dictionary-wide replacement.
//! * `engine`: the `CorrectionEngine` trait and the `Scan` snapshot.
//! * `engines`: concrete engines (`RuleEngine`).
//! * `headless`: one-shot convenience wrappers.
//!
//! ## Usage Example
//!
//! ```rust
//! use notation_core::{CorrectionEngine, NotationRule, RuleDictionary, RuleEngine};
//!
//! let dictionary = RuleDictionary::new(vec![
//!     NotationRule::new("1", &["5月祭"], &["第98回五月祭"]),
//! ]);
//! let engine = RuleEngine::new(dictionary);
//!
//! let text = "5月祭に行く";
//! let scan = engine.scan(text);
//! assert_eq!(scan.matches[0].start, 0);
//! assert_eq!(scan.matches[0].end, 3);
//!
//! let fixed = engine.replace_occurrence(text, &scan.matches[0]).unwrap();
//! assert_eq!(fixed, "第98回五月祭に行く");
//! ```
//!
//! ## Error Handling
//!
//! Loading uses `anyhow::Error`. Engine operations return [`NotationError`].
//! A malformed pattern never aborts a scan: it is reported as a
//! [`PatternFailure`] and contributes no matches.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod config;
pub mod engine;
pub mod engines;
pub mod errors;
pub mod headless;
pub mod highlight;
pub mod matching;
pub mod notation_match;
pub mod patterns;
pub mod replace;
pub mod summary;

/// Re-exports the dictionary types and functions.
pub use config::{
    dictionary_candidate_paths,
    load_user_dictionary,
    merge_rules,
    NotationRule,
    RuleDictionary,
    MAX_PATTERN_LENGTH,
};

/// Re-exports the custom error type.
pub use errors::NotationError;

/// Re-exports the engine trait, its snapshot type and the concrete engine.
pub use engine::{CorrectionEngine, Scan};
pub use engines::rule_engine::RuleEngine;

/// Re-exports the derived data types.
pub use highlight::{resolve_overlaps, HighlightSpan};
pub use matching::find_matches;
pub use notation_match::NotationMatch;
pub use summary::{aggregate_by_rule, RuleSummary};

/// Re-exports the replacement operations.
pub use replace::{replace_all, replace_by_rule, replace_occurrence};

/// Re-exports one-shot helpers.
pub use headless::{headless_fix_string, headless_scan_string};

pub use patterns::compiler::{
    compile_dictionary,
    compile_pattern,
    escape_pattern,
    CompiledDictionary,
    CompiledPattern,
    CompiledRule,
    PatternFailure,
};
