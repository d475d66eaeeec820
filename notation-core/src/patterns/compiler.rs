//! compiler.rs - Turns a `RuleDictionary` into executable matchers.
//!
//! Compilation never aborts on a single bad pattern. Each failure is recorded as
//! a [`PatternFailure`] naming the rule and the pattern, and the rule simply
//! carries one matcher fewer.
//!
//! License: MIT OR APACHE 2.0

use fancy_regex::{Regex, RegexBuilder};
use log::{debug, warn};
use serde::Serialize;

use crate::config::{RuleDictionary, MAX_PATTERN_LENGTH};
use crate::errors::NotationError;

/// Upper bound on backtracking steps per match attempt.
pub const BACKTRACK_LIMIT: usize = 1_000_000;

/// A wrong pattern ready for scanning.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    /// The pattern as written in the dictionary.
    pub source: String,
    /// The compiled matcher, built from the escaped source.
    pub regex: Regex,
}

/// A single compiled rule. Keeps dictionary order and the active suggestion.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    pub id: String,
    /// First correct candidate. Empty only for rules without wrong patterns.
    pub suggestion: String,
    /// Successfully compiled patterns, in declared order.
    pub patterns: Vec<CompiledPattern>,
}

/// A per-pattern problem, found either at compile time or while scanning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternFailure {
    pub rule_id: String,
    pub pattern: String,
    pub message: String,
}

impl PatternFailure {
    pub fn from_error(rule_id: &str, pattern: &str, error: &NotationError) -> Self {
        Self {
            rule_id: rule_id.to_string(),
            pattern: pattern.to_string(),
            message: error.to_string(),
        }
    }
}

/// Every rule of a dictionary, compiled, in dictionary order.
#[derive(Debug, Clone, Default)]
pub struct CompiledDictionary {
    pub rules: Vec<CompiledRule>,
    /// Patterns that could not be compiled.
    pub errors: Vec<PatternFailure>,
}

impl CompiledDictionary {
    pub fn get(&self, rule_id: &str) -> Option<&CompiledRule> {
        self.rules.iter().find(|r| r.id == rule_id)
    }

    pub fn position(&self, rule_id: &str) -> Option<usize> {
        self.rules.iter().position(|r| r.id == rule_id)
    }

    pub fn pattern_count(&self) -> usize {
        self.rules.iter().map(|r| r.patterns.len()).sum()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Group {
    /// A `(?...)` construct, kept verbatim.
    Construct,
    /// A parenthesis that was escaped to match literally.
    Literal,
}

/// Escapes `.`, `(` and `)` so they match literally.
///
/// A `(` directly followed by `?` opens a group construct (lookaround,
/// non-capturing group, inline flags) and is kept together with its balancing
/// `)`. Existing backslash escapes pass through untouched, and nothing is
/// rewritten inside a character class except the three escaped characters.
pub fn escape_pattern(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 8);
    let mut groups: Vec<Group> = Vec::new();
    let mut in_class = false;
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                out.push('\\');
                if let Some(next) = chars.next() {
                    out.push(next);
                }
            }
            '.' => out.push_str("\\."),
            '[' if !in_class => {
                in_class = true;
                out.push('[');
            }
            ']' if in_class => {
                in_class = false;
                out.push(']');
            }
            '(' if in_class => out.push_str("\\("),
            ')' if in_class => out.push_str("\\)"),
            '(' if chars.peek() == Some(&'?') => {
                groups.push(Group::Construct);
                out.push('(');
            }
            '(' => {
                groups.push(Group::Literal);
                out.push_str("\\(");
            }
            ')' => match groups.pop() {
                Some(Group::Construct) => out.push(')'),
                Some(Group::Literal) | None => out.push_str("\\)"),
            },
            other => out.push(other),
        }
    }
    out
}

/// Compiles one wrong pattern of a rule.
pub fn compile_pattern(rule_id: &str, pattern: &str) -> Result<CompiledPattern, NotationError> {
    let length = pattern.chars().count();
    if length > MAX_PATTERN_LENGTH {
        return Err(NotationError::PatternLengthExceeded(
            rule_id.to_string(),
            length,
            MAX_PATTERN_LENGTH,
        ));
    }

    let escaped = escape_pattern(pattern);
    let regex = RegexBuilder::new(&escaped)
        .backtrack_limit(BACKTRACK_LIMIT)
        .delegate_size_limit(10 * (1 << 20)) // 10 MB limit for compiled regex
        .build()
        .map_err(|source| NotationError::PatternCompilation {
            rule_id: rule_id.to_string(),
            pattern: pattern.to_string(),
            source,
        })?;

    Ok(CompiledPattern {
        source: pattern.to_string(),
        regex,
    })
}

/// Compiles every rule of the dictionary, preserving rule and pattern order.
pub fn compile_dictionary(dictionary: &RuleDictionary) -> CompiledDictionary {
    debug!("Starting compilation of {} rules.", dictionary.rules.len());

    let mut compiled = CompiledDictionary::default();

    for rule in &dictionary.rules {
        let suggestion = match rule.suggestion() {
            Some(s) => s.to_string(),
            None if rule.is_reference_only() => String::new(),
            None => {
                let error = NotationError::MissingSuggestion(rule.id.clone());
                warn!("{}", error);
                for pattern in &rule.wrong {
                    compiled.errors.push(PatternFailure::from_error(&rule.id, pattern, &error));
                }
                compiled.rules.push(CompiledRule {
                    id: rule.id.clone(),
                    suggestion: String::new(),
                    patterns: Vec::new(),
                });
                continue;
            }
        };

        let mut patterns = Vec::with_capacity(rule.wrong.len());
        for pattern in &rule.wrong {
            match compile_pattern(&rule.id, pattern) {
                Ok(p) => patterns.push(p),
                Err(e) => {
                    warn!("{}", e);
                    compiled.errors.push(PatternFailure::from_error(&rule.id, pattern, &e));
                }
            }
        }

        log::debug!(
            target: "notation_core::patterns::compiler",
            "Rule '{}' compiled with {} of {} patterns.",
            &rule.id,
            patterns.len(),
            rule.wrong.len()
        );

        compiled.rules.push(CompiledRule {
            id: rule.id.clone(),
            suggestion,
            patterns,
        });
    }

    debug!(
        "Finished compiling rules. Total patterns: {}, failures: {}.",
        compiled.pattern_count(),
        compiled.errors.len()
    );
    compiled
}
