//! Configuration management for `notation-core`.
//!
//! This module defines the rule dictionary: an ordered list of rules, each mapping
//! one or more discouraged ("wrong") notations to a preferred ("correct") one.
//! It handles YAML/JSON deserialization in both the keyed-mapping shape and the
//! wrapped `rules:` list shape, and provides utilities for loading, merging,
//! filtering and validating dictionaries.
//!
//! Dictionary order matters everywhere downstream: it is the scan priority for
//! overlapping matches and the application order for bulk replacement.
//!
//! License: MIT OR Apache-2.0

use anyhow::{anyhow, Context, Result};
use lazy_static::lazy_static;
use log::{debug, info, warn};
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};

/// Maximum allowed length, in characters, for a single wrong pattern.
pub const MAX_PATTERN_LENGTH: usize = 500;

/// File name looked up in the user configuration directories.
pub const USER_DICTIONARY_FILE: &str = "rules.yaml";

const DEFAULT_RULES_YAML: &str = include_str!("../config/default_rules.yaml");

lazy_static! {
    /// The embedded dictionary, parsed and validated once per process.
    static ref DEFAULT_DICTIONARY: std::result::Result<RuleDictionary, String> = parse_default_dictionary();
}

/// A single notation rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct NotationRule {
    /// Stable key, unique within the dictionary.
    pub id: String,
    /// Patterns to flag, in declared order. Empty for reference-only rules.
    pub wrong: Vec<String>,
    /// Preferred notations. Only the first is applied; the rest are alternates.
    pub correct: Vec<String>,
    /// Optional human-readable note shown by `notation rules`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl NotationRule {
    pub fn new(id: impl Into<String>, wrong: &[&str], correct: &[&str]) -> Self {
        Self {
            id: id.into(),
            wrong: wrong.iter().map(|s| s.to_string()).collect(),
            correct: correct.iter().map(|s| s.to_string()).collect(),
            description: None,
        }
    }

    /// The active suggestion: the first correct candidate.
    pub fn suggestion(&self) -> Option<&str> {
        self.correct.first().map(String::as_str)
    }

    /// Reference-only rules document a preferred notation but never match.
    pub fn is_reference_only(&self) -> bool {
        self.wrong.is_empty()
    }
}

/// The complete, ordered rule dictionary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RuleDictionary {
    pub rules: Vec<NotationRule>,
}

/// Body of a rule in the keyed shape, where the id is the mapping key.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RuleBody {
    wrong: Vec<String>,
    correct: Vec<String>,
    description: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DictionaryEntry {
    Wrapped(Vec<NotationRule>),
    Keyed(RuleBody),
}

/// Rule ids may be written as bare integers in YAML (`1:`), so accept both.
struct RuleId(String);

impl<'de> Deserialize<'de> for RuleId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct RuleIdVisitor;

        impl<'de> Visitor<'de> for RuleIdVisitor {
            type Value = RuleId;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a rule id (string or integer)")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<RuleId, E> {
                Ok(RuleId(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<RuleId, E> {
                Ok(RuleId(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<RuleId, E> {
                Ok(RuleId(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<RuleId, E> {
                Ok(RuleId(v.to_string()))
            }
        }

        deserializer.deserialize_any(RuleIdVisitor)
    }
}

struct DictionaryVisitor;

impl<'de> Visitor<'de> for DictionaryVisitor {
    type Value = RuleDictionary;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a mapping of rule ids to rules, or a `rules` list")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<RuleDictionary, A::Error> {
        let mut rules = Vec::new();
        // Document order of the keys is the dictionary order.
        while let Some(RuleId(key)) = map.next_key()? {
            match map.next_value::<DictionaryEntry>()? {
                DictionaryEntry::Wrapped(list) if key == "rules" => rules.extend(list),
                DictionaryEntry::Wrapped(_) => {
                    return Err(de::Error::custom(format!(
                        "rule '{}' must be a mapping with `wrong` and `correct` lists",
                        key
                    )));
                }
                DictionaryEntry::Keyed(body) => rules.push(NotationRule {
                    id: key,
                    wrong: body.wrong,
                    correct: body.correct,
                    description: body.description,
                }),
            }
        }
        Ok(RuleDictionary { rules })
    }
}

impl<'de> Deserialize<'de> for RuleDictionary {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(DictionaryVisitor)
    }
}

impl RuleDictionary {
    pub fn new(rules: Vec<NotationRule>) -> Self {
        Self { rules }
    }

    /// Loads a dictionary from a YAML file, or JSON when the extension is `.json`.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading rule dictionary from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read dictionary file {}", path.display()))?;

        let is_json = path
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));
        let parsed = if is_json {
            Self::from_json_str(&text)
        } else {
            Self::from_yaml_str(&text)
        };
        let dictionary =
            parsed.with_context(|| format!("Failed to parse dictionary file {}", path.display()))?;

        info!("Loaded {} rules from file {}.", dictionary.rules.len(), path.display());
        Ok(dictionary)
    }

    /// Parses and validates a YAML dictionary.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let dictionary: RuleDictionary = serde_yml::from_str(text).context("Invalid YAML dictionary")?;
        validate_rules(&dictionary.rules)?;
        Ok(dictionary)
    }

    /// Parses and validates a JSON dictionary.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let dictionary: RuleDictionary = serde_json::from_str(text).context("Invalid JSON dictionary")?;
        validate_rules(&dictionary.rules)?;
        Ok(dictionary)
    }

    /// Returns a copy of the embedded default dictionary.
    pub fn load_default_rules() -> Result<Self> {
        debug!("Loading default rules from embedded string...");
        match &*DEFAULT_DICTIONARY {
            Ok(dictionary) => {
                debug!("Loaded {} default rules.", dictionary.rules.len());
                Ok(dictionary.clone())
            }
            Err(e) => Err(anyhow!("Failed to parse default rules: {}", e)),
        }
    }

    pub fn get(&self, rule_id: &str) -> Option<&NotationRule> {
        self.rules.iter().find(|r| r.id == rule_id)
    }

    /// Position of a rule in dictionary order.
    pub fn position(&self, rule_id: &str) -> Option<usize> {
        self.rules.iter().position(|r| r.id == rule_id)
    }

    /// Rules that can actually produce matches.
    pub fn detecting_rules(&self) -> impl Iterator<Item = &NotationRule> {
        self.rules.iter().filter(|r| !r.is_reference_only())
    }

    /// Filters active rules based on enable/disable lists provided via CLI.
    ///
    /// A non-empty `enable_rules` keeps only the listed ids. Ids listed in
    /// `disable_rules` are always removed. Surviving rules keep their order.
    pub fn set_active_rules(&mut self, enable_rules: &[String], disable_rules: &[String]) {
        let enable_set: HashSet<&str> = enable_rules.iter().map(String::as_str).collect();
        let disable_set: HashSet<&str> = disable_rules.iter().map(String::as_str).collect();

        debug!("Initial rules count before filtering: {}", self.rules.len());

        let all_rule_ids: HashSet<&str> = self.rules.iter().map(|r| r.id.as_str()).collect();

        for rule_id in enable_set.difference(&all_rule_ids) {
            warn!("Rule '{}' in `enable` list does not exist.", rule_id);
        }

        for rule_id in disable_set.difference(&all_rule_ids) {
            warn!("Rule '{}' in `disable` list does not exist.", rule_id);
        }

        self.rules.retain(|rule| {
            let id = rule.id.as_str();
            !disable_set.contains(id) && (enable_set.is_empty() || enable_set.contains(id))
        });

        debug!("Final active rules count after filtering: {}", self.rules.len());
    }
}

/// Merges a user dictionary over the defaults.
///
/// A user rule whose id already exists replaces the default rule in place;
/// new ids are appended in the user's order.
pub fn merge_rules(default_config: RuleDictionary, user_config: Option<RuleDictionary>) -> RuleDictionary {
    debug!("merge_rules called. Initial default rules count: {}", default_config.rules.len());

    let mut final_rules = default_config.rules;

    if let Some(user_cfg) = user_config {
        debug!("User dictionary provided. Merging {} user rules.", user_cfg.rules.len());
        let mut index: HashMap<String, usize> = final_rules
            .iter()
            .enumerate()
            .map(|(i, rule)| (rule.id.clone(), i))
            .collect();

        for user_rule in user_cfg.rules {
            match index.get(&user_rule.id) {
                Some(&i) => {
                    debug!("Overriding default rule '{}' with user definition.", user_rule.id);
                    final_rules[i] = user_rule;
                }
                None => {
                    index.insert(user_rule.id.clone(), final_rules.len());
                    final_rules.push(user_rule);
                }
            }
        }
    }

    debug!("Final total rules after merge: {}", final_rules.len());
    RuleDictionary { rules: final_rules }
}

/// Locations searched for a user dictionary, most specific first.
pub fn dictionary_candidate_paths() -> Vec<PathBuf> {
    [
        dirs::home_dir().map(|p| p.join(".notation").join(USER_DICTIONARY_FILE)),
        dirs::config_dir().map(|p| p.join("notation").join(USER_DICTIONARY_FILE)),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Loads the first user dictionary found in [`dictionary_candidate_paths`].
pub fn load_user_dictionary() -> Result<Option<RuleDictionary>> {
    for path in dictionary_candidate_paths() {
        if path.is_file() {
            return RuleDictionary::load_from_file(&path).map(Some);
        }
        debug!("No user dictionary at {}", path.display());
    }
    Ok(None)
}

fn parse_default_dictionary() -> std::result::Result<RuleDictionary, String> {
    RuleDictionary::from_yaml_str(DEFAULT_RULES_YAML).map_err(|e| format!("{:#}", e))
}

/// Validates rule integrity. Regex syntax is not checked here; malformed
/// patterns are reported per pattern by the compiler.
fn validate_rules(rules: &[NotationRule]) -> Result<()> {
    let mut rule_ids = HashSet::new();
    let mut errors = Vec::new();

    for rule in rules {
        if rule.id.is_empty() {
            errors.push("A rule has an empty `id`.".to_string());
        } else if !rule_ids.insert(rule.id.as_str()) {
            errors.push(format!("Duplicate rule id found: '{}'.", rule.id));
        }

        if !rule.wrong.is_empty() && rule.correct.is_empty() {
            errors.push(format!(
                "Rule '{}' has wrong patterns but no correct candidate.",
                rule.id
            ));
        }

        for pattern in &rule.wrong {
            if pattern.is_empty() {
                errors.push(format!("Rule '{}' has an empty wrong pattern.", rule.id));
            }
            let len = pattern.chars().count();
            if len > MAX_PATTERN_LENGTH {
                errors.push(format!(
                    "Rule '{}': pattern length ({}) exceeds maximum allowed ({}).",
                    rule.id, len, MAX_PATTERN_LENGTH
                ));
            }
        }
    }

    if !errors.is_empty() {
        Err(anyhow!("Rule validation failed:\n{}", errors.join("\n")))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyed_yaml_preserves_document_order() {
        let yaml = r#"
"2":
  wrong: ["東京大学第98回五月祭"]
  correct: ["東京大学 第98回五月祭"]
"1":
  wrong: ["5月祭"]
  correct: ["第98回五月祭"]
10:
  wrong: []
  correct: ["委員会"]
"#;
        let dict = RuleDictionary::from_yaml_str(yaml).unwrap();
        let ids: Vec<&str> = dict.rules.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1", "10"]);
        assert!(dict.rules[2].is_reference_only());
        assert_eq!(dict.rules[1].suggestion(), Some("第98回五月祭"));
    }

    #[test]
    fn wrapped_list_shape_is_accepted() {
        let yaml = r#"
rules:
  - id: comma
    wrong: [","]
    correct: ["、"]
  - id: period
    wrong: ["."]
    correct: ["。"]
    description: "Use the Japanese full stop"
"#;
        let dict = RuleDictionary::from_yaml_str(yaml).unwrap();
        assert_eq!(dict.rules.len(), 2);
        assert_eq!(dict.rules[1].description.as_deref(), Some("Use the Japanese full stop"));
    }

    #[test]
    fn json_keyed_shape_is_accepted() {
        let json = r#"{"1": {"wrong": ["~"], "correct": ["〜"]}, "2": {"wrong": [], "correct": []}}"#;
        let dict = RuleDictionary::from_json_str(json).unwrap();
        assert_eq!(dict.rules[0].id, "1");
        assert_eq!(dict.rules[1].suggestion(), None);
    }

    #[test]
    fn validation_rejects_duplicates_and_missing_suggestion() {
        let yaml = r#"
rules:
  - id: a
    wrong: ["x"]
    correct: ["y"]
  - id: a
    wrong: ["z"]
    correct: []
"#;
        let err = RuleDictionary::from_yaml_str(yaml).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("Duplicate rule id found: 'a'"));
        assert!(message.contains("no correct candidate"));
    }

    #[test]
    fn malformed_regex_is_not_a_load_error() {
        let yaml = "bad:\n  wrong: [\"[unclosed\"]\n  correct: [\"ok\"]\n";
        assert!(RuleDictionary::from_yaml_str(yaml).is_ok());
    }

    #[test]
    fn merge_replaces_in_place_and_appends_new() {
        let defaults = RuleDictionary::new(vec![
            NotationRule::new("a", &["x"], &["X"]),
            NotationRule::new("b", &["y"], &["Y"]),
        ]);
        let user = RuleDictionary::new(vec![
            NotationRule::new("c", &["z"], &["Z"]),
            NotationRule::new("a", &["xx"], &["XX"]),
        ]);
        let merged = merge_rules(defaults, Some(user));
        let ids: Vec<&str> = merged.rules.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(merged.rules[0].wrong, vec!["xx".to_string()]);
    }

    #[test]
    fn set_active_rules_filters_and_keeps_order() {
        let mut dict = RuleDictionary::new(vec![
            NotationRule::new("a", &["x"], &["X"]),
            NotationRule::new("b", &["y"], &["Y"]),
            NotationRule::new("c", &["z"], &["Z"]),
        ]);
        dict.set_active_rules(&["c".to_string(), "a".to_string()], &["c".to_string()]);
        let ids: Vec<&str> = dict.rules.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a"]);
    }

    #[test]
    fn default_rules_load() {
        let dict = RuleDictionary::load_default_rules().unwrap();
        assert!(dict.get("1").is_some());
        assert!(dict.detecting_rules().count() < dict.rules.len());
    }
}
