// notation/src/dictionary.rs
//! Assembles the active dictionary from the built-in rules, a user or
//! explicit dictionary file, and the enable/disable filters.

use anyhow::{Context, Result};
use log::{debug, info};
use std::path::Path;

use notation_core::{load_user_dictionary, merge_rules, RuleDictionary};

pub fn build_dictionary(
    rules_file: Option<&Path>,
    no_user_rules: bool,
    enable: &[String],
    disable: &[String],
) -> Result<RuleDictionary> {
    let defaults = RuleDictionary::load_default_rules()?;

    let overlay = match rules_file {
        Some(path) => {
            info!("Loading dictionary from {}", path.display());
            Some(
                RuleDictionary::load_from_file(path)
                    .with_context(|| format!("Failed to load dictionary {}", path.display()))?,
            )
        }
        None if no_user_rules => None,
        None => load_user_dictionary().context("Failed to load the user dictionary")?,
    };
    debug!("Overlay dictionary present: {}", overlay.is_some());

    let mut dictionary = merge_rules(defaults, overlay);
    dictionary.set_active_rules(enable, disable);
    Ok(dictionary)
}
