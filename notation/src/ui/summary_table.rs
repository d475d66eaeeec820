// notation/src/ui/summary_table.rs
//! Per-rule summary and rule listings rendered with `comfy-table`.

use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use std::io::{self, Write};

use notation_core::{NotationRule, PatternFailure, RuleSummary};

use crate::ui::output_format::styled;
use crate::ui::theme::{ThemeEntry, ThemeMap};

/// Writes the summary of a scan. Nothing but a short line is printed for a
/// clean buffer.
pub fn print_summary<W: Write>(
    summary: &[RuleSummary],
    writer: &mut W,
    theme_map: &ThemeMap,
    enable_colors: bool,
) -> io::Result<()> {
    if summary.is_empty() {
        return writeln!(
            writer,
            "{}",
            styled("No notation issues found.", ThemeEntry::Success, theme_map, enable_colors)
        );
    }

    writeln!(writer, "{}", styled("Notation Summary:", ThemeEntry::Header, theme_map, enable_colors))?;

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Rule", "Count", "Found", "Suggestion"]);

    for item in summary {
        table.add_row(vec![
            styled(&item.rule_id, ThemeEntry::SummaryRuleId, theme_map, enable_colors),
            styled(&item.occurrences.to_string(), ThemeEntry::SummaryOccurrences, theme_map, enable_colors),
            styled(&item.matched_texts.join(", "), ThemeEntry::MatchedText, theme_map, enable_colors),
            styled(&item.suggestion, ThemeEntry::Suggestion, theme_map, enable_colors),
        ]);
    }
    writeln!(writer, "{}", table)?;

    let total: usize = summary.iter().map(|s| s.occurrences).sum();
    writeln!(writer, "{} occurrence(s) across {} rule(s).", total, summary.len())
}

/// Lists dictionary rules; reference-only rules are included when `all` is set.
pub fn print_rules<W: Write>(
    rules: &[NotationRule],
    failures: &[PatternFailure],
    all: bool,
    writer: &mut W,
    theme_map: &ThemeMap,
    enable_colors: bool,
) -> io::Result<()> {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Rule", "Wrong", "Correct", "Status"]);

    let mut shown = 0usize;
    for rule in rules.iter().filter(|r| all || !r.is_reference_only()) {
        let broken = failures.iter().filter(|f| f.rule_id == rule.id).count();
        let status = if rule.is_reference_only() {
            "reference".to_string()
        } else if broken > 0 {
            styled(&format!("{} broken pattern(s)", broken), ThemeEntry::Error, theme_map, enable_colors)
        } else {
            "ok".to_string()
        };
        table.add_row(vec![
            styled(&rule.id, ThemeEntry::SummaryRuleId, theme_map, enable_colors),
            rule.wrong.join(", "),
            rule.correct.join(", "),
            status,
        ]);
        shown += 1;
    }

    writeln!(writer, "{}", table)?;
    writeln!(writer, "{} rule(s) listed.", shown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::ThemeStyle;

    #[test]
    fn empty_summary_prints_clean_message() {
        let mut buf = Vec::new();
        print_summary(&[], &mut buf, &ThemeStyle::default_theme_map(), false).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "No notation issues found.\n");
    }

    #[test]
    fn summary_lists_each_rule() {
        let summary = vec![RuleSummary {
            rule_id: "92".to_string(),
            occurrences: 2,
            suggestion: "Zoom".to_string(),
            matched_texts: vec!["zoom".to_string()],
        }];
        let mut buf = Vec::new();
        print_summary(&summary, &mut buf, &ThemeStyle::default_theme_map(), false).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("Notation Summary:"));
        assert!(out.contains("92"));
        assert!(out.contains("Zoom"));
        assert!(out.contains("2 occurrence(s) across 1 rule(s)."));
    }

    #[test]
    fn reference_rules_hidden_unless_all() {
        let rules = vec![
            NotationRule::new("a", &["x"], &["X"]),
            NotationRule::new("ref", &[], &["公式SNS"]),
        ];
        let theme = ThemeStyle::default_theme_map();

        let mut buf = Vec::new();
        print_rules(&rules, &[], false, &mut buf, &theme, false).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(!out.contains("公式SNS"));
        assert!(out.contains("1 rule(s) listed."));

        let mut buf = Vec::new();
        print_rules(&rules, &[], true, &mut buf, &theme, false).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("公式SNS"));
        assert!(out.contains("reference"));
    }
}
