// notation-core/tests/engine_integration_tests.rs
//! End-to-end behaviour of the rule engine: scanning, overlap resolution,
//! aggregation and the three replacement operations, against both small
//! hand-written dictionaries and the embedded default dictionary.

use notation_core::{
    CorrectionEngine, HighlightSpan, NotationError, NotationRule, RuleDictionary, RuleEngine,
};

fn engine(rules: Vec<NotationRule>) -> RuleEngine {
    RuleEngine::new(RuleDictionary::new(rules))
}

fn default_engine() -> RuleEngine {
    RuleEngine::new(RuleDictionary::load_default_rules().expect("default rules load"))
}

const SAMPLE: &str = "去年の五月祭はお客様が多く、5月祭の来場者さんは車椅子でも回る事ができました.\n\
詳しくは公式ホームページ(5月24日)を見て下さい, 夏祭りとお祭りは別です。その時に集合.";

#[test_log::test]
fn scan_is_sorted_for_default_dictionary() {
    let scan = default_engine().scan(SAMPLE);
    assert!(!scan.matches.is_empty());
    assert!(scan.matches.windows(2).all(|w| w[0].start <= w[1].start));
}

#[test_log::test]
fn spans_partition_the_buffer() {
    let scan = default_engine().scan(SAMPLE);
    let rebuilt: String = scan.spans.iter().map(HighlightSpan::text).collect();
    assert_eq!(rebuilt, SAMPLE);

    let mut cursor = 0;
    for span in &scan.spans {
        let (start, end) = match span {
            HighlightSpan::Plain { start, end, .. } => (*start, *end),
            HighlightSpan::Matched(m) => (m.start, m.end),
        };
        assert_eq!(start, cursor, "spans must be contiguous");
        assert!(end >= start);
        cursor = end;
    }
    assert_eq!(cursor, SAMPLE.chars().count());
}

#[test]
fn lookbehind_rule_in_default_dictionary() {
    let scan = default_engine().scan("夏祭りとお祭り");
    let festival: Vec<_> = scan.matches.iter().filter(|m| m.rule_id == "81").collect();
    assert_eq!(festival.len(), 1);
    assert_eq!(festival[0].start, 1);
    assert_eq!(festival[0].suggestion, "お祭り");
}

#[test]
fn period_rule_matches_literal_period_only() {
    let scan = default_engine().scan("abc");
    assert!(scan.matches.iter().all(|m| m.rule_id != "40"));

    let scan = default_engine().scan("a.b");
    let periods: Vec<_> = scan.matches.iter().filter(|m| m.rule_id == "40").collect();
    assert_eq!(periods.len(), 1);
    assert_eq!(periods[0].start, 1);
}

#[test]
fn reference_only_rules_never_surface() {
    let engine = default_engine();
    let reference_ids: Vec<String> = engine
        .get_rules()
        .rules
        .iter()
        .filter(|r| r.is_reference_only())
        .map(|r| r.id.clone())
        .collect();
    assert!(!reference_ids.is_empty());

    // Text made of reference-only suggestions.
    let text = "五月祭当日に五月祭常任委員会の委員会室へ。公式SNSと公式LINE。";
    let scan = engine.scan(text);
    assert!(scan.matches.iter().all(|m| !reference_ids.contains(&m.rule_id)));
    assert!(scan
        .highlighted()
        .all(|m| !reference_ids.contains(&m.rule_id)));
}

#[test]
fn occurrence_replacement_requires_fresh_scan() {
    let engine = engine(vec![NotationRule::new("zoom", &["zoom"], &["Zoom"])]);
    let text = "zoom then zoom";
    let scan = engine.scan(text);

    let first = engine.replace_occurrence(text, &scan.matches[0]).unwrap();
    assert_eq!(first, "Zoom then zoom");

    // Offsets from the old scan still happen to line up here, but the text
    // under the first match changed, so reusing it must fail.
    let stale = engine.replace_occurrence(&first, &scan.matches[0]);
    assert!(matches!(stale, Err(NotationError::StaleMatch { .. })));

    let rescan = engine.scan(&first);
    assert_eq!(rescan.matches.len(), 1);
    let second = engine.replace_occurrence(&first, &rescan.matches[0]).unwrap();
    assert_eq!(second, "Zoom then Zoom");
}

#[test]
fn replace_all_reaches_a_fixed_point() {
    let engine = engine(vec![
        NotationRule::new("1", &["5月祭"], &["第98回五月祭"]),
        NotationRule::new("38", &["~"], &["〜"]),
        NotationRule::new("39", &[","], &["、"]),
        NotationRule::new("40", &["."], &["。"]),
        NotationRule::new("guest", &["来場客", "お客様", "お客さま"], &["来場者"]),
    ]);
    let text = "5月祭は10時~17時. お客様, 来場客, お客さまへ.";
    let fixed = engine.replace_all(text);
    assert_eq!(fixed, "第98回五月祭は10時〜17時。 来場者、 来場者、 来場者へ。");
    assert!(engine.scan(&fixed).is_clean());
    assert_eq!(engine.replace_all(&fixed), fixed);
}

#[test]
fn replace_by_rule_only_touches_that_rule() {
    let engine = default_engine();
    let text = "お客様, ようこそ";
    let out = engine.replace_by_rule(text, "71").unwrap();
    assert_eq!(out, "来場者, ようこそ");
}

#[test]
fn replace_by_rule_without_occurrences_returns_input() {
    let engine = default_engine();
    let text = "特に問題のない文章";
    assert_eq!(engine.replace_by_rule(text, "92").unwrap(), text);
}

#[test]
fn overlapping_rules_first_discovered_wins() {
    let engine = engine(vec![
        NotationRule::new("three", &["五月祭"], &["第98回五月祭"]),
        NotationRule::new("longer", &["五月祭です"], &["五月祭となります"]),
    ]);
    let scan = engine.scan("五月祭です");
    let highlighted: Vec<_> = scan.highlighted().collect();
    assert_eq!(highlighted.len(), 1);
    assert_eq!(highlighted[0].rule_id, "three");

    let longer = scan.summary.iter().find(|s| s.rule_id == "longer").unwrap();
    assert_eq!(longer.occurrences, 1);
    assert_eq!(longer.matched_texts, vec!["五月祭です".to_string()]);
}

#[test]
fn malformed_pattern_does_not_stop_other_rules() {
    let engine = engine(vec![
        NotationRule::new("broken", &["(?=unclosed"], &["x"]),
        NotationRule::new("zoom", &["zoom"], &["Zoom"]),
    ]);
    let scan = engine.scan("zoom");
    assert_eq!(scan.matches.len(), 1);
    assert_eq!(scan.failures.len(), 1);
    assert_eq!(scan.failures[0].rule_id, "broken");
    assert_eq!(engine.replace_all("zoom"), "Zoom");
}
