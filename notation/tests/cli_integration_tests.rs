// notation/tests/cli_integration_tests.rs
//! Command-line integration tests for the `notation` binary.
//!
//! Every invocation passes `--no-user-rules` so a dictionary in the home
//! directory of the machine running the tests cannot change the results.
//! Output is stripped of ANSI escapes before comparison.

use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::io::Write;
use tempfile::{Builder, NamedTempFile};

use strip_ansi_escapes::strip as strip_ansi_escapes_fn;

fn notation(input: &str, args: &[&str]) -> assert_cmd::assert::Assert {
    let mut cmd = Command::cargo_bin("notation").unwrap();
    cmd.env("RUST_LOG", "warn");
    cmd.arg("--no-user-rules");
    cmd.args(args);
    cmd.write_stdin(input.as_bytes());
    cmd.assert()
}

fn strip_ansi(s: &[u8]) -> String {
    String::from_utf8_lossy(&strip_ansi_escapes_fn(s)).to_string()
}

#[test]
fn check_prints_highlighted_preview_and_summary() {
    let assert = notation("zoomで会議.", &["check"]).success();
    let output = assert.get_output();
    assert_eq!(strip_ansi(&output.stdout), "[zoom→Zoom]で会議[.→。]\n");

    let stderr = strip_ansi(&output.stderr);
    assert!(stderr.contains("Notation Summary:"));
    assert!(stderr.contains("92"));
    assert!(stderr.contains("2 occurrence(s) across 2 rule(s)."));
}

#[test]
fn check_clean_text() {
    notation("特に問題のない文章です。", &["check", "--fail-on-match"])
        .success()
        .stdout("特に問題のない文章です。\n")
        .stderr(predicate::str::contains("No notation issues found."));
}

#[test]
fn check_fail_on_match_exits_with_one() {
    notation("zoomで会議", &["check", "--fail-on-match", "-q"]).code(1);
}

#[test]
fn check_json_report() -> Result<()> {
    let assert = notation("zoomで会議.", &["check", "--json"]).success();
    let report: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout)?;

    let matches = report["matches"].as_array().unwrap();
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0]["start"], 0);
    assert_eq!(matches[0]["end"], 4);
    assert_eq!(matches[0]["rule_id"], "92");

    let summary = report["summary"].as_array().unwrap();
    assert_eq!(summary[0]["rule_id"], "40");
    assert_eq!(summary[1]["rule_id"], "92");
    assert!(report["failures"].as_array().unwrap().is_empty());
    Ok(())
}

#[test]
fn check_lookbehind_rule() -> Result<()> {
    let assert = notation("夏祭りとお祭り", &["check", "--json"]).success();
    let report: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout)?;
    let matches = report["matches"].as_array().unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0]["start"], 1);
    assert_eq!(matches[0]["matched"], "祭り");
    Ok(())
}

#[test]
fn fix_applies_all_rules() {
    notation("zoomで会議.", &["fix", "-q"]).success().stdout("Zoomで会議。\n");
}

#[test]
fn fix_selected_rule_only() {
    notation("zoomで会議.", &["fix", "--rule", "92", "-q"])
        .success()
        .stdout("Zoomで会議.\n");
}

#[test]
fn fix_unknown_rule_fails() {
    notation("zoom", &["fix", "--rule", "does-not-exist"])
        .code(2)
        .stderr(predicate::str::contains("Rule 'does-not-exist' does not exist"));
}

#[test]
fn fix_writes_output_file() -> Result<()> {
    let mut input = NamedTempFile::new()?;
    write!(input, "5月祭に行く")?;
    let dir = tempfile::tempdir()?;
    let out = dir.path().join("fixed.txt");

    notation(
        "",
        &["fix", "-i", input.path().to_str().unwrap(), "-o", out.to_str().unwrap()],
    )
    .success()
    .stdout("");

    assert_eq!(fs::read_to_string(&out)?, "第98回五月祭に行く");
    Ok(())
}

#[test]
fn fix_diff_view() {
    let assert = notation("zoomで会議.\n", &["fix", "--diff", "-q"]).success();
    let stdout = strip_ansi(&assert.get_output().stdout);
    assert!(stdout.contains("-zoomで会議."));
    assert!(stdout.contains("+Zoomで会議。"));
}

#[test]
fn custom_dictionary_with_enable() -> Result<()> {
    let mut rules = Builder::new().suffix(".yaml").tempfile()?;
    writeln!(rules, "\"web\":\n  wrong: [\"ウェブサイト\"]\n  correct: [\"Webサイト\"]")?;

    notation(
        "ウェブサイトとzoom",
        &["--rules", rules.path().to_str().unwrap(), "--enable", "web", "fix", "-q"],
    )
    .success()
    .stdout("Webサイトとzoom\n");
    Ok(())
}

#[test]
fn disable_keeps_text_untouched() {
    notation("zoom", &["--disable", "92", "fix", "-q"]).success().stdout("zoom\n");
}

#[test]
fn invalid_dictionary_is_reported() -> Result<()> {
    let mut rules = Builder::new().suffix(".yaml").tempfile()?;
    writeln!(rules, "\"broken\":\n  wrong: [\"x\"]\n  correct: []")?;

    notation("x", &["--rules", rules.path().to_str().unwrap(), "check"])
        .code(2)
        .stderr(predicate::str::contains("broken"));
    Ok(())
}

#[test]
fn review_applies_answers() -> Result<()> {
    let mut input = NamedTempFile::new()?;
    write!(input, "zoomで会議.")?;

    let assert = notation("y\nn\n", &["review", "-i", input.path().to_str().unwrap()]).success();
    let output = assert.get_output();
    assert_eq!(strip_ansi(&output.stdout), "Zoomで会議.\n");

    let stderr = strip_ansi(&output.stderr);
    assert!(stderr.contains("Rule 92:"));
    assert!(stderr.contains("[zoom→Zoom]"));
    assert!(stderr.contains("Review finished: 1 accepted, 1 skipped."));
    Ok(())
}

#[test]
fn rules_listing() {
    let assert = notation("", &["rules"]).success();
    let stdout = strip_ansi(&assert.get_output().stdout);
    assert!(stdout.contains("Zoom"));
    assert!(!stdout.contains("五月祭常任委員会"));

    let assert = notation("", &["rules", "--all"]).success();
    let stdout = strip_ansi(&assert.get_output().stdout);
    assert!(stdout.contains("五月祭常任委員会"));
}

#[test]
fn fix_diff_with_output_file_writes_both() -> Result<()> {
    let mut input = NamedTempFile::new()?;
    write!(input, "a,b.c\n")?;
    let dir = tempfile::tempdir()?;
    let out = dir.path().join("out.txt");

    let assert = notation(
        "",
        &["fix", "-i", input.path().to_str().unwrap(), "-o", out.to_str().unwrap(), "--diff", "-q"],
    )
    .success();

    let stdout = strip_ansi(&assert.get_output().stdout);
    assert!(stdout.contains("-a,b.c"));
    assert!(stdout.contains("+a、b。c"));
    assert_eq!(fs::read_to_string(&out)?, "a、b。c\n");
    Ok(())
}

#[test]
fn check_reports_broken_pattern_once() -> Result<()> {
    let mut rules = Builder::new().suffix(".yaml").tempfile()?;
    writeln!(rules, "\"broken\":\n  wrong: [\"(?=x\"]\n  correct: [\"y\"]")?;
    let rules_path = rules.path().to_str().unwrap();

    let assert = notation("zoom", &["--rules", rules_path, "check"]).success();
    let stderr = strip_ansi(&assert.get_output().stderr);
    assert_eq!(stderr.matches("Rule 'broken' pattern").count(), 1);

    notation("zoom", &["--rules", rules_path, "check", "-q"])
        .success()
        .stderr(predicate::str::contains("Warning").not());
    Ok(())
}
