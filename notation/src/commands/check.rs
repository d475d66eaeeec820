// notation/src/commands/check.rs
//! `notation check`: highlight occurrences and summarize them per rule.

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::{debug, info};
use serde::Serialize;
use std::io::{self, Write};
use std::process::ExitCode;

use notation_core::{CorrectionEngine, NotationMatch, PatternFailure, RuleSummary, Scan};

use crate::cli::CheckCommand;
use crate::commands::warn_msg;
use crate::ui::highlight_view;
use crate::ui::summary_table;
use crate::ui::theme::ThemeMap;
use crate::utils::input::read_input;

/// Machine-readable form of a scan.
#[derive(Debug, Serialize)]
pub struct CheckReport<'a> {
    pub matches: &'a [NotationMatch],
    pub summary: &'a [RuleSummary],
    pub failures: &'a [PatternFailure],
}

impl<'a> From<&'a Scan> for CheckReport<'a> {
    fn from(scan: &'a Scan) -> Self {
        Self {
            matches: &scan.matches,
            summary: &scan.summary,
            failures: &scan.failures,
        }
    }
}

/// Failures raised while scanning. Compile failures are reported once at startup.
pub fn scan_time_failures<'a>(engine: &'a dyn CorrectionEngine, scan: &'a Scan) -> impl Iterator<Item = &'a PatternFailure> {
    let compiled = &engine.compiled_rules().errors;
    scan.failures.iter().filter(move |f| !compiled.contains(f))
}

pub fn run_check(engine: &dyn CorrectionEngine, cmd: &CheckCommand, theme_map: &ThemeMap, quiet: bool) -> Result<ExitCode> {
    info!("Starting check.");
    let text = read_input(cmd.input_file.as_deref())?;
    let scan = engine.scan(&text);
    debug!("Check found {} matches.", scan.matches.len());

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cmd.json {
        let report = CheckReport::from(&scan);
        serde_json::to_writer_pretty(&mut out, &report).context("Failed to serialize check report")?;
        writeln!(out)?;
    } else {
        highlight_view::print_highlighted(&mut out, &scan.spans, theme_map, stdout.is_terminal())?;

        if !cmd.no_summary && !quiet {
            let stderr = io::stderr();
            let colors = stderr.is_terminal();
            summary_table::print_summary(&scan.summary, &mut stderr.lock(), theme_map, colors)?;
        }
        if !quiet {
            for failure in scan_time_failures(engine, &scan) {
                warn_msg(
                    format!("Rule '{}' pattern '{}' was skipped: {}", failure.rule_id, failure.pattern, failure.message),
                    theme_map,
                );
            }
        }
    }

    if cmd.fail_on_match && !scan.is_clean() {
        info!("Failing because {} occurrence(s) were found.", scan.matches.len());
        return Ok(ExitCode::from(1));
    }
    Ok(ExitCode::SUCCESS)
}
