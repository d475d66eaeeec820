// notation/src/commands/review.rs
//! `notation review`: walk through highlighted occurrences one at a time.
//!
//! The buffer is re-scanned after every decision, so a match is never
//! applied against text it was not taken from. The cursor is a char offset;
//! only highlighted matches starting at or after it are offered.

use anyhow::Result;
use is_terminal::IsTerminal;
use log::{debug, info};
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use notation_core::{CorrectionEngine, NotationMatch};

use crate::cli::ReviewCommand;
use crate::commands::{info_msg, success_msg};
use crate::ui::highlight_view::render_match;
use crate::ui::output_format::styled;
use crate::ui::theme::{ThemeEntry, ThemeMap};
use crate::utils::input::{read_input, write_output_file, write_text};

const CONTEXT_CHARS: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Yes,
    No,
    AllOfRule,
    Quit,
}

impl Decision {
    pub fn parse(answer: &str) -> Option<Self> {
        match answer.trim().to_lowercase().as_str() {
            "y" | "yes" => Some(Decision::Yes),
            "n" | "no" => Some(Decision::No),
            "a" | "all" => Some(Decision::AllOfRule),
            "q" | "quit" => Some(Decision::Quit),
            _ => None,
        }
    }
}

/// Result of an interactive session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewOutcome {
    pub text: String,
    pub accepted: usize,
    pub skipped: usize,
}

/// The text around `m`, with `m` itself in markup form. Newlines are shown as `⏎`.
fn context_snippet(text: &str, m: &NotationMatch, theme_map: &ThemeMap, enable_colors: bool) -> String {
    let chars: Vec<char> = text.chars().collect();
    let from = m.start.saturating_sub(CONTEXT_CHARS);
    let to = (m.end + CONTEXT_CHARS).min(chars.len());
    let flatten = |s: &[char]| s.iter().map(|c| if *c == '\n' { '⏎' } else { *c }).collect::<String>();

    let before = flatten(&chars[from..m.start.min(chars.len())]);
    let after = flatten(&chars[m.end.min(chars.len())..to]);
    format!("{}{}{}", before, render_match(m, theme_map, enable_colors), after)
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn char_prefix(s: &str, chars: usize) -> &str {
    match s.char_indices().nth(chars) {
        Some((byte, _)) => &s[..byte],
        None => s,
    }
}

/// Runs the prompt loop over `text`, reading answers from `input` and
/// writing prompts to `prompt_out`. End of input counts as quitting.
pub fn run_review<R: BufRead, W: Write>(
    engine: &dyn CorrectionEngine,
    text: String,
    input: &mut R,
    prompt_out: &mut W,
    theme_map: &ThemeMap,
    enable_colors: bool,
) -> Result<ReviewOutcome> {
    let mut outcome = ReviewOutcome { text, ..ReviewOutcome::default() };
    let mut cursor = 0usize;

    loop {
        let scan = engine.scan(&outcome.text);
        let Some(m) = scan.next_highlight_from(cursor).cloned() else {
            debug!("No highlighted match at or after {}.", cursor);
            break;
        };

        writeln!(
            prompt_out,
            "{} {}",
            styled(&format!("Rule {}:", m.rule_id), ThemeEntry::SummaryRuleId, theme_map, enable_colors),
            context_snippet(&outcome.text, &m, theme_map, enable_colors)
        )?;

        let decision = loop {
            write!(
                prompt_out,
                "{}",
                styled("Replace? [y]es/[n]o/[a]ll-of-rule/[q]uit: ", ThemeEntry::Prompt, theme_map, enable_colors)
            )?;
            prompt_out.flush()?;

            let mut answer = String::new();
            if input.read_line(&mut answer)? == 0 {
                break Decision::Quit;
            }
            match Decision::parse(&answer) {
                Some(decision) => break decision,
                None => writeln!(prompt_out, "Please answer y, n, a or q.")?,
            }
        };

        match decision {
            Decision::Yes => {
                outcome.text = engine.replace_occurrence(&outcome.text, &m)?;
                outcome.accepted += 1;
                let replaced = char_len(&m.suggestion);
                cursor = if replaced == 0 && m.start == m.end { m.start + 1 } else { m.start + replaced };
            }
            Decision::No => {
                outcome.skipped += 1;
                cursor = if m.end > m.start { m.end } else { m.start + 1 };
            }
            Decision::AllOfRule => {
                let prefix = engine.replace_by_rule(char_prefix(&outcome.text, m.start), &m.rule_id)?;
                outcome.text = engine.replace_by_rule(&outcome.text, &m.rule_id)?;
                outcome.accepted += 1;
                cursor = char_len(&prefix) + char_len(&m.suggestion).max(1);
            }
            Decision::Quit => {
                info!("Review stopped by user.");
                break;
            }
        }
    }

    Ok(outcome)
}

pub fn run_review_command(engine: &dyn CorrectionEngine, cmd: &ReviewCommand, theme_map: &ThemeMap) -> Result<ExitCode> {
    let text = read_input(Some(cmd.input_file.as_path()))?;
    let stdin = io::stdin();
    let stderr = io::stderr();
    let colors = stderr.is_terminal();

    let outcome = run_review(engine, text, &mut stdin.lock(), &mut stderr.lock(), theme_map, colors)?;

    match &cmd.output {
        Some(path) => {
            write_output_file(path, &outcome.text)?;
            info_msg(format!("Reviewed text written to {}", path.display()), theme_map);
        }
        None => write_text(&mut io::stdout().lock(), &outcome.text)?,
    }
    success_msg(
        format!("Review finished: {} accepted, {} skipped.", outcome.accepted, outcome.skipped),
        theme_map,
    );
    Ok(ExitCode::SUCCESS)
}
