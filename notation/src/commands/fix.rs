// notation/src/commands/fix.rs
//! `notation fix`: apply replacements for every rule or a chosen few.
//!
//! With `-o` the corrected text goes to the file. `--diff` always prints the
//! diff on stdout, so both can be combined.

use anyhow::Result;
use is_terminal::IsTerminal;
use log::info;
use std::io;
use std::process::ExitCode;

use notation_core::CorrectionEngine;

use crate::cli::FixCommand;
use crate::commands::{info_msg, success_msg, warn_msg};
use crate::ui::diff_viewer;
use crate::ui::theme::ThemeMap;
use crate::utils::clipboard::copy_to_clipboard;
use crate::utils::input::{read_input, write_output_file, write_text};

pub fn run_fix(engine: &dyn CorrectionEngine, cmd: &FixCommand, theme_map: &ThemeMap, quiet: bool) -> Result<ExitCode> {
    info!("Starting fix.");
    let original = read_input(cmd.input_file.as_deref())?;
    let before = engine.scan(&original);
    let fixed = engine.replace_rules(&original, &cmd.rules)?;

    if let Some(path) = &cmd.output {
        write_output_file(path, &fixed)?;
        if !quiet {
            info_msg(format!("Corrected text written to {}", path.display()), theme_map);
        }
    }

    if cmd.diff {
        let stdout = io::stdout();
        let colors = stdout.is_terminal();
        diff_viewer::print_diff(&original, &fixed, &mut stdout.lock(), theme_map, colors)?;
    } else if cmd.output.is_none() {
        write_text(&mut io::stdout().lock(), &fixed)?;
    }

    if cmd.clipboard {
        match copy_to_clipboard(&fixed) {
            Ok(()) => info_msg("Corrected text copied to clipboard.", theme_map),
            Err(e) => warn_msg(format!("Failed to copy to clipboard: {:#}", e), theme_map),
        }
    }

    if !quiet {
        let remaining = engine.scan(&fixed).matches.len();
        success_msg(
            format!(
                "Fixed text: {} occurrence(s) before, {} after.",
                before.matches.len(),
                remaining
            ),
            theme_map,
        );
    }
    Ok(ExitCode::SUCCESS)
}
