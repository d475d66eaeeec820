// notation/src/commands/rules.rs
//! `notation rules`: list the active dictionary.

use anyhow::Result;
use is_terminal::IsTerminal;
use std::io;
use std::process::ExitCode;

use notation_core::CorrectionEngine;

use crate::cli::RulesCommand;
use crate::ui::summary_table;
use crate::ui::theme::ThemeMap;

pub fn run_rules(engine: &dyn CorrectionEngine, cmd: &RulesCommand, theme_map: &ThemeMap) -> Result<ExitCode> {
    let stdout = io::stdout();
    let colors = stdout.is_terminal();
    summary_table::print_rules(
        &engine.get_rules().rules,
        &engine.compiled_rules().errors,
        cmd.all,
        &mut stdout.lock(),
        theme_map,
        colors,
    )?;
    Ok(ExitCode::SUCCESS)
}
