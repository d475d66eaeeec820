// notation/src/main.rs
//! notation entry point.

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use std::process::ExitCode;

use notation::cli::{Cli, Commands};
use notation::commands::{self, error_msg, warn_msg};
use notation::dictionary::build_dictionary;
use notation::logger;
use notation::ui::theme::{build_theme_map, ThemeStyle};
use notation_core::{CorrectionEngine, RuleEngine};

fn run(cli: Cli) -> Result<ExitCode> {
    let theme_map = build_theme_map(cli.theme.as_ref()).context("Theme error")?;

    let dictionary = build_dictionary(cli.rules.as_deref(), cli.no_user_rules, &cli.enable, &cli.disable)?;
    let engine = RuleEngine::new(dictionary);

    if !cli.quiet {
        for failure in engine.compile_errors() {
            warn_msg(
                format!("Rule '{}' pattern '{}' is disabled: {}", failure.rule_id, failure.pattern, failure.message),
                &theme_map,
            );
        }
    }
    if engine.get_rules().detecting_rules().next().is_none() {
        warn!("The active dictionary has no rules that can match.");
    }

    match &cli.command {
        Commands::Check(cmd) => commands::check::run_check(&engine, cmd, &theme_map, cli.quiet),
        Commands::Fix(cmd) => commands::fix::run_fix(&engine, cmd, &theme_map, cli.quiet),
        Commands::Review(cmd) => commands::review::run_review_command(&engine, cmd, &theme_map),
        Commands::Rules(cmd) => commands::rules::run_rules(&engine, cmd, &theme_map),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init_logger(logger::level_from_flags(cli.quiet, cli.debug));
    info!("notation started. Version: {}", env!("CARGO_PKG_VERSION"));

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            error_msg(format!("{:#}", e), &ThemeStyle::default_theme_map());
            ExitCode::from(2)
        }
    }
}
