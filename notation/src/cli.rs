// notation/src/cli.rs
//! Command-line interface definition for the `notation` application.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "notation",
    version = env!("CARGO_PKG_VERSION"),
    about = "Find discouraged Japanese notations and replace them with the preferred ones",
    long_about = "notation checks a document against a style-guide dictionary that maps discouraged notations to preferred ones. It can highlight every occurrence, summarize them per rule, fix them all at once, or walk through them interactively.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Suppress all log output.
    #[arg(long, short = 'q', global = true, help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging.
    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    /// Specify the path to a custom YAML theme file.
    #[arg(long = "theme", value_name = "FILE", global = true, help = "Specify the path to a custom YAML theme file.")]
    pub theme: Option<PathBuf>,

    /// Dictionary file merged over the built-in rules.
    #[arg(long = "rules", value_name = "FILE", global = true, help = "Merge rules from this YAML or JSON dictionary over the built-in rules.")]
    pub rules: Option<PathBuf>,

    /// Skip the user dictionary in the home/config directory.
    #[arg(long = "no-user-rules", global = true, help = "Do not load ~/.notation/rules.yaml or the config-directory dictionary.")]
    pub no_user_rules: bool,

    /// Keep only these rule ids (comma-separated).
    #[arg(long, short = 'e', value_delimiter = ',', global = true, help = "Explicitly enable only these rule ids (comma-separated).")]
    pub enable: Vec<String>,

    /// Remove these rule ids (comma-separated).
    #[arg(long, short = 'x', value_delimiter = ',', global = true, help = "Explicitly disable these rule ids (comma-separated).")]
    pub disable: Vec<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `notation` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Highlights every discouraged notation and summarizes them per rule.
    Check(CheckCommand),

    /// Replaces discouraged notations with the preferred ones.
    Fix(FixCommand),

    /// Walks through each occurrence and asks whether to replace it.
    Review(ReviewCommand),

    /// Lists the rules in the active dictionary.
    Rules(RulesCommand),
}

/// Arguments for the `check` command.
#[derive(Args, Debug)]
pub struct CheckCommand {
    #[arg(long, short = 'i', value_name = "FILE", help = "Read input from a specified file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    #[arg(long, help = "Print matches, summary and pattern failures as JSON.")]
    pub json: bool,

    #[arg(long = "fail-on-match", help = "Exit with a non-zero code if any occurrence is found.")]
    pub fail_on_match: bool,

    #[arg(long = "no-summary", help = "Do not print the per-rule summary.")]
    pub no_summary: bool,
}

/// Arguments for the `fix` command.
#[derive(Args, Debug)]
pub struct FixCommand {
    #[arg(long, short = 'i', value_name = "FILE", help = "Read input from a specified file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    #[arg(long, short = 'o', value_name = "FILE", help = "Write output to a specified file instead of stdout.")]
    pub output: Option<PathBuf>,

    /// Apply only these rules, in the given order.
    #[arg(id = "rule_ids", long = "rule", value_name = "ID", value_delimiter = ',', help = "Apply only these rule ids, in the given order.")]
    pub rules: Vec<String>,

    #[arg(long, short = 'D', help = "Show a diff of the changes instead of the corrected text.")]
    pub diff: bool,

    #[arg(long, short = 'c', help = "Copy the corrected text to the system clipboard.")]
    pub clipboard: bool,
}

/// Arguments for the `review` command.
#[derive(Args, Debug)]
pub struct ReviewCommand {
    /// The document to review. Stdin is used for the answers.
    #[arg(long, short = 'i', value_name = "FILE", help = "The document to review.")]
    pub input_file: PathBuf,

    #[arg(long, short = 'o', value_name = "FILE", help = "Write the reviewed text to a file instead of stdout.")]
    pub output: Option<PathBuf>,
}

/// Arguments for the `rules` command.
#[derive(Args, Debug)]
pub struct RulesCommand {
    #[arg(long, help = "Include reference-only rules that never produce matches.")]
    pub all: bool,
}
