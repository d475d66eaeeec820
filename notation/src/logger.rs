// notation/src/logger.rs
//! Logger setup for the `notation` binary.
//!
//! `RUST_LOG` is honored unless an explicit level is passed in; the default
//! filter is `warn` so normal runs only print the command's own output.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initializes the global logger. Calling it twice is harmless.
pub fn init_logger(level_override: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    builder.format_timestamp(None).format_target(true);

    if let Some(level) = level_override {
        builder.filter_level(level);
    }

    // A second init (e.g. from tests) is ignored.
    let _ = builder.try_init();
}

/// Picks the level implied by the global `--quiet` / `--debug` flags.
pub fn level_from_flags(quiet: bool, debug: bool) -> Option<LevelFilter> {
    if quiet {
        Some(LevelFilter::Off)
    } else if debug {
        Some(LevelFilter::Debug)
    } else {
        None
    }
}
