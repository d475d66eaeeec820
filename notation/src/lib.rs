// notation/src/lib.rs
//! # notation CLI
//!
//! Terminal front end for `notation-core`: reads a document, scans it
//! against the active dictionary and prints highlights, summaries, fixes or
//! an interactive review.

pub mod cli;
pub mod commands;
pub mod dictionary;
pub mod logger;
pub mod ui;
pub mod utils;
