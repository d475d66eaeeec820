// notation/src/utils/input.rs
//! Reading the document to check and writing the result back out.

use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

/// Reads the whole document from `path`, or from stdin when no path is given.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => {
            debug!("Reading input from file: {}", path.display());
            fs::read_to_string(path).with_context(|| format!("Failed to read input file: {}", path.display()))
        }
        None => {
            debug!("Reading input from stdin.");
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer).context("Failed to read from stdin")?;
            Ok(buffer)
        }
    }
}

/// Writes `content` unchanged to `path`.
pub fn write_output_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).with_context(|| format!("Failed to write output file: {}", path.display()))
}

/// Writes `content` with exactly one trailing newline.
pub fn write_text<W: Write>(writer: &mut W, content: &str) -> io::Result<()> {
    if content.ends_with('\n') {
        write!(writer, "{}", content)
    } else {
        writeln!(writer, "{}", content)
    }
}
