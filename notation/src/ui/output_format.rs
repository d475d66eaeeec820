// notation/src/ui/output_format.rs
//! Styled status messages written to any `Write` sink.
//!
//! Colors are only emitted when the caller says the sink supports them, so
//! redirected output stays plain.

use owo_colors::OwoColorize;
use std::io::{self, Write};

use crate::ui::theme::{ThemeEntry, ThemeMap};

/// Applies the theme color for `entry` to `text` when `enable_colors` is set.
pub fn styled(text: &str, entry: ThemeEntry, theme_map: &ThemeMap, enable_colors: bool) -> String {
    if !enable_colors {
        return text.to_string();
    }
    match theme_map.get(&entry).and_then(|style| style.fg.as_ref()) {
        Some(color) => text.color(color.to_ansi_color()).to_string(),
        None => text.to_string(),
    }
}

fn print_message<W: Write>(
    writer: &mut W,
    prefix: &str,
    message: &str,
    entry: ThemeEntry,
    theme_map: &ThemeMap,
    enable_colors: bool,
) -> io::Result<()> {
    let line = format!("{}{}", prefix, message);
    writeln!(writer, "{}", styled(&line, entry, theme_map, enable_colors))
}

pub fn print_info_message<W: Write>(writer: &mut W, message: &str, theme_map: &ThemeMap, enable_colors: bool) -> io::Result<()> {
    print_message(writer, "", message, ThemeEntry::Info, theme_map, enable_colors)
}

pub fn print_success_message<W: Write>(writer: &mut W, message: &str, theme_map: &ThemeMap, enable_colors: bool) -> io::Result<()> {
    print_message(writer, "", message, ThemeEntry::Success, theme_map, enable_colors)
}

pub fn print_warn_message<W: Write>(writer: &mut W, message: &str, theme_map: &ThemeMap, enable_colors: bool) -> io::Result<()> {
    print_message(writer, "Warning: ", message, ThemeEntry::Warn, theme_map, enable_colors)
}

pub fn print_error_message<W: Write>(writer: &mut W, message: &str, theme_map: &ThemeMap, enable_colors: bool) -> io::Result<()> {
    print_message(writer, "Error: ", message, ThemeEntry::Error, theme_map, enable_colors)
}
