// notation/src/ui/diff_viewer.rs
//! Line diff between the original and the corrected text.

use diffy::{create_patch, Line as DiffLine};
use std::io::{self, Write};

use crate::ui::output_format::styled;
use crate::ui::theme::{ThemeEntry, ThemeMap};

/// Writes the changed hunks of `original` versus `corrected`.
pub fn print_diff<W: Write>(
    original: &str,
    corrected: &str,
    writer: &mut W,
    theme_map: &ThemeMap,
    enable_colors: bool,
) -> io::Result<()> {
    let patch = create_patch(original, corrected);
    writeln!(writer, "{}", styled("--- Diff View ---", ThemeEntry::DiffHeader, theme_map, enable_colors))?;

    let mut changed = false;
    for hunk in patch.hunks() {
        for line in hunk.lines() {
            match line {
                DiffLine::Delete(s) => {
                    changed = true;
                    let text = format!("-{}", s.trim_end_matches('\n'));
                    writeln!(writer, "{}", styled(&text, ThemeEntry::DiffRemoved, theme_map, enable_colors))?;
                }
                DiffLine::Insert(s) => {
                    changed = true;
                    let text = format!("+{}", s.trim_end_matches('\n'));
                    writeln!(writer, "{}", styled(&text, ThemeEntry::DiffAdded, theme_map, enable_colors))?;
                }
                DiffLine::Context(s) => {
                    writeln!(writer, " {}", s.trim_end_matches('\n'))?;
                }
            }
        }
    }

    if !changed {
        writeln!(writer, "No changes.")?;
    }
    writeln!(writer, "{}", styled("-----------------", ThemeEntry::DiffHeader, theme_map, enable_colors))
}
