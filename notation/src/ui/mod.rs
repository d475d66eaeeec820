// notation/src/ui/mod.rs
//! Terminal presentation: themes, styled messages, highlighted previews,
//! summary tables and diffs.

pub mod diff_viewer;
pub mod highlight_view;
pub mod output_format;
pub mod summary_table;
pub mod theme;
