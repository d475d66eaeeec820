// notation/src/ui/highlight_view.rs
//! Renders a scan as the original text with each highlighted occurrence
//! marked up as `[matched→suggestion]`.

use std::io::{self, Write};

use notation_core::{HighlightSpan, NotationMatch};

use crate::ui::output_format::styled;
use crate::ui::theme::{ThemeEntry, ThemeMap};

pub const ARROW: &str = "→";

/// Formats one occurrence in its markup form.
pub fn render_match(m: &NotationMatch, theme_map: &ThemeMap, enable_colors: bool) -> String {
    format!(
        "[{}{}{}]",
        styled(&m.matched, ThemeEntry::MatchedText, theme_map, enable_colors),
        ARROW,
        styled(&m.suggestion, ThemeEntry::Suggestion, theme_map, enable_colors)
    )
}

/// Joins the spans back into the buffer, marking every `Matched` span.
pub fn render_spans(spans: &[HighlightSpan], theme_map: &ThemeMap, enable_colors: bool) -> String {
    spans
        .iter()
        .map(|span| match span {
            HighlightSpan::Plain { text, .. } => text.clone(),
            HighlightSpan::Matched(m) => render_match(m, theme_map, enable_colors),
        })
        .collect()
}

pub fn print_highlighted<W: Write>(
    writer: &mut W,
    spans: &[HighlightSpan],
    theme_map: &ThemeMap,
    enable_colors: bool,
) -> io::Result<()> {
    let rendered = render_spans(spans, theme_map, enable_colors);
    if rendered.ends_with('\n') {
        write!(writer, "{}", rendered)
    } else {
        writeln!(writer, "{}", rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::ThemeStyle;
    use notation_core::{CorrectionEngine, NotationRule, RuleDictionary, RuleEngine};

    #[test]
    fn plain_markup() {
        let engine = RuleEngine::new(RuleDictionary::new(vec![NotationRule::new(
            "zoom",
            &["zoom"],
            &["Zoom"],
        )]));
        let scan = engine.scan("zoomで会議");
        let out = render_spans(&scan.spans, &ThemeStyle::default_theme_map(), false);
        assert_eq!(out, "[zoom→Zoom]で会議");
    }

    #[test]
    fn trailing_newline_is_not_doubled() {
        let spans = vec![HighlightSpan::Plain { start: 0, end: 3, text: "ab\n".to_string() }];
        let mut buf = Vec::new();
        print_highlighted(&mut buf, &spans, &ThemeStyle::default_theme_map(), false).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "ab\n");
    }
}
