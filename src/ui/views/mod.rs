//! Per-route body renderers.

pub mod delete;
pub mod detail;
pub mod editor;
pub mod list;

use chrono::NaiveDate;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use std::fmt::Write;

use crate::ui::theme::MUTED_TEXT;

/// Format `date` with a user-supplied chrono pattern, falling back to ISO
/// when the pattern cannot render.
pub fn format_date(date: Option<NaiveDate>, pattern: &str) -> String {
    let Some(date) = date else {
        return String::new();
    };
    let mut out = String::new();
    if write!(out, "{}", date.format(pattern)).is_err() {
        return date.to_string();
    }
    out
}

pub(crate) fn placeholder(message: &str) -> Paragraph<'static> {
    Paragraph::new(Line::from(format!("  {}", message))).style(Style::default().fg(MUTED_TEXT))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_pattern() {
        let date = NaiveDate::from_ymd_opt(2020, 1, 1);
        assert_eq!(format_date(date, "%Y-%m-%d"), "2020-01-01");
        assert_eq!(format_date(date, "%d/%m/%Y"), "01/01/2020");
        assert_eq!(format_date(None, "%Y-%m-%d"), "");
    }

    #[test]
    fn bad_pattern_falls_back_to_iso() {
        let date = NaiveDate::from_ymd_opt(2020, 1, 1);
        assert_eq!(format_date(date, "%Y-%"), "2020-01-01");
    }
}
