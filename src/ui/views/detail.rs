use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::model::{Sales, SalesId};
use crate::ui::theme::{ACCENT, GLOBAL_BORDER, HEADER_TEXT};

use super::{format_date, placeholder};

pub fn render(
    frame: &mut Frame<'_>,
    area: Rect,
    id: SalesId,
    entity: &Sales,
    loading: bool,
    date_format: &str,
) {
    let block = Block::default()
        .title(format!(" Sales #{} ", id))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(GLOBAL_BORDER));

    if entity.id != Some(id) {
        let message = if loading { "Loading..." } else { "Not loaded." };
        frame.render_widget(placeholder(message).block(block), area);
        return;
    }

    frame.render_widget(Paragraph::new(field_lines(entity, date_format)).block(block), area);
}

/// Read-only `label: value` lines, shared with the delete confirmation.
pub(crate) fn field_lines(entity: &Sales, date_format: &str) -> Vec<Line<'static>> {
    let label = Style::default().fg(ACCENT).add_modifier(Modifier::BOLD);
    let value = Style::default().fg(HEADER_TEXT);
    let rows = [
        ("ID", entity.id.map(|id| id.to_string()).unwrap_or_default()),
        ("Description", entity.description.clone().unwrap_or_default()),
        (
            "State",
            entity.state.map(|s| s.as_str().to_string()).unwrap_or_default(),
        ),
        ("Date", format_date(entity.date, date_format)),
    ];

    rows.into_iter()
        .map(|(name, text)| {
            Line::from(vec![
                Span::styled(format!("  {:<12}", name), label),
                Span::styled(text, value),
            ])
        })
        .collect()
}
