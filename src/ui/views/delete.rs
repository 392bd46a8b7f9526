use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::model::{Sales, SalesId};
use crate::ui::theme::STATUS_ERROR;

use super::detail::field_lines;

pub fn render(
    frame: &mut Frame<'_>,
    area: Rect,
    id: SalesId,
    entity: &Sales,
    updating: bool,
    date_format: &str,
) {
    let block = Block::default()
        .title(format!(" Delete sales #{} ", id))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(STATUS_ERROR));

    let mut lines = vec![Line::from(""), question(id, updating), Line::from("")];
    if entity.id == Some(id) {
        lines.extend(field_lines(entity, date_format));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn question(id: SalesId, updating: bool) -> Line<'static> {
    let text = if updating {
        format!("  Deleting sales #{}...", id)
    } else {
        format!("  Are you sure you want to delete sales #{}? (y/n)", id)
    };
    Line::styled(text, Style::default().fg(STATUS_ERROR).add_modifier(Modifier::BOLD))
}
