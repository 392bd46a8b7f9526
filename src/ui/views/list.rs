use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Table, TableState};
use ratatui::Frame;

use crate::model::Sales;
use crate::ui::theme::{ACCENT, ACTIVE_HIGHLIGHT, GLOBAL_BORDER, HEADER_TEXT};

use super::{format_date, placeholder};

pub fn render(
    frame: &mut Frame<'_>,
    area: Rect,
    entities: &[Sales],
    selection: usize,
    loading: bool,
    date_format: &str,
) {
    let block = Block::default()
        .title(" Sales ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(GLOBAL_BORDER));

    if entities.is_empty() {
        let message = if loading {
            "Loading..."
        } else {
            "No sales yet. Press n to create one."
        };
        frame.render_widget(placeholder(message).block(block), area);
        return;
    }

    let header = Row::new(["ID", "Description", "State", "Date"]).style(
        Style::default()
            .fg(ACCENT)
            .add_modifier(Modifier::BOLD),
    );

    let rows = entities.iter().map(|sales| {
        Row::new(vec![
            Cell::from(sales.id.map(|id| id.to_string()).unwrap_or_default()),
            Cell::from(sales.description.clone().unwrap_or_default()),
            Cell::from(sales.state.map(|s| s.as_str()).unwrap_or("")),
            Cell::from(format_date(sales.date, date_format)),
        ])
        .style(Style::default().fg(HEADER_TEXT))
    });

    let widths = [
        Constraint::Length(6),
        Constraint::Min(20),
        Constraint::Length(12),
        Constraint::Length(12),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().bg(ACTIVE_HIGHLIGHT))
        .highlight_symbol("> ");

    let mut state = TableState::default();
    state.select(Some(selection.min(entities.len() - 1)));
    frame.render_stateful_widget(table, area, &mut state);
}
