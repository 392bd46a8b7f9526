use crate::store::StoreStatus;
use crate::ui::route::Route;
use crate::ui::theme::{
    ACCENT, GLOBAL_BORDER, HEADER_SEPARATOR, HEADER_TEXT, STATUS_BUSY, STATUS_OK,
};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

pub struct Header;

impl Header {
    pub fn new() -> Self {
        Self
    }

    pub fn widget(&self, route: Route, status: StoreStatus) -> Paragraph<'static> {
        let text_style = Style::default().fg(HEADER_TEXT);
        let separator_style = Style::default().fg(HEADER_SEPARATOR);
        let (status_text, status_color) = match status {
            StoreStatus::Idle => ("ready", STATUS_OK),
            StoreStatus::Loading => ("loading", STATUS_BUSY),
            StoreStatus::Updating => ("saving", STATUS_BUSY),
        };

        let line = Line::from(vec![
            Span::styled(
                "  salesdesk",
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            ),
            Span::styled("  │  ", separator_style),
            Span::styled(route.title(), text_style),
            Span::styled("  │  ", separator_style),
            Span::styled(route.to_string(), separator_style),
            Span::styled("  │  ", separator_style),
            Span::styled("● ", Style::default().fg(status_color)),
            Span::styled(status_text, text_style),
        ]);

        Paragraph::new(line).block(
            Block::default()
                .borders(Borders::TOP | Borders::BOTTOM)
                .border_style(Style::default().fg(GLOBAL_BORDER)),
        )
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::new()
    }
}
