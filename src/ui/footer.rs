use crate::ui::app::{Notice, NoticeLevel};
use crate::ui::route::Route;
use crate::ui::theme::{GLOBAL_BORDER, HEADER_TEXT, STATUS_ERROR, STATUS_OK};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct Footer;

impl Default for Footer {
    fn default() -> Self {
        Self::new()
    }
}

impl Footer {
    pub fn new() -> Self {
        Self
    }

    /// Key hints for `route`, replaced by the active notice if there is one.
    pub fn widget(&self, area: Rect, route: Route, notice: Option<&Notice>) -> Paragraph<'static> {
        let (text, text_style) = match notice {
            Some(notice) => {
                let color = match notice.level {
                    NoticeLevel::Info => STATUS_OK,
                    NoticeLevel::Error => STATUS_ERROR,
                };
                (format!(" {}", notice.message), Style::default().fg(color))
            }
            None => (
                hints(route).to_string(),
                Style::default().fg(HEADER_TEXT).add_modifier(Modifier::DIM),
            ),
        };
        let version = format!("v{} ", VERSION);

        // Char count, not byte count, for the box-drawing separators.
        let text_width = text.chars().count();
        let version_width = version.chars().count();
        let content_width = area.width.saturating_sub(2) as usize;
        let padding = content_width
            .saturating_sub(text_width)
            .saturating_sub(version_width);

        let dim = Style::default().fg(HEADER_TEXT).add_modifier(Modifier::DIM);
        let line = Line::from(vec![
            Span::styled(text, text_style),
            Span::styled(" ".repeat(padding), dim),
            Span::styled(version, dim),
        ]);

        Paragraph::new(line).alignment(Alignment::Left).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(GLOBAL_BORDER)),
        )
    }
}

fn hints(route: Route) -> &'static str {
    match route {
        Route::List => {
            " ↑/↓: Select │ Enter: View │ n: New │ e: Edit │ d: Delete │ r: Refresh │ q: Quit"
        }
        Route::Detail(_) => " e: Edit │ d: Delete │ r: Reload │ Esc: Back │ q: Quit",
        Route::New | Route::Edit(_) => {
            " Enter/Ctrl+S: Save │ Tab: Next field │ ←/→: State │ Esc: Cancel"
        }
        Route::Delete(_) => " y: Delete │ n/Esc: Cancel",
    }
}
