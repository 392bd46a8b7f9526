//! Create/edit form and submission planning.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use thiserror::Error;

use crate::model::{Entity, PatchError, Sales, SalesPatch};
use crate::ui::form::{FormField, FormState};
use crate::ui::route::Route;
use crate::ui::theme::{ACCENT, ACTIVE_HIGHLIGHT, GLOBAL_BORDER, HEADER_TEXT, MUTED_TEXT, STATUS_ERROR};

use super::placeholder;

/// The write an editor submit resolves to.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Create(Sales),
    Update(Sales),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] PatchError),

    #[error("The record is not loaded yet")]
    EntityNotLoaded,

    #[error("Nothing to save on this view")]
    NotAnEditor,
}

/// Merge `patch` over `current` and pick create or update by the merged id.
///
/// `current` must be the entity the route is editing: the empty shape for
/// `/sales/new`, the loaded record for `/sales/:id/edit`.
pub fn plan_submission(
    route: Route,
    current: &Sales,
    patch: SalesPatch,
) -> Result<Submission, SubmitError> {
    let expected = match route {
        Route::New => None,
        Route::Edit(id) => Some(id),
        _ => return Err(SubmitError::NotAnEditor),
    };
    if current.id != expected {
        return Err(SubmitError::EntityNotLoaded);
    }

    let merged = patch.apply(current);
    Ok(if merged.is_new() {
        Submission::Create(merged)
    } else {
        Submission::Update(merged)
    })
}

pub fn render(frame: &mut Frame<'_>, area: Rect, route: Route, form: &FormState, updating: bool) {
    let block = Block::default()
        .title(format!(" {} ", route.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(GLOBAL_BORDER));

    if !form.seeded {
        frame.render_widget(placeholder("Loading...").block(block), area);
        return;
    }

    let mut lines = vec![Line::from("")];
    for field in FormField::ALL {
        lines.push(field_line(form, field));
    }
    lines.push(Line::from(""));

    if let Err(err) = form.to_patch() {
        lines.push(Line::styled(
            format!("  {}", err),
            Style::default().fg(STATUS_ERROR),
        ));
    }

    let status = if updating {
        "  Saving..."
    } else {
        "  Enter: save   Tab: next field   ←/→: change state"
    };
    lines.push(Line::styled(status, Style::default().fg(MUTED_TEXT)));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn field_line(form: &FormState, field: FormField) -> Line<'static> {
    let focused = form.focused == field;
    let label_style = Style::default().fg(ACCENT).add_modifier(Modifier::BOLD);
    let mut value_style = Style::default().fg(HEADER_TEXT);
    if focused {
        value_style = value_style.bg(ACTIVE_HIGHLIGHT);
    }

    let value = match field {
        FormField::Description => form.description.clone(),
        FormField::Date => form.date.clone(),
        FormField::State => match form.state {
            Some(state) => format!("< {} >", state),
            None => "< unset >".to_string(),
        },
    };
    let cursor = if focused && field != FormField::State { "_" } else { "" };
    let marker = if focused { "> " } else { "  " };

    Line::from(vec![
        Span::styled(marker, label_style),
        Span::styled(format!("{:<12}", field.label()), label_style),
        Span::styled(format!("{}{}", value, cursor), value_style),
    ])
}
