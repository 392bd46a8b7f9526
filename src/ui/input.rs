use crate::ui::app::App;
use crate::ui::form::FormIntent;
use crate::model::SalesId;
use crate::ui::route::Route;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Route a key press to the current view.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if is_ctrl_char(key, 'c') || is_ctrl_char(key, 'q') {
        app.request_quit();
        return;
    }

    match app.route() {
        Route::List => handle_list_key(app, key),
        Route::Detail(id) => handle_detail_key(app, id, key),
        Route::New | Route::Edit(_) => handle_editor_key(app, key),
        Route::Delete(id) => handle_delete_key(app, id, key),
    }
}

fn handle_list_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.move_selection(-1),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection(1),
        KeyCode::PageUp => app.move_selection(-10),
        KeyCode::PageDown => app.move_selection(10),
        KeyCode::Char('n') => app.navigate(Route::New),
        KeyCode::Char('r') => app.navigate(Route::List),
        KeyCode::Char('q') | KeyCode::Esc => app.request_quit(),
        KeyCode::Enter => {
            if let Some(id) = app.selected_id() {
                app.navigate(Route::Detail(id));
            }
        }
        KeyCode::Char('e') => {
            if let Some(id) = app.selected_id() {
                app.navigate(Route::Edit(id));
            }
        }
        KeyCode::Char('d') => {
            if let Some(id) = app.selected_id() {
                app.navigate(Route::Delete(id));
            }
        }
        _ => {}
    }
}

fn handle_detail_key(app: &mut App, id: SalesId, key: KeyEvent) {
    match key.code {
        KeyCode::Char('e') => app.navigate(Route::Edit(id)),
        KeyCode::Char('d') => app.navigate(Route::Delete(id)),
        KeyCode::Char('r') => app.navigate(Route::Detail(id)),
        KeyCode::Char('q') => app.request_quit(),
        KeyCode::Esc | KeyCode::Backspace => app.navigate(Route::List),
        _ => {}
    }
}

fn handle_editor_key(app: &mut App, key: KeyEvent) {
    if is_ctrl_char(key, 's') {
        app.submit();
        return;
    }

    match key.code {
        KeyCode::Esc => {
            let back = match app.route() {
                Route::Edit(id) => Route::Detail(id),
                _ => Route::List,
            };
            app.navigate(back);
        }
        KeyCode::Enter => app.submit(),
        KeyCode::Tab | KeyCode::Down => app.dispatch_form(FormIntent::FocusNext),
        KeyCode::BackTab | KeyCode::Up => app.dispatch_form(FormIntent::FocusPrev),
        KeyCode::Left => app.dispatch_form(FormIntent::CycleState { forward: false }),
        KeyCode::Right => app.dispatch_form(FormIntent::CycleState { forward: true }),
        KeyCode::Backspace => app.dispatch_form(FormIntent::Backspace),
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.dispatch_form(FormIntent::Input(ch))
        }
        _ => {}
    }
}

fn handle_delete_key(app: &mut App, id: SalesId, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => app.confirm_delete(),
        KeyCode::Char('n') | KeyCode::Esc => app.navigate(Route::Detail(id)),
        _ => {}
    }
}

fn is_ctrl_char(key: KeyEvent, needle: char) -> bool {
    matches!(key.code, KeyCode::Char(ch) if ch.eq_ignore_ascii_case(&needle))
        && key.modifiers.contains(KeyModifiers::CONTROL)
}
