use crate::ui::app::App;
use crate::ui::footer::Footer;
use crate::ui::header::Header;
use crate::ui::layout::layout_regions;
use crate::ui::route::Route;
use crate::ui::views::{delete, detail, editor, list};
use ratatui::widgets::Clear;
use ratatui::Frame;

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();
    let (header, body, footer) = layout_regions(area);
    let snapshot = app.snapshot();

    frame.render_widget(Header::new().widget(app.route(), snapshot.status()), header);
    frame.render_widget(Clear, body);

    match app.route() {
        Route::List => list::render(
            frame,
            body,
            &snapshot.entities,
            app.selection(),
            snapshot.loading,
            app.date_format(),
        ),
        Route::Detail(id) => detail::render(
            frame,
            body,
            id,
            &snapshot.entity,
            snapshot.loading,
            app.date_format(),
        ),
        route @ (Route::New | Route::Edit(_)) => {
            editor::render(frame, body, route, app.form(), snapshot.updating)
        }
        Route::Delete(id) => delete::render(
            frame,
            body,
            id,
            &snapshot.entity,
            snapshot.updating,
            app.date_format(),
        ),
    }

    frame.render_widget(
        Footer::new().widget(footer, app.route(), app.notice()),
        footer,
    );
}
