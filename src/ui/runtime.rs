use crate::cancel::CancelToken;
use crate::config::UiConfig;
use crate::model::Sales;
use crate::store::{EntityState, EntityStore};
use crate::ui::app::App;
use crate::ui::events::{AppEvent, InputThread};
use crate::ui::input::handle_key;
use crate::ui::render::draw;
use crate::ui::route::Route;
use crate::ui::terminal_guard::setup_terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::sync::{mpsc, watch};

/// Run the terminal client until the user quits or `shutdown` fires.
///
/// The input thread is stopped and the terminal restored on every exit
/// path, including a failed draw.
pub async fn run(
    store: EntityStore<Sales>,
    ui: &UiConfig,
    initial: Route,
    shutdown: CancelToken,
) -> io::Result<()> {
    let (mut terminal, guard) = setup_terminal()?;
    let tick_rate = Duration::from_millis(ui.tick_rate_ms);
    let (tx, mut rx) = mpsc::unbounded_channel();
    let input = InputThread::spawn(tick_rate, tx.clone(), shutdown.clone());

    let mut changes = store.subscribe();
    let mut app = App::new(store, tx, ui);
    app.navigate(initial);

    let result = event_loop(&mut terminal, &mut app, &mut rx, &mut changes, &shutdown).await;
    if let Err(err) = &result {
        tracing::error!(error = %err, "Terminal loop failed");
    }

    app.shutdown();
    if !input.stop().await {
        tracing::warn!("Input thread did not stop cleanly");
    }
    drop(guard);
    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    rx: &mut mpsc::UnboundedReceiver<AppEvent>,
    changes: &mut watch::Receiver<EntityState<Sales>>,
    shutdown: &CancelToken,
) -> io::Result<()> {
    loop {
        terminal.draw(|frame| draw(frame, app))?;
        if app.should_quit() {
            return Ok(());
        }

        tokio::select! {
            _ = shutdown.cancelled() => return Ok(()),
            event = rx.recv() => match event {
                Some(AppEvent::Key(key)) => handle_key(app, key),
                Some(AppEvent::Tick) => app.on_tick(),
                // The next draw picks up the new size.
                Some(AppEvent::Resize(..)) => {}
                Some(AppEvent::OperationFailed(message)) => app.on_operation_failed(message),
                None => return Ok(()),
            },
            changed = changes.changed() => {
                if changed.is_err() {
                    return Ok(());
                }
                app.sync();
            }
        }
    }
}
