use crossterm::event::{self, Event, KeyEvent};
use std::thread;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::UnboundedSender;

use crate::cancel::CancelToken;

pub enum AppEvent {
    Key(KeyEvent),
    Resize(u16, u16),
    Tick,
    /// A spawned store operation failed (not cancelled).
    OperationFailed(String),
}

/// Blocking thread that polls the terminal and forwards events.
pub struct InputThread {
    handle: thread::JoinHandle<()>,
    shutdown: CancelToken,
}

impl InputThread {
    /// The thread exits when `shutdown` is cancelled or the receiver is gone.
    pub fn spawn(tick_rate: Duration, tx: UnboundedSender<AppEvent>, shutdown: CancelToken) -> Self {
        let handle = poll_loop(tick_rate, tx, shutdown.clone());
        Self { handle, shutdown }
    }

    /// Cancel the shutdown token and join the thread. Returns whether the
    /// thread exited without panicking.
    pub async fn stop(self) -> bool {
        self.shutdown.cancel();
        let handle = self.handle;
        matches!(tokio::task::spawn_blocking(move || handle.join()).await, Ok(Ok(())))
    }
}

fn poll_loop(
    tick_rate: Duration,
    tx: UnboundedSender<AppEvent>,
    shutdown: CancelToken,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let mut last_tick = Instant::now();
        loop {
            if shutdown.is_cancelled() {
                break;
            }

            // Short poll so the shutdown flag is checked often.
            let timeout = tick_rate
                .saturating_sub(last_tick.elapsed())
                .min(Duration::from_millis(50));

            match event::poll(timeout) {
                Ok(true) => {
                    let forwarded = match event::read() {
                        Ok(Event::Key(key)) => tx.send(AppEvent::Key(key)),
                        Ok(Event::Resize(cols, rows)) => tx.send(AppEvent::Resize(cols, rows)),
                        Ok(_) => Ok(()),
                        Err(err) => {
                            tracing::error!(error = %err, "Failed to read terminal event");
                            break;
                        }
                    };
                    if forwarded.is_err() {
                        break;
                    }
                }
                Ok(false) => {}
                Err(err) => {
                    tracing::error!(error = %err, "Failed to poll terminal events");
                    break;
                }
            }

            if last_tick.elapsed() >= tick_rate {
                if tx.send(AppEvent::Tick).is_err() {
                    break;
                }
                last_tick = Instant::now();
            }
        }
        tracing::debug!("Input thread stopped");
    })
}
