use std::future::Future;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::UnboundedSender;

use crate::cancel::CancelToken;
use crate::config::UiConfig;
use crate::model::{Sales, SalesId};
use crate::mvi::Reducer;
use crate::store::{EntityState, EntityStore, StoreError, Ticket};
use crate::ui::events::AppEvent;
use crate::ui::form::{FormIntent, FormReducer, FormState};
use crate::ui::route::{MountAction, Route};
use crate::ui::views::editor::{plan_submission, SubmitError, Submission};

/// Macro to dispatch an MVI intent through a reducer.
///
/// Replaces the repeated `std::mem::take` + reduce pattern.
macro_rules! dispatch_mvi {
    ($self:expr, $field:ident, $reducer:ty, $intent:expr) => {
        $self.$field = <$reducer>::reduce(std::mem::take(&mut $self.$field), $intent);
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// Transient message shown in the footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub level: NoticeLevel,
    pub expires_at: Instant,
}

/// Controller for the terminal client.
///
/// Owns the current route and the view-lifetime [`CancelToken`]. Store
/// operations are spawned on the runtime; their completions arrive as
/// snapshot changes and are picked up by [`App::sync`].
pub struct App {
    store: EntityStore<Sales>,
    events: UnboundedSender<AppEvent>,
    route: Route,
    view_scope: CancelToken,
    /// Get-by-id issued when the current view mounted.
    mount_fetch: Option<Ticket>,
    snapshot: EntityState<Sales>,
    /// `update_success` as of the previous sync, for edge detection.
    last_update_success: bool,
    selection: usize,
    form: FormState,
    notice: Option<Notice>,
    notice_ttl: Duration,
    date_format: String,
    should_quit: bool,
}

impl App {
    /// Create the app on `/sales` without mounting it; call
    /// [`navigate`](Self::navigate) to load the first view.
    pub fn new(store: EntityStore<Sales>, events: UnboundedSender<AppEvent>, ui: &UiConfig) -> Self {
        let snapshot = store.snapshot();
        Self {
            last_update_success: snapshot.update_success,
            snapshot,
            store,
            events,
            route: Route::List,
            view_scope: CancelToken::new(),
            mount_fetch: None,
            selection: 0,
            form: FormState::default(),
            notice: None,
            notice_ttl: Duration::from_secs(ui.notice_seconds),
            date_format: ui.date_format.clone(),
            should_quit: false,
        }
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn snapshot(&self) -> &EntityState<Sales> {
        &self.snapshot
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn date_format(&self) -> &str {
        &self.date_format
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    /// Cancel whatever the current view still has in flight.
    pub fn shutdown(&mut self) {
        self.view_scope.cancel();
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Unmount the current view and mount `route`.
    pub fn navigate(&mut self, route: Route) {
        self.view_scope.cancel();
        self.view_scope = CancelToken::new();
        tracing::info!(from = %self.route, to = %route, "Navigate");

        if route != Route::List {
            self.selection = 0;
        }
        self.route = route;
        dispatch_mvi!(self, form, FormReducer, FormIntent::Clear);
        self.mount_fetch = None;

        match route.mount_action() {
            MountAction::FetchAll => {
                let op = self.store.get_all(&self.view_scope);
                self.spawn_op("Loading sales failed", op);
            }
            MountAction::FetchOne(id) => {
                let op = self.store.get_one(id, &self.view_scope);
                self.mount_fetch = self.store.snapshot().fetch_ticket();
                self.spawn_op("Loading sales failed", op);
            }
            MountAction::Reset => self.store.reset(),
        }

        self.snapshot = self.store.snapshot();
        self.last_update_success = self.snapshot.update_success;
        self.sync_form();
    }

    /// Pull the latest store snapshot and react to it.
    ///
    /// An editor or delete view returns to the list when `update_success`
    /// goes from false to true.
    pub fn sync(&mut self) {
        self.snapshot = self.store.snapshot();
        let succeeded = self.snapshot.update_success && !self.last_update_success;
        self.last_update_success = self.snapshot.update_success;

        if succeeded && self.route.returns_on_success() {
            let message = match self.route {
                Route::Delete(id) => format!("Deleted sales #{}", id),
                _ => match self.snapshot.entity.id {
                    Some(id) => format!("Saved sales #{}", id),
                    None => "Saved".to_string(),
                },
            };
            self.notify(NoticeLevel::Info, message);
            self.navigate(Route::List);
            return;
        }

        self.clamp_selection();
        self.sync_form();
    }

    /// Seed the editor form once its entity is ready. An edit view only
    /// seeds from the payload of its own mount fetch.
    fn sync_form(&mut self) {
        if self.form.seeded {
            return;
        }
        let ready = match self.route {
            Route::New => self.snapshot.entity.id.is_none(),
            Route::Edit(id) => {
                self.snapshot.entity.id == Some(id)
                    && self
                        .mount_fetch
                        .is_some_and(|ticket| self.snapshot.entity_settled_by(ticket))
            }
            _ => false,
        };
        if ready {
            let entity = self.snapshot.entity.clone();
            dispatch_mvi!(self, form, FormReducer, FormIntent::Seed { entity });
        }
    }

    // ========================================================================
    // List selection
    // ========================================================================

    pub fn selection(&self) -> usize {
        self.selection
    }

    pub fn selected_id(&self) -> Option<SalesId> {
        self.snapshot
            .entities
            .get(self.selection)
            .and_then(|sales| sales.id)
    }

    pub fn move_selection(&mut self, delta: isize) {
        let len = self.snapshot.entities.len();
        if len == 0 {
            self.selection = 0;
            return;
        }
        let next = self.selection as isize + delta;
        self.selection = next.clamp(0, len as isize - 1) as usize;
    }

    fn clamp_selection(&mut self) {
        let len = self.snapshot.entities.len();
        self.selection = self.selection.min(len.saturating_sub(1));
    }

    // ========================================================================
    // Editor (MVI)
    // ========================================================================

    pub fn dispatch_form(&mut self, intent: FormIntent) {
        if !self.route.is_editor() || !self.form.seeded {
            return;
        }
        dispatch_mvi!(self, form, FormReducer, intent);
    }

    /// Validate the form and issue create or update. Ignored while a write
    /// is in flight.
    pub fn submit(&mut self) {
        if !self.route.is_editor() {
            return;
        }
        let current = self.store.snapshot();
        if current.updating {
            tracing::debug!(route = %self.route, "Submit ignored while saving");
            return;
        }
        if !self.form.seeded {
            self.notify(NoticeLevel::Error, SubmitError::EntityNotLoaded.to_string());
            return;
        }

        let planned = self
            .form
            .to_patch()
            .map_err(Into::into)
            .and_then(|patch| plan_submission(self.route, &current.entity, patch));

        match planned {
            Ok(Submission::Create(sales)) => {
                let op = self.store.create(sales, &self.view_scope);
                self.spawn_op("Create failed", op);
            }
            Ok(Submission::Update(sales)) => {
                let op = self.store.update(sales, &self.view_scope);
                self.spawn_op("Update failed", op);
            }
            Err(err) => {
                self.notify(NoticeLevel::Error, err.to_string());
                return;
            }
        }
        self.sync();
    }

    // ========================================================================
    // Delete confirmation
    // ========================================================================

    /// Delete the record named by the route.
    pub fn confirm_delete(&mut self) {
        let Route::Delete(id) = self.route else {
            return;
        };
        if self.store.snapshot().updating {
            return;
        }
        let op = self.store.delete(id, &self.view_scope);
        self.spawn_op("Delete failed", op);
        self.sync();
    }

    // ========================================================================
    // Notices
    // ========================================================================

    pub fn notify(&mut self, level: NoticeLevel, message: String) {
        self.notice = Some(Notice {
            message,
            level,
            expires_at: Instant::now() + self.notice_ttl,
        });
    }

    pub fn on_operation_failed(&mut self, message: String) {
        self.notify(NoticeLevel::Error, message);
    }

    pub fn on_tick(&mut self) {
        if self
            .notice
            .as_ref()
            .is_some_and(|notice| Instant::now() >= notice.expires_at)
        {
            self.notice = None;
        }
    }

    /// Run a store operation on the runtime. Failures other than
    /// cancellation come back as [`AppEvent::OperationFailed`].
    fn spawn_op<T, F>(&self, label: &'static str, op: F)
    where
        F: Future<Output = Result<T, StoreError>> + Send + 'static,
        T: Send + 'static,
    {
        let events = self.events.clone();
        tokio::spawn(async move {
            match op.await {
                Ok(_) => {}
                Err(err) if err.is_cancelled() => {}
                Err(err) => {
                    let _ = events.send(AppEvent::OperationFailed(format!("{}: {}", label, err)));
                }
            }
        });
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.view_scope.cancel();
    }
}
