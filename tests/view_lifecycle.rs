mod common;

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use tokio::sync::{mpsc, watch};

use common::fake_api::{Call, FakeApi};
use common::{order_a, sales, WAIT};
use salesdesk::api::ResourceApi;
use salesdesk::config::UiConfig;
use salesdesk::model::{Sales, SalesState};
use salesdesk::store::{EntityState, EntityStore};
use salesdesk::ui::app::{App, NoticeLevel};
use salesdesk::ui::events::AppEvent;
use salesdesk::ui::input::handle_key;
use salesdesk::ui::render::draw;
use salesdesk::ui::Route;

struct Harness {
    app: App,
    api: Arc<FakeApi>,
    store: EntityStore<Sales>,
    events: mpsc::UnboundedReceiver<AppEvent>,
    changes: watch::Receiver<EntityState<Sales>>,
}

impl Harness {
    fn new(api: FakeApi) -> Self {
        let api = Arc::new(api);
        let dyn_api: Arc<dyn ResourceApi<Sales>> = api.clone();
        let store = EntityStore::new(dyn_api);
        let (tx, events) = mpsc::unbounded_channel();
        let changes = store.subscribe();
        let app = App::new(store.clone(), tx, &UiConfig::default());
        Self {
            app,
            api,
            store,
            events,
            changes,
        }
    }

    fn press(&mut self, code: KeyCode) {
        handle_key(&mut self.app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(&mut self, text: &str) {
        for ch in text.chars() {
            self.press(KeyCode::Char(ch));
        }
    }

    /// Feed store changes and failure events into the app until `pred` holds.
    async fn drive_until(&mut self, pred: impl Fn(&App) -> bool) {
        let Self {
            app,
            events,
            changes,
            ..
        } = self;
        tokio::time::timeout(WAIT, async {
            loop {
                while let Ok(event) = events.try_recv() {
                    if let AppEvent::OperationFailed(message) = event {
                        app.on_operation_failed(message);
                    }
                }
                app.sync();
                if pred(&*app) {
                    return;
                }
                tokio::select! {
                    _ = changes.changed() => {}
                    _ = tokio::time::sleep(Duration::from_millis(10)) => {}
                }
            }
        })
        .await
        .expect("timed out driving the app");
    }

    async fn wait_for_call(&self, call: Call) {
        tokio::time::timeout(WAIT, async {
            while !self.api.calls().contains(&call) {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("timed out waiting for api call");
    }

    fn render(&self) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal.draw(|frame| draw(frame, &self.app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn writes(&self) -> Vec<Call> {
        self.api
            .calls()
            .into_iter()
            .filter(|c| matches!(c, Call::Create(_) | Call::Update(_) | Call::Remove(_)))
            .collect()
    }
}

fn five_rows() -> FakeApi {
    FakeApi::with_rows(
        (1..=5).map(|n| sales(None, &format!("Order {n}"), SalesState::InCharge, (2020, 1, n))),
    )
}

#[tokio::test]
async fn list_renders_row_fields() {
    let mut h = Harness::new(FakeApi::with_rows([order_a()]));
    h.app.navigate(Route::List);
    h.drive_until(|app| !app.snapshot().loading && app.snapshot().entities.len() == 1)
        .await;

    let screen = h.render();
    assert!(screen.contains("Order A"));
    assert!(screen.contains("IN_CHARGE"));
    assert!(screen.contains("2020-01-01"));
    assert_eq!(h.app.selected_id(), Some(1));
}

#[tokio::test]
async fn empty_list_shows_hint() {
    let mut h = Harness::new(FakeApi::new());
    h.app.navigate(Route::List);
    h.drive_until(|app| !app.snapshot().loading).await;
    assert!(h.render().contains("No sales yet"));
}

#[tokio::test]
async fn new_editor_creates_and_returns_to_list() {
    let mut h = Harness::new(FakeApi::with_rows([order_a()]));
    h.app.navigate(Route::New);
    assert!(h.app.form().seeded);

    h.type_text("Order B");
    h.press(KeyCode::Tab);
    h.press(KeyCode::Right);
    h.press(KeyCode::Right);
    h.press(KeyCode::Tab);
    h.type_text("2020-02-02");
    h.press(KeyCode::Enter);

    h.drive_until(|app| app.route() == Route::List).await;

    assert_eq!(
        h.writes(),
        vec![Call::Create(sales(
            None,
            "Order B",
            SalesState::Shipped,
            (2020, 2, 2)
        ))]
    );
    assert_eq!(h.store.snapshot().entity.id, Some(2));
    let notice = h.app.notice().expect("saved notice");
    assert_eq!(notice.level, NoticeLevel::Info);
    assert!(notice.message.contains("#2"));

    h.drive_until(|app| app.snapshot().entities.len() == 2).await;
}

#[tokio::test]
async fn edit_editor_seeds_form_and_updates_same_id() {
    let mut h = Harness::new(FakeApi::with_rows([order_a()]));
    h.app.navigate(Route::Edit(1));
    h.drive_until(|app| app.form().seeded).await;
    assert_eq!(h.app.form().description, "Order A");
    assert_eq!(h.app.form().date, "2020-01-01");

    h.press(KeyCode::Backspace);
    h.type_text("Z");
    h.press(KeyCode::Enter);
    h.drive_until(|app| app.route() == Route::List).await;

    assert_eq!(
        h.writes(),
        vec![Call::Update(sales(
            Some(1),
            "Order Z",
            SalesState::InCharge,
            (2020, 1, 1)
        ))]
    );
    assert_eq!(
        h.api.repo.find_by_id(1).and_then(|s| s.description),
        Some("Order Z".to_string())
    );
}

#[tokio::test]
async fn edit_of_missing_record_never_writes() {
    let mut h = Harness::new(FakeApi::new());
    h.app.navigate(Route::Edit(99));
    h.drive_until(|app| app.notice().is_some()).await;
    assert!(!h.app.form().seeded);

    h.app.submit();
    assert_eq!(h.app.route(), Route::Edit(99));
    assert!(h.writes().is_empty());
}

#[tokio::test]
async fn failed_edit_refetch_keeps_form_unseeded() {
    let mut h = Harness::new(FakeApi::with_rows([order_a()]));
    h.app.navigate(Route::Detail(1));
    h.drive_until(|app| app.snapshot().entity.id == Some(1) && !app.snapshot().loading)
        .await;

    h.api.fail_next(500);
    h.app.navigate(Route::Edit(1));
    h.drive_until(|app| app.notice().is_some() && !app.snapshot().loading)
        .await;

    assert_eq!(h.app.snapshot().entity.id, Some(1));
    assert!(!h.app.form().seeded);
    h.type_text("x");
    h.press(KeyCode::Enter);
    assert_eq!(h.app.route(), Route::Edit(1));
    assert!(h.writes().is_empty());
    assert!(h.render().contains("Loading..."));
}

#[tokio::test]
async fn invalid_date_blocks_submit() {
    let mut h = Harness::new(FakeApi::new());
    h.app.navigate(Route::New);
    h.type_text("Order");
    h.press(KeyCode::BackTab);
    h.type_text("2020-13");
    h.press(KeyCode::Enter);

    assert_eq!(h.app.route(), Route::New);
    assert_eq!(h.app.notice().map(|n| n.level), Some(NoticeLevel::Error));
    assert!(h.writes().is_empty());
}

#[tokio::test]
async fn double_submit_issues_one_create() {
    let mut h = Harness::new(FakeApi::new());
    let gate = h.api.hold_next();
    h.app.navigate(Route::New);
    h.type_text("Order B");
    h.press(KeyCode::Enter);
    h.press(KeyCode::Enter);
    assert!(h.app.snapshot().updating);

    gate.release();
    h.drive_until(|app| app.route() == Route::List).await;
    assert_eq!(h.writes().len(), 1);
}

#[tokio::test]
async fn failed_create_stays_on_editor_with_notice() {
    let mut h = Harness::new(FakeApi::new());
    h.api.fail_next(500);
    h.app.navigate(Route::New);
    h.type_text("Order B");
    h.press(KeyCode::Enter);

    h.drive_until(|app| app.notice().is_some() && !app.snapshot().updating)
        .await;
    assert_eq!(h.app.route(), Route::New);
    assert_eq!(h.app.form().description, "Order B");
    assert!(!h.app.snapshot().update_success);
    assert!(h.app.notice().unwrap().message.contains("500"));
}

#[tokio::test]
async fn delete_confirmation_deletes_route_id() {
    let mut h = Harness::new(five_rows());
    h.app.navigate(Route::Delete(5));
    h.drive_until(|app| app.snapshot().entity.id == Some(5)).await;
    assert!(h.render().contains("Are you sure"));

    h.press(KeyCode::Char('y'));
    h.drive_until(|app| {
        app.route() == Route::List
            && !app.snapshot().loading
            && app.snapshot().entities.len() == 4
    })
    .await;

    assert_eq!(h.writes(), vec![Call::Remove(5)]);
    assert!(h.app.snapshot().find(5).is_none());
}

#[tokio::test]
async fn declining_delete_goes_back_to_detail() {
    let mut h = Harness::new(five_rows());
    h.app.navigate(Route::Delete(2));
    h.press(KeyCode::Char('n'));
    assert_eq!(h.app.route(), Route::Detail(2));
    assert!(h.writes().is_empty());
}

#[tokio::test]
async fn detail_404_reports_and_keeps_entity() {
    let mut h = Harness::new(FakeApi::with_rows([order_a()]));
    h.app.navigate(Route::Detail(1));
    h.drive_until(|app| app.snapshot().entity.id == Some(1) && !app.snapshot().loading)
        .await;
    let loaded = h.app.snapshot().entity.clone();

    h.app.navigate(Route::Detail(99));
    h.drive_until(|app| app.notice().is_some()).await;

    let notice = h.app.notice().unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert!(notice.message.contains("not found"));
    assert_eq!(h.app.snapshot().entity, loaded);
    assert!(h.render().contains("Not loaded"));
}

#[tokio::test]
async fn leaving_a_view_cancels_its_fetch() {
    let mut h = Harness::new(FakeApi::with_rows([order_a()]));
    let _held = h.api.hold_next();
    h.app.navigate(Route::Detail(1));
    h.wait_for_call(Call::Get(1)).await;

    h.app.navigate(Route::List);
    h.drive_until(|app| !app.snapshot().loading && app.snapshot().entities.len() == 1)
        .await;

    assert_eq!(h.app.snapshot().entity, Sales::default());
    assert!(h.app.notice().is_none());
}

#[tokio::test]
async fn list_keys_navigate_to_selected_record() {
    let mut h = Harness::new(five_rows());
    h.app.navigate(Route::List);
    h.drive_until(|app| app.snapshot().entities.len() == 5).await;

    h.press(KeyCode::Down);
    h.press(KeyCode::Down);
    h.press(KeyCode::Enter);
    assert_eq!(h.app.route(), Route::Detail(3));

    h.press(KeyCode::Char('e'));
    assert_eq!(h.app.route(), Route::Edit(3));
    h.press(KeyCode::Esc);
    assert_eq!(h.app.route(), Route::Detail(3));
    h.press(KeyCode::Esc);
    assert_eq!(h.app.route(), Route::List);
}
