//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod fake_api;
pub mod mock_backend;

use chrono::NaiveDate;
use reqwest::Client;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

use salesdesk::api::RestClient;
use salesdesk::cancel::CancelToken;
use salesdesk::model::{Sales, SalesId, SalesState};
use salesdesk::server::{ResourceServer, SalesRepository};
use salesdesk::store::{EntityState, EntityStore};

pub const WAIT: Duration = Duration::from_secs(5);

pub fn sales(id: Option<SalesId>, description: &str, state: SalesState, date: (i32, u32, u32)) -> Sales {
    Sales {
        id,
        description: Some(description.to_string()),
        state: Some(state),
        date: NaiveDate::from_ymd_opt(date.0, date.1, date.2),
    }
}

/// `{1, "Order A", IN_CHARGE, 2020-01-01}` without its id.
pub fn order_a() -> Sales {
    sales(None, "Order A", SalesState::InCharge, (2020, 1, 1))
}

pub fn rest_client(base_url: &str) -> RestClient<Sales> {
    RestClient::with_client(Client::new(), base_url, "/api")
}

pub fn rest_store(base_url: &str) -> EntityStore<Sales> {
    EntityStore::new(Arc::new(rest_client(base_url)))
}

/// Wait until the store snapshot satisfies `pred`, then return it.
pub async fn wait_for_state<F>(store: &EntityStore<Sales>, mut pred: F) -> EntityState<Sales>
where
    F: FnMut(&EntityState<Sales>) -> bool,
{
    let mut rx = store.subscribe();
    tokio::time::timeout(WAIT, async move {
        let state = rx.wait_for(|s| pred(s)).await.expect("store dropped");
        state.clone()
    })
    .await
    .expect("timed out waiting for store state")
}

/// A running reference server. Stops when dropped.
pub struct RunningServer {
    pub base_url: String,
    pub repo: Arc<SalesRepository>,
    shutdown: CancelToken,
}

impl Drop for RunningServer {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

pub async fn start_server(repo: SalesRepository) -> RunningServer {
    let repo = Arc::new(repo);
    let server = ResourceServer::bind("127.0.0.1:0", Arc::clone(&repo))
        .await
        .expect("Failed to bind reference server");
    let base_url = server.base_url();
    let shutdown = CancelToken::new();
    tokio::spawn(server.run(shutdown.clone()));
    RunningServer {
        base_url,
        repo,
        shutdown,
    }
}

/// Write `content` to a config file in a fresh temp dir.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}
