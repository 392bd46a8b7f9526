//! Scripted HTTP server for exercising the REST client.
//!
//! Every request is recorded, then answered with the next queued
//! [`MockResponse`] (an empty JSON array when the queue is empty).

#![allow(dead_code)]

use axum::body::{to_bytes, Bytes};
use axum::extract::{Request, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::Router;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use salesdesk::cancel::CancelToken;

const MAX_CAPTURED_BODY: usize = 1024 * 1024;

#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub body: Vec<u8>,
}

impl CapturedRequest {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("request body is not JSON")
    }
}

#[derive(Debug, Clone)]
pub struct MockResponse {
    status: StatusCode,
    json: bool,
    body: Bytes,
    delay: Duration,
}

impl Default for MockResponse {
    fn default() -> Self {
        Self::json("[]")
    }
}

impl MockResponse {
    pub fn json(body: &str) -> Self {
        Self {
            status: StatusCode::OK,
            json: true,
            body: Bytes::copy_from_slice(body.as_bytes()),
            delay: Duration::ZERO,
        }
    }

    /// JSON error envelope in the shape the reference server uses.
    pub fn error(status: u16, message: &str) -> Self {
        let body = serde_json::json!({ "error": { "type": "mock", "message": message } });
        Self {
            status: status_code(status),
            ..Self::json(&body.to_string())
        }
    }

    /// Status with no body, e.g. 204 or a bare 404.
    pub fn empty(status: u16) -> Self {
        Self {
            status: status_code(status),
            json: false,
            body: Bytes::new(),
            delay: Duration::ZERO,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status_code(status);
        self
    }

    pub fn with_delay(mut self, ms: u64) -> Self {
        self.delay = Duration::from_millis(ms);
        self
    }
}

impl IntoResponse for MockResponse {
    fn into_response(self) -> Response {
        if self.json {
            (self.status, [(header::CONTENT_TYPE, "application/json")], self.body).into_response()
        } else {
            (self.status, self.body).into_response()
        }
    }
}

fn status_code(status: u16) -> StatusCode {
    StatusCode::from_u16(status).expect("invalid scripted status")
}

#[derive(Default)]
struct Script {
    requests: Mutex<Vec<CapturedRequest>>,
    responses: Mutex<VecDeque<MockResponse>>,
}

pub struct MockBackend {
    pub addr: SocketAddr,
    script: Arc<Script>,
    shutdown: CancelToken,
}

impl MockBackend {
    pub async fn start() -> Self {
        let script = Arc::new(Script::default());
        let app = Router::new()
            .route("/{*path}", any(answer))
            .with_state(Arc::clone(&script));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock server");
        let addr = listener.local_addr().expect("mock server address");

        let shutdown = CancelToken::new();
        let stop = shutdown.clone();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app)
                .with_graceful_shutdown(async move { stop.cancelled().await })
                .await;
        });

        Self {
            addr,
            script,
            shutdown,
        }
    }

    pub async fn enqueue_response(&self, response: MockResponse) {
        self.script.responses.lock().push_back(response);
    }

    pub async fn captured_requests(&self) -> Vec<CapturedRequest> {
        self.script.requests.lock().clone()
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn answer(State(script): State<Arc<Script>>, request: Request) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let body = to_bytes(request.into_body(), MAX_CAPTURED_BODY)
        .await
        .map(|bytes| bytes.to_vec())
        .unwrap_or_default();
    script
        .requests
        .lock()
        .push(CapturedRequest { method, path, body });

    let response = script.responses.lock().pop_front().unwrap_or_default();
    if !response.delay.is_zero() {
        tokio::time::sleep(response.delay).await;
    }
    response.into_response()
}
