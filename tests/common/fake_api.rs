//! In-memory `ResourceApi` with gates for controlling completion order.

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use tokio::sync::oneshot;

use salesdesk::api::{ApiError, ResourceApi};
use salesdesk::model::{Sales, SalesId};
use salesdesk::server::SalesRepository;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List,
    Get(SalesId),
    Create(Sales),
    Update(Sales),
    Remove(SalesId),
}

/// Releases one held call when dropped or released.
pub struct Gate(oneshot::Sender<()>);

impl Gate {
    pub fn release(self) {
        let _ = self.0.send(());
    }
}

#[derive(Default)]
pub struct FakeApi {
    pub repo: SalesRepository,
    calls: Mutex<Vec<Call>>,
    gates: Mutex<VecDeque<oneshot::Receiver<()>>>,
    failures: Mutex<VecDeque<u16>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: impl IntoIterator<Item = Sales>) -> Self {
        let api = Self::new();
        for row in rows {
            api.repo.insert(row);
        }
        api
    }

    /// The next call waits until the returned gate is released. The answer
    /// is computed from the repository at release time.
    pub fn hold_next(&self) -> Gate {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().push_back(rx);
        Gate(tx)
    }

    /// The next call fails with a server error of `status`.
    pub fn fail_next(&self, status: u16) {
        self.failures.lock().push_back(status);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    async fn enter(&self, call: Call) -> Result<(), ApiError> {
        self.calls.lock().push(call);
        let gate = self.gates.lock().pop_front();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        match self.failures.lock().pop_front() {
            Some(status) => Err(ApiError::Server {
                status,
                message: "scripted failure".into(),
            }),
            None => Ok(()),
        }
    }
}

fn not_found(id: SalesId) -> ApiError {
    ApiError::NotFound {
        resource: "sales",
        id: id.to_string(),
    }
}

#[async_trait]
impl ResourceApi<Sales> for FakeApi {
    async fn list(&self) -> Result<Vec<Sales>, ApiError> {
        self.enter(Call::List).await?;
        Ok(self.repo.find_all())
    }

    async fn get(&self, id: SalesId) -> Result<Sales, ApiError> {
        self.enter(Call::Get(id)).await?;
        self.repo.find_by_id(id).ok_or_else(|| not_found(id))
    }

    async fn create(&self, entity: &Sales) -> Result<Sales, ApiError> {
        self.enter(Call::Create(entity.clone())).await?;
        if entity.id.is_some() {
            return Err(ApiError::InvalidRequest("id supplied on create".into()));
        }
        Ok(self.repo.insert(entity.clone()))
    }

    async fn update(&self, entity: &Sales) -> Result<Sales, ApiError> {
        self.enter(Call::Update(entity.clone())).await?;
        let id = entity
            .id
            .ok_or_else(|| ApiError::InvalidRequest("missing id".into()))?;
        self.repo.replace(entity.clone()).ok_or_else(|| not_found(id))
    }

    async fn remove(&self, id: SalesId) -> Result<(), ApiError> {
        self.enter(Call::Remove(id)).await?;
        if self.repo.delete_by_id(id) {
            Ok(())
        } else {
            Err(not_found(id))
        }
    }
}
