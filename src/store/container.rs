use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;

use crate::api::{ApiError, ResourceApi};
use crate::cancel::CancelToken;
use crate::model::Entity;
use crate::mvi::Reducer;

use super::intent::{EntityIntent, WriteKind, WriteOutcome};
use super::reducer::EntityReducer;
use super::state::{EntityState, Ticket};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Operation cancelled")]
    Cancelled,
}

impl StoreError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, StoreError::Cancelled)
    }
}

struct StoreInner<E: Entity> {
    api: Arc<dyn ResourceApi<E>>,
    state: watch::Sender<EntityState<E>>,
    tickets: AtomicU64,
}

/// Client-side cache of one remote resource.
///
/// Cloning is cheap and every clone shares the same snapshot. Each
/// operation applies its "requested" transition before returning, then
/// hands back a `'static` future that performs the call and applies the
/// completion. The future must be driven (usually spawned); dropping it
/// releases the operation as failed.
pub struct EntityStore<E: Entity> {
    inner: Arc<StoreInner<E>>,
}

impl<E: Entity> Clone for EntityStore<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<E: Entity> EntityStore<E> {
    pub fn new(api: Arc<dyn ResourceApi<E>>) -> Self {
        let (state, _) = watch::channel(EntityState::default());
        Self {
            inner: Arc::new(StoreInner {
                api,
                state,
                tickets: AtomicU64::new(0),
            }),
        }
    }

    pub fn snapshot(&self) -> EntityState<E> {
        self.inner.state.borrow().clone()
    }

    /// Receiver notified after every applied intent.
    pub fn subscribe(&self) -> watch::Receiver<EntityState<E>> {
        self.inner.state.subscribe()
    }

    /// Load the whole collection into `entities`.
    pub fn get_all(
        &self,
        scope: &CancelToken,
    ) -> impl Future<Output = Result<Vec<E>, StoreError>> + Send + 'static {
        let pending = self.pending(|ticket| EntityIntent::ListRequested { ticket });
        let api = Arc::clone(&self.inner.api);
        let scope = scope.clone();
        tracing::debug!(resource = E::RESOURCE, ticket = pending.ticket, "List requested");

        async move {
            let entities = pending.run(&scope, api.list()).await?;
            tracing::debug!(
                resource = E::RESOURCE,
                ticket = pending.ticket,
                count = entities.len(),
                "List loaded"
            );
            let loaded = entities.clone();
            pending.complete(|ticket| EntityIntent::ListLoaded {
                ticket,
                entities: loaded,
            });
            Ok(entities)
        }
    }

    /// Load one entity into `entity`. A failure leaves `entity` unchanged.
    pub fn get_one(
        &self,
        id: E::Id,
        scope: &CancelToken,
    ) -> impl Future<Output = Result<E, StoreError>> + Send + 'static {
        let pending = self.pending(|ticket| EntityIntent::EntityRequested { ticket });
        let api = Arc::clone(&self.inner.api);
        let scope = scope.clone();
        tracing::debug!(resource = E::RESOURCE, ticket = pending.ticket, id = %id, "Entity requested");

        async move {
            let entity = pending.run(&scope, api.get(id)).await?;
            let loaded = entity.clone();
            pending.complete(|ticket| EntityIntent::EntityLoaded {
                ticket,
                entity: loaded,
            });
            Ok(entity)
        }
    }

    pub fn create(
        &self,
        entity: E,
        scope: &CancelToken,
    ) -> impl Future<Output = Result<E, StoreError>> + Send + 'static {
        let pending = self.pending(|ticket| EntityIntent::WriteRequested {
            ticket,
            kind: WriteKind::Create,
        });
        let api = Arc::clone(&self.inner.api);
        let scope = scope.clone();
        tracing::info!(resource = E::RESOURCE, ticket = pending.ticket, "Create requested");

        async move {
            let saved = pending.run(&scope, api.create(&entity)).await?;
            tracing::info!(resource = E::RESOURCE, id = ?saved.id(), "Created");
            let outcome = WriteOutcome::Saved(saved.clone());
            pending.complete(|ticket| EntityIntent::WriteSucceeded { ticket, outcome });
            Ok(saved)
        }
    }

    pub fn update(
        &self,
        entity: E,
        scope: &CancelToken,
    ) -> impl Future<Output = Result<E, StoreError>> + Send + 'static {
        let pending = self.pending(|ticket| EntityIntent::WriteRequested {
            ticket,
            kind: WriteKind::Update,
        });
        let api = Arc::clone(&self.inner.api);
        let scope = scope.clone();
        tracing::info!(
            resource = E::RESOURCE,
            ticket = pending.ticket,
            id = ?entity.id(),
            "Update requested"
        );

        async move {
            let saved = pending.run(&scope, api.update(&entity)).await?;
            let outcome = WriteOutcome::Saved(saved.clone());
            pending.complete(|ticket| EntityIntent::WriteSucceeded { ticket, outcome });
            Ok(saved)
        }
    }

    /// Delete by id. `entities` is left for the next list fetch.
    pub fn delete(
        &self,
        id: E::Id,
        scope: &CancelToken,
    ) -> impl Future<Output = Result<(), StoreError>> + Send + 'static {
        let pending = self.pending(|ticket| EntityIntent::WriteRequested {
            ticket,
            kind: WriteKind::Delete,
        });
        let api = Arc::clone(&self.inner.api);
        let scope = scope.clone();
        tracing::info!(resource = E::RESOURCE, ticket = pending.ticket, id = %id, "Delete requested");

        async move {
            pending.run(&scope, api.remove(id)).await?;
            pending.complete(|ticket| EntityIntent::WriteSucceeded {
                ticket,
                outcome: WriteOutcome::Deleted(id),
            });
            Ok(())
        }
    }

    /// Clear `entity` to the empty shape. Any get-by-id still in flight
    /// can no longer overwrite it.
    pub fn reset(&self) {
        let ticket = self.begin(|ticket| EntityIntent::Reset { ticket });
        tracing::debug!(resource = E::RESOURCE, ticket, "Entity reset");
    }

    /// Issue a ticket and apply the intent built from it, atomically.
    fn begin(&self, make: impl FnOnce(Ticket) -> EntityIntent<E>) -> Ticket {
        let mut issued = 0;
        self.inner.state.send_modify(|state| {
            let ticket = self.inner.tickets.fetch_add(1, Ordering::SeqCst) + 1;
            issued = ticket;
            *state = EntityReducer::<E>::reduce(std::mem::take(state), make(ticket));
        });
        issued
    }

    fn pending(&self, make: impl FnOnce(Ticket) -> EntityIntent<E>) -> Pending<E> {
        Pending {
            ticket: self.begin(make),
            store: self.clone(),
            armed: true,
        }
    }

    fn dispatch(&self, intent: EntityIntent<E>) {
        self.inner.state.send_modify(|state| {
            *state = EntityReducer::<E>::reduce(std::mem::take(state), intent);
        });
    }
}

/// An issued operation that has not completed yet.
///
/// Dropped without [`complete`](Pending::complete), it releases its
/// track with `Failed`.
struct Pending<E: Entity> {
    ticket: Ticket,
    store: EntityStore<E>,
    armed: bool,
}

impl<E: Entity> Pending<E> {
    async fn run<T>(
        &self,
        scope: &CancelToken,
        call: impl Future<Output = Result<T, ApiError>>,
    ) -> Result<T, StoreError> {
        let result = tokio::select! {
            biased;
            _ = scope.cancelled() => Err(StoreError::Cancelled),
            result = call => result.map_err(StoreError::from),
        };

        let result = match result {
            Ok(_) if scope.is_cancelled() => Err(StoreError::Cancelled),
            other => other,
        };

        match &result {
            Err(StoreError::Cancelled) => {
                tracing::debug!(resource = E::RESOURCE, ticket = self.ticket, "Operation cancelled");
            }
            Err(StoreError::Api(err)) => {
                tracing::warn!(
                    resource = E::RESOURCE,
                    ticket = self.ticket,
                    kind = err.kind(),
                    error = %err,
                    "Operation failed"
                );
            }
            Ok(_) => {}
        }
        result
    }

    fn complete(mut self, make: impl FnOnce(Ticket) -> EntityIntent<E>) {
        self.armed = false;
        self.store.dispatch(make(self.ticket));
    }
}

impl<E: Entity> Drop for Pending<E> {
    fn drop(&mut self) {
        if self.armed {
            self.store.dispatch(EntityIntent::Failed {
                ticket: self.ticket,
            });
        }
    }
}
