//! Remote resource client.
//!
//! [`ResourceApi`] is the seam the store talks to: one method per REST verb.
//! [`RestClient`] implements it over HTTP; tests substitute in-memory fakes.

mod client;
mod error;

pub use client::RestClient;
pub use error::ApiError;

use async_trait::async_trait;

use crate::model::Entity;

#[async_trait]
pub trait ResourceApi<E: Entity>: Send + Sync {
    /// Fetch the whole collection.
    async fn list(&self) -> Result<Vec<E>, ApiError>;

    /// Fetch one entity; `NotFound` if the id does not exist.
    async fn get(&self, id: E::Id) -> Result<E, ApiError>;

    /// Create a new entity. It must not carry an id; the returned
    /// representation carries the server-assigned one.
    async fn create(&self, entity: &E) -> Result<E, ApiError>;

    /// Replace an existing entity identified by its id.
    async fn update(&self, entity: &E) -> Result<E, ApiError>;

    /// Delete by id. Repeating a delete reports `NotFound`.
    async fn remove(&self, id: E::Id) -> Result<(), ApiError>;
}
