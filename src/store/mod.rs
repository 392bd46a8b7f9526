//! Entity store.
//!
//! [`EntityStore`] wraps a [`ResourceApi`](crate::api::ResourceApi) and
//! exposes an observable [`EntityState`] snapshot. All transitions go
//! through [`EntityReducer`]; stale completions are discarded by ticket.

mod container;
mod intent;
mod reducer;
mod state;

pub use container::{EntityStore, StoreError};
pub use intent::{EntityIntent, WriteKind, WriteOutcome};
pub use reducer::EntityReducer;
pub use state::{EntityState, StoreStatus, Ticket};
