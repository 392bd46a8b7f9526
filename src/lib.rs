//! Terminal front-end for the Sales REST resource.
//!
//! The crate is layered leaf-first: [`model`] describes the entity,
//! [`api`] talks to the remote resource, [`store`] keeps the client-side
//! snapshot consistent with it, and [`ui`] renders views over that snapshot.
//! [`server`] is an in-memory implementation of the same REST contract used
//! for local runs and tests.

pub mod api;
pub mod cancel;
pub mod cli;
pub mod config;
pub mod logging;
pub mod model;
pub mod mvi;
pub mod server;
pub mod store;
pub mod ui;
