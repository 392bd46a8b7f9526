//! Terminal views over the Sales store.

pub mod app;
pub mod events;
pub mod footer;
pub mod form;
pub mod header;
pub mod input;
pub mod layout;
pub mod render;
pub mod route;
pub mod runtime;
pub mod terminal_guard;
pub mod theme;
pub mod views;

pub use app::App;
pub use route::Route;
