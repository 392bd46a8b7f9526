//! Model-View-Intent (MVI) primitives.
//!
//! Shared by the entity store and the editor form so that every state
//! transition in the crate is a pure reducer call.
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ View
//!    ↑                              │
//!    └──────────────────────────────┘
//! ```

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::State;
