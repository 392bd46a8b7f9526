//! Base trait for intents.

/// Marker trait for intent objects.
///
/// Intents are either user actions (key presses, form submits) or
/// completions of remote calls. Reducers turn them into new states.
pub trait Intent: Send + 'static {}
