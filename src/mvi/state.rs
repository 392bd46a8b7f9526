//! Base trait for reducer-owned state.

/// Marker trait for state objects.
///
/// States are cloned into snapshots for rendering, compared to detect
/// changes, and start from `Default`.
pub trait State: Clone + PartialEq + Default + Send + 'static {}
