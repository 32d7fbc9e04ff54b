//! Base trait for published state.

/// Marker trait for state objects.
///
/// States are cloned into snapshots for subscribers and compared to skip
/// notifying them when an intent changed nothing.
pub trait UiState: Clone + PartialEq + Default + Send + Sync + 'static {}
