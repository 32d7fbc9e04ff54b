//! Base trait for intents.

/// Marker trait for intent objects.
///
/// Intents represent:
/// - User actions (editing the question, picking an example, submitting)
/// - Timer events (simulated progress ticks)
/// - Request outcomes (analysis received or failed)
pub trait Intent: Send + 'static {}
