//! Fire-and-forget user notifications.

mod toast;

pub use toast::{Severity, Toast, ToastQueue};

/// Receives success and error notifications. Return values are never
/// consumed, so implementations must not block.
pub trait Notifier: Send + Sync + 'static {
    fn notify_success(&self, message: &str);
    fn notify_error(&self, message: &str);
}

/// Notifier for non-interactive use: notifications become log events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify_success(&self, message: &str) {
        tracing::info!(notification = "success", "{}", message);
    }

    fn notify_error(&self, message: &str) {
        tracing::warn!(notification = "error", "{}", message);
    }
}
