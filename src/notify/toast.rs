use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::Notifier;

/// Maximum number of toasts kept at once; the oldest is dropped first.
const MAX_TOASTS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

impl Severity {
    pub fn summary(&self) -> &'static str {
        match self {
            Severity::Success => "Sucesso",
            Severity::Error => "Erro",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub severity: Severity,
    pub detail: String,
    pub created_at: Instant,
}

/// Short-lived notifications rendered by the terminal UI.
#[derive(Clone)]
pub struct ToastQueue {
    inner: Arc<Mutex<VecDeque<Toast>>>,
    life: Duration,
}

impl ToastQueue {
    pub fn new(life: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(VecDeque::new())),
            life,
        }
    }

    pub fn push(&self, severity: Severity, detail: &str) {
        self.push_at(severity, detail, Instant::now());
    }

    fn push_at(&self, severity: Severity, detail: &str, now: Instant) {
        let mut toasts = self.inner.lock();
        if toasts.len() >= MAX_TOASTS {
            toasts.pop_front();
        }
        toasts.push_back(Toast {
            severity,
            detail: detail.to_string(),
            created_at: now,
        });
    }

    /// Drop expired toasts and return the remaining ones, oldest first.
    pub fn active(&self, now: Instant) -> Vec<Toast> {
        let mut toasts = self.inner.lock();
        toasts.retain(|toast| now.saturating_duration_since(toast.created_at) < self.life);
        toasts.iter().cloned().collect()
    }
}

impl Notifier for ToastQueue {
    fn notify_success(&self, message: &str) {
        self.push(Severity::Success, message);
    }

    fn notify_error(&self, message: &str) {
        self.push(Severity::Error, message);
    }
}
