//! Shared test utilities: scripted clients, recording notifiers and the
//! mock HTTP backend.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use parking_lot::Mutex;
use procurement_analyzer::analysis::{AnalysisRequest, AnalysisResult};
use procurement_analyzer::client::{AnalysisClient, RequestError};
use procurement_analyzer::config::BackendConfig;
use procurement_analyzer::notify::Notifier;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// What a `ScriptedClient` answers.
#[derive(Debug, Clone)]
pub enum Script {
    Answer(AnalysisResult),
    NetworkError,
    Status(u16),
    Malformed,
}

/// In-process `AnalysisClient` answering after a fixed delay.
///
/// The delay uses tokio time, so tests on a paused clock stay instant.
pub struct ScriptedClient {
    script: Script,
    delay: Duration,
    calls: AtomicUsize,
    requests: Mutex<Vec<String>>,
}

impl ScriptedClient {
    pub fn new(script: Script, delay: Duration) -> Self {
        Self {
            script,
            delay,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn answering(analysis: &str, delay: Duration) -> Self {
        Self::new(Script::Answer(result("Como elaborar um DFD?", analysis)), delay)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn questions(&self) -> Vec<String> {
        self.requests.lock().clone()
    }
}

impl AnalysisClient for ScriptedClient {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, RequestError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().push(request.question().to_string());

        tokio::time::sleep(self.delay).await;

        match &self.script {
            Script::Answer(result) => Ok(result.clone()),
            Script::NetworkError => Err(RequestError::Timeout { duration: 1 }),
            Script::Status(status) => Err(RequestError::Status {
                status: *status,
                message: "Erro na análise".to_string(),
            }),
            Script::Malformed => Err(RequestError::MalformedResponse(
                "response has no 'analysis' field".to_string(),
            )),
        }
    }
}

pub fn result(question: &str, analysis: &str) -> AnalysisResult {
    AnalysisResult {
        question: question.to_string(),
        analysis: analysis.to_string(),
        references: None,
        thinking_process: None,
        timestamp: "2024-01-01T00:00:00Z".to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Success(String),
    Error(String),
}

/// Notifier that remembers every call.
#[derive(Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn notifications(&self) -> Vec<Notification> {
        self.seen.lock().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify_success(&self, message: &str) {
        self.seen.lock().push(Notification::Success(message.to_string()));
    }

    fn notify_error(&self, message: &str) {
        self.seen.lock().push(Notification::Error(message.to_string()));
    }
}

pub fn backend_config(base_url: &str, timeout_seconds: u32) -> BackendConfig {
    BackendConfig {
        base_url: base_url.to_string(),
        timeout_seconds,
        connect_timeout_seconds: 1,
    }
}
