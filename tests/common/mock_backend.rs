//! In-process stand-in for the analysis API: `POST /analyze`,
//! `GET /examples` and `GET /health` on a real socket.

#![allow(dead_code)]

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub const HEALTH_TIMESTAMP: &str = "2024-01-01T00:00:00";
pub const ANSWER_TIMESTAMP: &str = "2024-01-01T00:00:00Z";

/// How the next `/analyze` call is answered.
#[derive(Debug, Clone)]
pub enum Reply {
    /// 200 with a complete analysis for the submitted question.
    Answer(String),
    /// Non-2xx with a `{"detail": ...}` body.
    Fail { status: u16, detail: String },
    /// 200 with an arbitrary JSON body.
    Raw(Value),
}

#[derive(Debug, Clone)]
struct Scripted {
    reply: Reply,
    delay: Duration,
}

/// One `/analyze` call as the backend saw it.
#[derive(Debug, Clone)]
pub struct AnalyzeCall {
    pub content_type: Option<String>,
    pub body: Value,
}

impl AnalyzeCall {
    pub fn question(&self) -> Option<&str> {
        self.body.get("question").and_then(Value::as_str)
    }
}

#[derive(Default)]
struct Backend {
    replies: Mutex<VecDeque<Scripted>>,
    calls: Mutex<Vec<AnalyzeCall>>,
    examples: Mutex<Vec<String>>,
    health_checks: Mutex<usize>,
}

pub struct MockBackend {
    addr: SocketAddr,
    backend: Arc<Backend>,
    server: JoinHandle<()>,
}

impl MockBackend {
    pub async fn start() -> Self {
        let backend = Arc::new(Backend::default());
        *backend.examples.lock() = vec![
            "Como elaborar um DFD?".to_string(),
            "O que é ETP?".to_string(),
        ];

        let router = Router::new()
            .route("/analyze", post(analyze))
            .route("/examples", get(examples))
            .route("/health", get(health))
            .with_state(Arc::clone(&backend));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock backend");
        let addr = listener.local_addr().expect("mock backend address");
        let server = tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Self {
            addr,
            backend,
            server,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Queue a reply for the next `/analyze` call.
    pub fn reply(&self, reply: Reply) {
        self.reply_after(reply, Duration::ZERO);
    }

    /// Queue a reply that is sent only after `delay`.
    pub fn reply_after(&self, reply: Reply, delay: Duration) {
        self.backend
            .replies
            .lock()
            .push_back(Scripted { reply, delay });
    }

    pub fn set_examples(&self, examples: &[&str]) {
        *self.backend.examples.lock() = examples.iter().map(|e| e.to_string()).collect();
    }

    pub fn analyze_calls(&self) -> Vec<AnalyzeCall> {
        self.backend.calls.lock().clone()
    }

    pub fn health_checks(&self) -> usize {
        *self.backend.health_checks.lock()
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.server.abort();
    }
}

async fn analyze(
    State(backend): State<Arc<Backend>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let call = AnalyzeCall {
        content_type: headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body,
    };
    let question = call.question().map(str::trim).map(str::to_string);
    backend.calls.lock().push(call);

    let Some(question) = question.filter(|q| !q.is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "detail": "Pergunta não pode estar vazia" })),
        )
            .into_response();
    };

    let scripted = backend.replies.lock().pop_front().unwrap_or(Scripted {
        reply: Reply::Answer("Análise simulada".to_string()),
        delay: Duration::ZERO,
    });
    if !scripted.delay.is_zero() {
        tokio::time::sleep(scripted.delay).await;
    }

    match scripted.reply {
        Reply::Answer(analysis) => Json(json!({
            "question": question,
            "analysis": analysis,
            "references": "",
            "thinking_process": "",
            "timestamp": ANSWER_TIMESTAMP,
            "status": "completed"
        }))
        .into_response(),
        Reply::Fail { status, detail } => (
            StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            Json(json!({ "detail": detail })),
        )
            .into_response(),
        Reply::Raw(body) => Json(body).into_response(),
    }
}

async fn examples(State(backend): State<Arc<Backend>>) -> Json<Value> {
    let examples = backend.examples.lock().clone();
    Json(json!({ "examples": examples }))
}

async fn health(State(backend): State<Arc<Backend>>) -> Json<Value> {
    *backend.health_checks.lock() += 1;
    Json(json!({ "status": "healthy", "timestamp": HEALTH_TIMESTAMP }))
}
