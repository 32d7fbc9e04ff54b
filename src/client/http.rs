//! reqwest-backed client for the analysis HTTP API.

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::{Duration, Instant};

use crate::analysis::{AnalysisRequest, AnalysisResult};
use crate::config::BackendConfig;

use super::error::RequestError;
use super::AnalysisClient;

/// `GET /health` payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// `POST /analyze` payload as sent by the backend.
///
/// Everything is optional on the wire so a missing `analysis` surfaces as
/// `MalformedResponse` rather than a generic parse error.
#[derive(Debug, Deserialize)]
struct AnalyzeResponse {
    question: Option<String>,
    analysis: Option<String>,
    references: Option<String>,
    thinking_process: Option<String>,
    timestamp: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ExamplesResponse {
    examples: Vec<String>,
}

/// Client for the analysis backend.
pub struct HttpAnalysisClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl HttpAnalysisClient {
    pub fn new(config: &BackendConfig) -> Result<Self, RequestError> {
        let timeout = Duration::from_secs(u64::from(config.timeout_seconds));
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(u64::from(config.connect_timeout_seconds)))
            .timeout(timeout)
            .build()
            .map_err(RequestError::Build)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Query `GET /health`.
    pub async fn health(&self) -> Result<HealthStatus, RequestError> {
        let url = self.endpoint("/health");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.send_error(&url, e))?;
        let body = self.read_success_body(response).await?;
        parse_json(&body)
    }

    /// Fetch the backend's example questions via `GET /examples`.
    pub async fn examples(&self) -> Result<Vec<String>, RequestError> {
        let url = self.endpoint("/examples");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.send_error(&url, e))?;
        let body = self.read_success_body(response).await?;
        let parsed: ExamplesResponse = parse_json(&body)?;
        Ok(parsed.examples)
    }

    fn send_error(&self, url: &str, err: reqwest::Error) -> RequestError {
        if err.is_timeout() {
            RequestError::Timeout {
                duration: self.timeout.as_secs(),
            }
        } else {
            RequestError::Connection {
                url: url.to_string(),
                source: err,
            }
        }
    }

    /// Read the body of a 2xx response; anything else becomes `Status`.
    async fn read_success_body(&self, response: Response) -> Result<String, RequestError> {
        let status = response.status();

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(RequestError::Status {
                status: status.as_u16(),
                message,
            });
        }

        // The total timeout also covers the body, so it can fire here.
        response.text().await.map_err(|e| {
            if e.is_timeout() {
                RequestError::Timeout {
                    duration: self.timeout.as_secs(),
                }
            } else {
                RequestError::MalformedResponse(format!("Failed to read body: {}", e))
            }
        })
    }
}

impl AnalysisClient for HttpAnalysisClient {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, RequestError> {
        let url = self.endpoint("/analyze");

        tracing::debug!(url = %url, "Sending analysis request");

        let start = Instant::now();
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| self.send_error(&url, e))?;

        let status = response.status();
        let body = self.read_success_body(response).await.inspect_err(|err| {
            tracing::error!(error = %err, "Analysis API error");
        })?;

        tracing::debug!(
            status = %status,
            latency_ms = start.elapsed().as_millis() as u64,
            body_len = body.len(),
            "Analysis response received"
        );

        decode_analysis(request, &body)
    }
}

fn parse_json<T: DeserializeOwned>(body: &str) -> Result<T, RequestError> {
    serde_json::from_str(body).map_err(|e| {
        RequestError::MalformedResponse(format!("Failed to parse response JSON: {}", e))
    })
}

/// Turn a 2xx `/analyze` body into an `AnalysisResult`.
fn decode_analysis(request: &AnalysisRequest, body: &str) -> Result<AnalysisResult, RequestError> {
    let wire: AnalyzeResponse = parse_json(body)?;

    let analysis = wire.analysis.ok_or_else(|| {
        RequestError::MalformedResponse("response has no 'analysis' field".to_string())
    })?;

    Ok(AnalysisResult {
        question: wire
            .question
            .unwrap_or_else(|| request.question().to_string()),
        analysis,
        references: non_empty(wire.references),
        thinking_process: non_empty(wire.thinking_process),
        timestamp: wire.timestamp.unwrap_or_default(),
    })
}

fn non_empty(text: Option<String>) -> Option<String> {
    text.filter(|t| !t.trim().is_empty())
}
