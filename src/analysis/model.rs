use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::ValidationError;

/// A trimmed, non-empty question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question(String);

impl Question {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyQuestion);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Body of `POST /analyze`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisRequest {
    question: String,
}

impl AnalysisRequest {
    pub fn new(question: Question) -> Self {
        Self {
            question: question.into_inner(),
        }
    }

    pub fn question(&self) -> &str {
        &self.question
    }
}

/// Structured answer returned by the analysis backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub question: String,
    pub analysis: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub references: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thinking_process: Option<String>,
    /// Serialized instant, passed through untouched.
    pub timestamp: String,
}

/// pt-BR date and time, e.g. `01/01/2024, 00:00:00`.
const DISPLAY_TIMESTAMP_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

impl AnalysisResult {
    /// Timestamp in pt-BR notation for display.
    ///
    /// Instants with an offset are shown in local time. Offset-less values
    /// are the backend's local time and are shown as-is. Anything
    /// unparseable is returned raw.
    pub fn display_timestamp(&self) -> String {
        let raw = self.timestamp.trim();
        if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
            return instant
                .with_timezone(&Local)
                .format(DISPLAY_TIMESTAMP_FORMAT)
                .to_string();
        }
        match raw.parse::<NaiveDateTime>() {
            Ok(naive) => naive.format(DISPLAY_TIMESTAMP_FORMAT).to_string(),
            Err(_) => self.timestamp.clone(),
        }
    }
}
