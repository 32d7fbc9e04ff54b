use thiserror::Error;

/// Errors that can occur while talking to the analysis backend.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    /// Could not reach the backend.
    #[error("Connection failed to '{url}': {source}")]
    Connection {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Request exceeded the configured timeout.
    #[error("Request timeout after {duration}s")]
    Timeout { duration: u64 },

    /// Backend answered with a non-success status.
    #[error("Backend error: {status} - {message}")]
    Status { status: u16, message: String },

    /// Backend answered 2xx but the body is unusable.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl RequestError {
    /// Short machine-readable kind, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            RequestError::Build(_) => "build_error",
            RequestError::Connection { .. } => "connection_error",
            RequestError::Timeout { .. } => "timeout",
            RequestError::Status { .. } => "status_error",
            RequestError::MalformedResponse(_) => "malformed_response",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_message() {
        let err = RequestError::Status {
            status: 500,
            message: "Erro na análise".to_string(),
        };
        assert_eq!(err.to_string(), "Backend error: 500 - Erro na análise");
        assert_eq!(err.kind(), "status_error");
    }

    #[test]
    fn timeout_message() {
        let err = RequestError::Timeout { duration: 30 };
        assert_eq!(err.to_string(), "Request timeout after 30s");
        assert_eq!(err.kind(), "timeout");
    }
}
