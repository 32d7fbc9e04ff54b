//! Request client for the analysis backend.

mod error;
mod http;

use std::future::Future;

use crate::analysis::{AnalysisRequest, AnalysisResult};

pub use error::RequestError;
pub use http::{HealthStatus, HttpAnalysisClient};

/// Submits a question and returns the backend's structured answer.
///
/// Any failure (network, timeout, non-success status, malformed payload)
/// is reported as a `RequestError`; callers do not inspect the subtype.
pub trait AnalysisClient: Send + Sync + 'static {
    fn analyze(
        &self,
        request: &AnalysisRequest,
    ) -> impl Future<Output = Result<AnalysisResult, RequestError>> + Send;
}
