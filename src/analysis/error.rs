use thiserror::Error;

/// Rejected question text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("question must not be empty")]
    EmptyQuestion,
}

/// Reasons a submission never started.
///
/// Request failures are not listed here: they settle the submission as
/// `OperationState::Failed` instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("Invalid question: {0}")]
    Validation(#[from] ValidationError),

    #[error("An analysis is already in flight")]
    AlreadyInFlight,
}
