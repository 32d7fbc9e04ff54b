//! State published to the presentation layer.

use std::sync::Arc;

use crate::mvi::UiState;
use crate::progress::ProgressState;

use super::model::AnalysisResult;

/// Status of the current submission.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OperationState {
    /// Nothing submitted yet, or reset to the home screen.
    #[default]
    Idle,

    /// Request pending, progress is being simulated.
    InFlight,

    /// The backend answered.
    Succeeded(Arc<AnalysisResult>),

    /// The request failed. Holds an opaque reason.
    Failed(String),
}

impl OperationState {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::InFlight)
    }

    /// Check if the submission has settled.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded(_) | Self::Failed(_))
    }

    pub fn failure_reason(&self) -> Option<&str> {
        match self {
            Self::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

/// Everything the presentation layer renders.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnalysisState {
    /// Pending question text, as edited or picked from the examples.
    pub question: String,
    pub operation: OperationState,
    pub progress: ProgressState,
    /// Most recent successful answer. Stays visible until replaced.
    pub last_result: Option<Arc<AnalysisResult>>,
}

impl UiState for AnalysisState {}

impl AnalysisState {
    pub fn with_question(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            ..Self::default()
        }
    }

    /// Whether Enter would start an analysis: nothing pending and a
    /// non-blank question. Drives the submit hints in the terminal UI.
    pub fn can_submit(&self) -> bool {
        !self.operation.is_in_flight() && !self.question.trim().is_empty()
    }

    /// Progress is only shown while a request is pending.
    pub fn shows_progress(&self) -> bool {
        self.operation.is_in_flight()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result() -> Arc<AnalysisResult> {
        Arc::new(AnalysisResult {
            question: "q".into(),
            analysis: "a".into(),
            references: None,
            thinking_process: None,
            timestamp: "2024-01-01T00:00:00Z".into(),
        })
    }

    #[test]
    fn idle_is_default() {
        assert_eq!(OperationState::default(), OperationState::Idle);
        assert!(!OperationState::Idle.is_terminal());
    }

    #[test]
    fn terminal_states() {
        assert!(OperationState::Succeeded(result()).is_terminal());
        assert!(OperationState::Failed("boom".into()).is_terminal());
        assert!(!OperationState::InFlight.is_terminal());
    }

    #[test]
    fn accessors_match_variant() {
        assert_eq!(OperationState::Succeeded(result()).failure_reason(), None);
        assert_eq!(
            OperationState::Failed("boom".into()).failure_reason(),
            Some("boom")
        );
        assert_eq!(OperationState::InFlight.failure_reason(), None);
    }

    #[test]
    fn submit_gate() {
        let mut state = AnalysisState::with_question("Como elaborar um DFD?");
        assert!(state.can_submit());

        state.operation = OperationState::InFlight;
        assert!(!state.can_submit());
        assert!(state.shows_progress());

        state.operation = OperationState::Idle;
        state.question = "   ".into();
        assert!(!state.can_submit());
    }
}
