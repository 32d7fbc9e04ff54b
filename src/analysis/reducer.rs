//! Reducer for the analysis state.

use crate::mvi::Reducer;
use crate::progress::{ProgressState, ProgressTick};

use super::intent::AnalysisIntent;
use super::state::{AnalysisState, OperationState};

/// Pure state transitions for a submission.
///
/// Only an `InFlight` submission accepts progress ticks or a terminal
/// outcome, so a late tick or a second outcome leaves the state untouched.
pub struct AnalysisReducer;

impl Reducer for AnalysisReducer {
    type State = AnalysisState;
    type Intent = AnalysisIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        let in_flight = state.operation.is_in_flight();

        match intent {
            AnalysisIntent::QuestionEdited(question) if !in_flight => AnalysisState {
                question,
                ..state
            },

            AnalysisIntent::Started { question } if !in_flight => AnalysisState {
                question,
                operation: OperationState::InFlight,
                progress: ProgressState::default(),
                ..state
            },

            AnalysisIntent::Progressed(tick) if in_flight => {
                let mut progress = state.progress;
                match tick {
                    ProgressTick::Percent(percent) => progress.percent = percent.min(100),
                    ProgressTick::Step(label) => progress.step_label = label,
                }
                AnalysisState { progress, ..state }
            }

            AnalysisIntent::Succeeded {
                result,
                completion_label,
            } if in_flight => AnalysisState {
                operation: OperationState::Succeeded(result.clone()),
                progress: ProgressState::completed(&completion_label),
                last_result: Some(result),
                ..state
            },

            AnalysisIntent::Failed { reason } if in_flight => AnalysisState {
                operation: OperationState::Failed(reason),
                progress: ProgressState::default(),
                ..state
            },

            AnalysisIntent::Reset { question } if !in_flight => AnalysisState {
                question,
                ..AnalysisState::default()
            },

            _ => state,
        }
    }
}
