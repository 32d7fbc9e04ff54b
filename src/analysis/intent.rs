//! Intents for the analysis state.

use std::sync::Arc;

use crate::mvi::Intent;
use crate::progress::ProgressTick;

use super::model::AnalysisResult;

#[derive(Debug, Clone)]
pub enum AnalysisIntent {
    /// The pending question was typed or picked from the examples.
    QuestionEdited(String),

    /// A validated submission started.
    Started { question: String },

    /// Simulated progress update.
    Progressed(ProgressTick),

    /// The backend answered.
    Succeeded {
        result: Arc<AnalysisResult>,
        completion_label: String,
    },

    /// The request failed or was abandoned.
    Failed { reason: String },

    /// Back to the home screen.
    Reset { question: String },
}

impl Intent for AnalysisIntent {}
