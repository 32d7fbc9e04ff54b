//! Analysis orchestration.
//!
//! # Architecture
//!
//! - `model.rs` - question, request and result values
//! - `state.rs` - the consolidated state published to the presentation layer
//! - `intent.rs` - user actions, ticks and request outcomes
//! - `reducer.rs` - state transitions
//! - `store.rs` - watch-backed state holder
//! - `orchestrator.rs` - sequences a submission end to end

mod error;
mod intent;
mod model;
mod orchestrator;
mod reducer;
mod state;
mod store;

pub use error::{SubmitError, ValidationError};
pub use intent::AnalysisIntent;
pub use model::{AnalysisRequest, AnalysisResult, Question};
pub use orchestrator::{
    AnalysisOrchestrator, ABANDONED_REASON, EMPTY_QUESTION_MESSAGE, FAILURE_MESSAGE,
    SUCCESS_MESSAGE,
};
pub use reducer::AnalysisReducer;
pub use state::{AnalysisState, OperationState};
pub use store::AnalysisStore;
