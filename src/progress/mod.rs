//! Client-side progress simulation for an in-flight analysis.
//!
//! The backend gives no progress telemetry, so while a request is pending
//! two independent tickers fake it: a percentage that climbs towards a cap
//! below 100, and a short sequence of step labels. Only the real response
//! is allowed to report 100%.

mod schedule;
mod simulator;
mod state;

pub use schedule::{ProgressSchedule, COMPLETION_LABEL, DEFAULT_STEP_LABELS};
pub use simulator::{
    PercentTicker, ProgressSimulator, ProgressSink, ProgressTick, SimulatorHandle, StepTicker,
};
pub use state::ProgressState;
