//! Tickers driving simulated progress, and the handle that stops them.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use super::schedule::ProgressSchedule;

/// A single simulated progress update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressTick {
    /// New percentage.
    Percent(u8),
    /// New step label.
    Step(String),
}

/// Receiver of simulated progress updates.
pub trait ProgressSink: Send + Sync + 'static {
    fn apply(&self, tick: ProgressTick);
}

/// Percentage that climbs by a fixed step and stops at a cap.
#[derive(Debug, Clone)]
pub struct PercentTicker {
    current: u8,
    step: u8,
    cap: u8,
}

impl PercentTicker {
    pub fn new(step: u8, cap: u8) -> Self {
        Self {
            current: 0,
            step: step.max(1),
            cap: cap.min(99),
        }
    }

    /// Advance once. Returns `None` once the cap has been reached.
    pub fn tick(&mut self) -> Option<u8> {
        if self.current >= self.cap {
            return None;
        }
        self.current = self.current.saturating_add(self.step).min(self.cap);
        Some(self.current)
    }
}

/// Walks a fixed list of labels once, without looping.
#[derive(Debug, Clone)]
pub struct StepTicker {
    labels: Vec<String>,
    next: usize,
}

impl StepTicker {
    pub fn new(labels: Vec<String>) -> Self {
        Self { labels, next: 0 }
    }

    /// Next label, or `None` once every label has been shown.
    pub fn tick(&mut self) -> Option<String> {
        let label = self.labels.get(self.next)?.clone();
        self.next += 1;
        Some(label)
    }
}

/// Serializes tick delivery against `stop()`.
///
/// A tick is applied while holding the lock and only if the gate is open,
/// so once `close` returns no further tick can reach the sink.
#[derive(Clone, Default)]
struct TickGate {
    closed: Arc<Mutex<bool>>,
}

impl TickGate {
    fn emit(&self, sink: &dyn ProgressSink, tick: ProgressTick) -> bool {
        let closed = self.closed.lock();
        if *closed {
            return false;
        }
        sink.apply(tick);
        true
    }

    /// Returns `true` only for the call that actually closed the gate.
    fn close(&self) -> bool {
        let mut closed = self.closed.lock();
        !std::mem::replace(&mut *closed, true)
    }
}

/// Spawns the two tickers for one submission.
#[derive(Debug, Clone, Default)]
pub struct ProgressSimulator {
    schedule: ProgressSchedule,
}

impl ProgressSimulator {
    pub fn new(schedule: ProgressSchedule) -> Self {
        Self { schedule }
    }

    pub fn schedule(&self) -> &ProgressSchedule {
        &self.schedule
    }

    /// Start both tickers on the current tokio runtime.
    ///
    /// The first tick of each ticker fires one full period after start.
    pub fn start(&self, sink: Arc<dyn ProgressSink>) -> SimulatorHandle {
        let gate = TickGate::default();

        let percent = PercentTicker::new(self.schedule.percent_step, self.schedule.effective_cap());
        let steps = StepTicker::new(self.schedule.step_labels.clone());

        let percent_task = tokio::spawn(run_ticker(
            self.schedule.percent_period,
            gate.clone(),
            Arc::clone(&sink),
            percent,
            |ticker: &mut PercentTicker| ticker.tick().map(ProgressTick::Percent),
        ));
        let step_task = tokio::spawn(run_ticker(
            self.schedule.step_period,
            gate.clone(),
            sink,
            steps,
            |ticker: &mut StepTicker| ticker.tick().map(ProgressTick::Step),
        ));

        tracing::debug!(
            percent_period_ms = self.schedule.percent_period.as_millis() as u64,
            step_period_ms = self.schedule.step_period.as_millis() as u64,
            "Progress simulator started"
        );

        SimulatorHandle {
            gate,
            tasks: vec![percent_task, step_task],
        }
    }
}

async fn run_ticker<T, F>(
    period: Duration,
    gate: TickGate,
    sink: Arc<dyn ProgressSink>,
    mut ticker: T,
    mut next: F,
) where
    T: Send + 'static,
    F: FnMut(&mut T) -> Option<ProgressTick> + Send + 'static,
{
    // tokio panics on a zero period.
    let period = period.max(Duration::from_millis(1));
    let mut interval = time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;
        let Some(tick) = next(&mut ticker) else {
            break;
        };
        if !gate.emit(sink.as_ref(), tick) {
            break;
        }
    }
}

/// Owns the running tickers of one submission.
///
/// `stop()` is idempotent and is also called on drop.
pub struct SimulatorHandle {
    gate: TickGate,
    tasks: Vec<JoinHandle<()>>,
}

impl SimulatorHandle {
    /// Stop both tickers. No tick is applied after this returns.
    pub fn stop(&self) {
        if self.gate.close() {
            tracing::debug!("Progress simulator stopped");
        }
        for task in &self.tasks {
            task.abort();
        }
    }
}

impl Drop for SimulatorHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
