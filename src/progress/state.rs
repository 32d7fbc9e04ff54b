/// Percentage and step label shown while an analysis runs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProgressState {
    /// Completion percentage in `0..=100`.
    pub percent: u8,
    /// Human-readable label of the current step, empty when idle.
    pub step_label: String,
}

impl ProgressState {
    /// Progress reported once the real analysis has arrived.
    pub fn completed(label: &str) -> Self {
        Self {
            percent: 100,
            step_label: label.to_string(),
        }
    }

    /// Percentage as a ratio for gauges.
    pub fn ratio(&self) -> f64 {
        f64::from(self.percent.min(100)) / 100.0
    }
}
