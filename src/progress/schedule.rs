use std::time::Duration;

/// Labels shown one after another while the analysis runs.
pub const DEFAULT_STEP_LABELS: [&str; 4] = [
    "🔍 Gerando consultas específicas sobre licitações...",
    "📋 Buscando informações na legislação oficial...",
    "✍️ Elaborando análise técnica...",
    "📊 Finalizando análise...",
];

/// Label shown once the real analysis has arrived.
pub const COMPLETION_LABEL: &str = "Análise concluída!";

const DEFAULT_PERCENT_STEP: u8 = 10;
const DEFAULT_PERCENT_PERIOD: Duration = Duration::from_millis(200);
const DEFAULT_PERCENT_CAP: u8 = 90;
const DEFAULT_STEP_PERIOD: Duration = Duration::from_millis(500);

/// Pacing of the simulated progress.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressSchedule {
    /// Amount added to the percentage on every percent tick.
    pub percent_step: u8,
    /// Interval between percent ticks.
    pub percent_period: Duration,
    /// Highest percentage the simulation may report. Kept below 100.
    pub percent_cap: u8,
    /// Interval between step label ticks.
    pub step_period: Duration,
    /// Ordered step labels, shown at most once each.
    pub step_labels: Vec<String>,
    /// Label forced on success.
    pub completion_label: String,
}

impl ProgressSchedule {
    /// Cap actually applied by the percent ticker.
    pub fn effective_cap(&self) -> u8 {
        self.percent_cap.min(99)
    }
}

impl Default for ProgressSchedule {
    fn default() -> Self {
        Self {
            percent_step: DEFAULT_PERCENT_STEP,
            percent_period: DEFAULT_PERCENT_PERIOD,
            percent_cap: DEFAULT_PERCENT_CAP,
            step_period: DEFAULT_STEP_PERIOD,
            step_labels: DEFAULT_STEP_LABELS.iter().map(|s| s.to_string()).collect(),
            completion_label: COMPLETION_LABEL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_schedule_matches_original_pacing() {
        let schedule = ProgressSchedule::default();
        assert_eq!(schedule.percent_step, 10);
        assert_eq!(schedule.percent_period, Duration::from_millis(200));
        assert_eq!(schedule.percent_cap, 90);
        assert_eq!(schedule.step_period, Duration::from_millis(500));
        assert_eq!(schedule.step_labels.len(), 4);
    }

    #[test]
    fn effective_cap_never_reaches_completion() {
        let schedule = ProgressSchedule {
            percent_cap: 100,
            ..ProgressSchedule::default()
        };
        assert_eq!(schedule.effective_cap(), 99);
    }
}
