use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::progress::{ProgressSchedule, COMPLETION_LABEL, DEFAULT_STEP_LABELS};

/// Question pre-filled on start and after the home action.
pub const DEFAULT_QUESTION: &str = "Como elaborar um Documento de Formalização de Demanda (DFD)?";

/// Example questions offered when the backend list is unavailable.
pub const DEFAULT_EXAMPLES: [&str; 8] = [
    "Como elaborar um Documento de Formalização de Demanda (DFD)?",
    "Quais são os requisitos para um Estudo Técnico Preliminar (ETP)?",
    "Como estruturar um Termo de Referência (TR) para bens de consumo?",
    "Quais são as modalidades de licitação previstas na Lei 14.133/2021?",
    "Como funciona o processo de contratação integrada?",
    "Quais são os critérios de julgamento permitidos?",
    "Como elaborar especificações técnicas detalhadas?",
    "Quais documentos são obrigatórios no processo licitatório?",
];

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub progress: ProgressConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Analysis backend connection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the analysis API (e.g., "http://localhost:8000").
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Total request timeout in seconds. Analyses run several LLM calls.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Connection timeout in seconds (default: 5).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
}

/// Pacing of the simulated progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressConfig {
    #[serde(default = "default_percent_step")]
    pub percent_step: u8,
    #[serde(default = "default_percent_period_ms")]
    pub percent_period_ms: u64,
    /// Highest simulated percentage, must stay below 100.
    #[serde(default = "default_percent_cap")]
    pub percent_cap: u8,
    #[serde(default = "default_step_period_ms")]
    pub step_period_ms: u64,
    #[serde(default = "default_step_labels")]
    pub step_labels: Vec<String>,
    #[serde(default = "default_completion_label")]
    pub completion_label: String,
}

/// Terminal UI settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_question")]
    pub default_question: String,
    /// Local example list, replaced by the backend's when it answers.
    #[serde(default = "default_examples")]
    pub examples: Vec<String>,
    /// Redraw interval in milliseconds (default: 100).
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
    /// How long a toast stays visible in milliseconds (default: 3000).
    #[serde(default = "default_toast_life_ms")]
    pub toast_life_ms: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout() -> u32 {
    300
}

fn default_connect_timeout() -> u32 {
    5
}

fn default_percent_step() -> u8 {
    10
}

fn default_percent_period_ms() -> u64 {
    200
}

fn default_percent_cap() -> u8 {
    90
}

fn default_step_period_ms() -> u64 {
    500
}

fn default_step_labels() -> Vec<String> {
    DEFAULT_STEP_LABELS.iter().map(|s| s.to_string()).collect()
}

fn default_completion_label() -> String {
    COMPLETION_LABEL.to_string()
}

fn default_question() -> String {
    DEFAULT_QUESTION.to_string()
}

fn default_examples() -> Vec<String> {
    DEFAULT_EXAMPLES.iter().map(|s| s.to_string()).collect()
}

fn default_tick_rate_ms() -> u64 {
    100
}

fn default_toast_life_ms() -> u64 {
    3000
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
        }
    }
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            percent_step: default_percent_step(),
            percent_period_ms: default_percent_period_ms(),
            percent_cap: default_percent_cap(),
            step_period_ms: default_step_period_ms(),
            step_labels: default_step_labels(),
            completion_label: default_completion_label(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            default_question: default_question(),
            examples: default_examples(),
            tick_rate_ms: default_tick_rate_ms(),
            toast_life_ms: default_toast_life_ms(),
        }
    }
}

impl ProgressConfig {
    pub fn schedule(&self) -> ProgressSchedule {
        ProgressSchedule {
            percent_step: self.percent_step,
            percent_period: Duration::from_millis(self.percent_period_ms),
            percent_cap: self.percent_cap,
            step_period: Duration::from_millis(self.step_period_ms),
            step_labels: self.step_labels.clone(),
            completion_label: self.completion_label.clone(),
        }
    }
}

impl UiConfig {
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(1))
    }

    pub fn toast_life(&self) -> Duration {
        Duration::from_millis(self.toast_life_ms)
    }
}
