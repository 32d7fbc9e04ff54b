use std::time::Instant;

use crate::analysis::{AnalysisResult, AnalysisState};
use crate::notify::Toast;

/// Message shown by the "about" action.
pub const ABOUT_MESSAGE: &str = "Analisador de Licitações - Lei 14.133/2021 e Decreto 1.525/2022";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Focus {
    Question,
    Examples,
    Result,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Question => Focus::Examples,
            Focus::Examples => Focus::Result,
            Focus::Result => Focus::Question,
        }
    }
}

/// Actions the runtime carries out against the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    EditQuestion(String),
    SelectExample(String),
    Submit,
    Home,
    About,
}

/// View state of the terminal UI.
///
/// Analysis state is owned by the orchestrator; the app only keeps a copy
/// of the latest snapshot plus purely visual state.
pub struct App {
    should_quit: bool,
    focus: Focus,
    analysis: AnalysisState,
    examples: Vec<String>,
    example_selection: usize,
    result_scroll: u16,
    show_thinking: bool,
    toasts: Vec<Toast>,
    started_at: Instant,
}

impl App {
    pub fn new(examples: Vec<String>, analysis: AnalysisState) -> Self {
        Self {
            should_quit: false,
            focus: Focus::Question,
            analysis,
            examples,
            example_selection: 0,
            result_scroll: 0,
            show_thinking: false,
            toasts: Vec::new(),
            started_at: Instant::now(),
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn cycle_focus(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
    }

    /// Take in the latest orchestrator state and active toasts.
    pub fn sync(&mut self, analysis: AnalysisState, toasts: Vec<Toast>) {
        let result_changed = !same_result(
            self.analysis.last_result.as_deref(),
            analysis.last_result.as_deref(),
        );
        if result_changed {
            self.result_scroll = 0;
        }
        self.analysis = analysis;
        self.toasts = toasts;
    }

    pub fn analysis(&self) -> &AnalysisState {
        &self.analysis
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    /// Input and submit are disabled while a request is pending.
    pub fn input_enabled(&self) -> bool {
        !self.analysis.operation.is_in_flight()
    }

    pub fn question(&self) -> &str {
        &self.analysis.question
    }

    pub fn examples(&self) -> &[String] {
        &self.examples
    }

    pub fn set_examples(&mut self, examples: Vec<String>) {
        if examples.is_empty() {
            return;
        }
        self.examples = examples;
        self.example_selection = self.example_selection.min(self.examples.len() - 1);
    }

    pub fn example_selection(&self) -> usize {
        self.example_selection
    }

    pub fn move_example_selection(&mut self, delta: isize) {
        if self.examples.is_empty() {
            return;
        }
        let max = self.examples.len() as isize - 1;
        let next = (self.example_selection as isize + delta).clamp(0, max);
        self.example_selection = next as usize;
    }

    pub fn selected_example(&self) -> Option<&str> {
        self.examples.get(self.example_selection).map(String::as_str)
    }

    pub fn result_scroll(&self) -> u16 {
        self.result_scroll
    }

    pub fn scroll_result(&mut self, delta: i32) {
        let next = i32::from(self.result_scroll) + delta;
        self.result_scroll = next.clamp(0, i32::from(u16::MAX)) as u16;
    }

    pub fn show_thinking(&self) -> bool {
        self.show_thinking
    }

    pub fn toggle_thinking(&mut self) {
        self.show_thinking = !self.show_thinking;
    }

    /// Frame counter for the in-flight spinner.
    pub fn spinner_frame(&self, now: Instant) -> usize {
        (now.saturating_duration_since(self.started_at).as_millis() / 100) as usize
    }
}

fn same_result(a: Option<&AnalysisResult>, b: Option<&AnalysisResult>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => std::ptr::eq(a, b),
        (None, None) => true,
        _ => false,
    }
}
