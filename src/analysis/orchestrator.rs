//! Sequences a submission: validate, simulate, request, reconcile, settle.

use scopeguard::{defer, ScopeGuard};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::Instrument;
use uuid::Uuid;

use crate::client::AnalysisClient;
use crate::notify::Notifier;
use crate::progress::{ProgressSchedule, ProgressSimulator};

use super::error::SubmitError;
use super::intent::AnalysisIntent;
use super::model::{AnalysisRequest, Question};
use super::state::{AnalysisState, OperationState};
use super::store::AnalysisStore;

pub const EMPTY_QUESTION_MESSAGE: &str = "Por favor, digite uma pergunta sobre licitações.";
pub const SUCCESS_MESSAGE: &str = "Análise concluída com sucesso!";
pub const FAILURE_MESSAGE: &str = "Erro ao analisar a pergunta. Tente novamente.";

/// Failure reason recorded when a submission is dropped before settling.
pub const ABANDONED_REASON: &str = "análise interrompida";

/// Owns the analysis state and runs one submission at a time.
///
/// Cloning is cheap and every clone drives the same state.
pub struct AnalysisOrchestrator<C, N> {
    client: Arc<C>,
    notifier: Arc<N>,
    simulator: ProgressSimulator,
    store: AnalysisStore,
    in_flight: Arc<AtomicBool>,
}

impl<C, N> Clone for AnalysisOrchestrator<C, N> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            notifier: Arc::clone(&self.notifier),
            simulator: self.simulator.clone(),
            store: self.store.clone(),
            in_flight: Arc::clone(&self.in_flight),
        }
    }
}

impl<C, N> AnalysisOrchestrator<C, N>
where
    C: AnalysisClient,
    N: Notifier,
{
    pub fn new(client: Arc<C>, notifier: Arc<N>, schedule: ProgressSchedule) -> Self {
        Self {
            client,
            notifier,
            simulator: ProgressSimulator::new(schedule),
            store: AnalysisStore::default(),
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Start with a pre-filled question.
    pub fn with_question(self, question: impl Into<String>) -> Self {
        self.store
            .dispatch(AnalysisIntent::QuestionEdited(question.into()));
        self
    }

    pub fn snapshot(&self) -> AnalysisState {
        self.store.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<AnalysisState> {
        self.store.subscribe()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Update the pending question without submitting it.
    pub fn edit_question(&self, text: impl Into<String>) {
        self.store.dispatch(AnalysisIntent::QuestionEdited(text.into()));
    }

    /// Put an example question into the input. Does not submit.
    pub fn select_example(&self, text: &str) {
        self.edit_question(text);
    }

    /// Clear the displayed result and restore the default question.
    pub fn reset(&self, default_question: &str) {
        self.store.dispatch(AnalysisIntent::Reset {
            question: default_question.to_string(),
        });
    }

    /// Submit the pending question.
    pub async fn submit_pending(&self) -> Result<OperationState, SubmitError> {
        let question = self.store.snapshot().question;
        self.submit(&question).await
    }

    /// Run one submission to completion and return its terminal state.
    ///
    /// Blank questions and re-entrant calls are rejected before any state
    /// changes. Request failures are not errors here: they settle the
    /// submission as `OperationState::Failed` and raise a notification.
    pub async fn submit(&self, question: &str) -> Result<OperationState, SubmitError> {
        let question = match Question::parse(question) {
            Ok(question) => question,
            Err(err) => {
                tracing::debug!("Rejected blank question");
                self.notifier.notify_error(EMPTY_QUESTION_MESSAGE);
                return Err(err.into());
            }
        };

        if self.in_flight.swap(true, Ordering::SeqCst) {
            tracing::warn!("Submission rejected: another analysis is in flight");
            return Err(SubmitError::AlreadyInFlight);
        }
        let in_flight = Arc::clone(&self.in_flight);
        defer! {
            in_flight.store(false, Ordering::SeqCst);
        }

        let span = tracing::info_span!("analysis", id = %Uuid::new_v4());
        self.run(question).instrument(span).await;

        Ok(self.store.snapshot().operation)
    }

    async fn run(&self, question: Question) {
        tracing::info!(question = %question, "Analysis started");

        self.store.dispatch(AnalysisIntent::Started {
            question: question.as_str().to_string(),
        });
        let request = AnalysisRequest::new(question);

        let simulator = self.simulator.start(Arc::new(self.store.clone()));

        // Settles the submission if this future is dropped mid-request.
        let abandon = scopeguard::guard(
            (simulator, self.store.clone()),
            |(simulator, store)| {
                simulator.stop();
                tracing::warn!("Analysis abandoned before the backend answered");
                store.dispatch(AnalysisIntent::Failed {
                    reason: ABANDONED_REASON.to_string(),
                });
            },
        );

        let outcome = self.client.analyze(&request).await;

        let (simulator, _) = ScopeGuard::into_inner(abandon);
        simulator.stop();

        match outcome {
            Ok(result) => {
                tracing::info!(
                    analysis_len = result.analysis.len(),
                    has_references = result.references.is_some(),
                    "Analysis completed"
                );
                self.store.dispatch(AnalysisIntent::Succeeded {
                    result: Arc::new(result),
                    completion_label: self.simulator.schedule().completion_label.clone(),
                });
                self.notifier.notify_success(SUCCESS_MESSAGE);
            }
            Err(err) => {
                tracing::error!(error = %err, kind = err.kind(), "Analysis failed");
                self.store.dispatch(AnalysisIntent::Failed {
                    reason: err.to_string(),
                });
                self.notifier.notify_error(FAILURE_MESSAGE);
            }
        }
    }
}
