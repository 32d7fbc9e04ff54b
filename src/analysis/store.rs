use std::sync::Arc;
use tokio::sync::watch;

use crate::mvi::Reducer;
use crate::progress::{ProgressSink, ProgressTick};

use super::intent::AnalysisIntent;
use super::reducer::AnalysisReducer;
use super::state::AnalysisState;

/// Holds the authoritative `AnalysisState`.
///
/// Every mutation goes through `AnalysisReducer`; readers subscribe to a
/// `watch` channel and are only woken when the state actually changed.
#[derive(Clone)]
pub struct AnalysisStore {
    tx: Arc<watch::Sender<AnalysisState>>,
}

impl AnalysisStore {
    pub fn new(initial: AnalysisState) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx: Arc::new(tx) }
    }

    /// Apply an intent. Returns `true` if the state changed.
    pub fn dispatch(&self, intent: AnalysisIntent) -> bool {
        self.tx.send_if_modified(|state| {
            let next = AnalysisReducer::reduce(state.clone(), intent);
            if next == *state {
                return false;
            }
            *state = next;
            true
        })
    }

    /// Current state.
    pub fn snapshot(&self) -> AnalysisState {
        self.tx.borrow().clone()
    }

    /// Read-only view for the presentation layer.
    pub fn subscribe(&self) -> watch::Receiver<AnalysisState> {
        self.tx.subscribe()
    }
}

impl Default for AnalysisStore {
    fn default() -> Self {
        Self::new(AnalysisState::default())
    }
}

impl ProgressSink for AnalysisStore {
    fn apply(&self, tick: ProgressTick) {
        self.dispatch(AnalysisIntent::Progressed(tick));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::OperationState;

    #[test]
    fn dispatch_reports_changes() {
        let store = AnalysisStore::new(AnalysisState::with_question("q"));

        assert!(store.dispatch(AnalysisIntent::Started {
            question: "q".into()
        }));
        assert!(!store.dispatch(AnalysisIntent::Started {
            question: "q".into()
        }));
        assert_eq!(store.snapshot().operation, OperationState::InFlight);
    }

    #[test]
    fn subscribers_see_only_real_changes() {
        let store = AnalysisStore::default();
        let mut rx = store.subscribe();

        store.apply(ProgressTick::Percent(10));
        assert!(!rx.has_changed().unwrap());

        store.dispatch(AnalysisIntent::QuestionEdited("new".into()));
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().question, "new");
    }
}
