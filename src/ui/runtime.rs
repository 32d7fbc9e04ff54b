use std::io;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;

use crate::analysis::AnalysisOrchestrator;
use crate::client::HttpAnalysisClient;
use crate::config::Config;
use crate::notify::{Notifier, ToastQueue};
use crate::shutdown::ShutdownHandle;
use crate::ui::app::{App, UiCommand, ABOUT_MESSAGE};
use crate::ui::events::{AppEvent, EventHandler};
use crate::ui::input::{handle_key, handle_paste};
use crate::ui::render::draw;
use crate::ui::terminal_guard::setup_terminal;

type Orchestrator = AnalysisOrchestrator<HttpAnalysisClient, ToastQueue>;

pub async fn run(config: Config, client: HttpAnalysisClient) -> io::Result<()> {
    let (mut terminal, guard) = setup_terminal()?;

    let client = Arc::new(client);
    let toasts = ToastQueue::new(config.ui.toast_life());
    let orchestrator = AnalysisOrchestrator::new(
        Arc::clone(&client),
        Arc::new(toasts.clone()),
        config.progress.schedule(),
    )
    .with_question(config.ui.default_question.clone());

    let shutdown = ShutdownHandle::new();
    shutdown.listen_for_signals();
    let mut events = EventHandler::spawn(shutdown.clone());
    let mut analysis_rx = orchestrator.subscribe();
    let mut examples_rx = fetch_examples(Arc::clone(&client));
    let mut ticker = tokio::time::interval(config.ui.tick_rate());

    let mut app = App::new(config.ui.examples.clone(), orchestrator.snapshot());

    loop {
        let analysis = analysis_rx.borrow_and_update().clone();
        app.sync(analysis, toasts.active(Instant::now()));
        terminal.draw(|frame| draw(frame, &app))?;

        if app.should_quit() || shutdown.is_shutting_down() {
            break;
        }

        tokio::select! {
            event = events.next() => {
                let command = match event {
                    Some(AppEvent::Key(key)) => handle_key(&mut app, key),
                    Some(AppEvent::Paste(text)) => handle_paste(&app, &text),
                    Some(AppEvent::Resize) => None,
                    None => {
                        app.request_quit();
                        None
                    }
                };
                if let Some(command) = command {
                    execute(command, &orchestrator, &toasts, &config);
                }
            }
            _ = analysis_rx.changed() => {}
            Some(examples) = examples_rx.recv() => app.set_examples(examples),
            _ = ticker.tick() => {}
        }
    }

    shutdown.signal();
    drop(guard);
    Ok(())
}

fn execute(command: UiCommand, orchestrator: &Orchestrator, toasts: &ToastQueue, config: &Config) {
    match command {
        UiCommand::EditQuestion(text) => orchestrator.edit_question(text),
        UiCommand::SelectExample(text) => orchestrator.select_example(&text),
        UiCommand::Home => orchestrator.reset(&config.ui.default_question),
        UiCommand::About => toasts.notify_success(ABOUT_MESSAGE),
        UiCommand::Submit => {
            if orchestrator.is_in_flight() {
                return;
            }
            let orchestrator = orchestrator.clone();
            tokio::spawn(async move {
                if let Err(err) = orchestrator.submit_pending().await {
                    tracing::debug!(error = %err, "Submission not started");
                }
            });
        }
    }
}

/// Ask the backend for its example questions; the local list stays when
/// the request fails.
fn fetch_examples(client: Arc<HttpAnalysisClient>) -> mpsc::Receiver<Vec<String>> {
    let (tx, rx) = mpsc::channel(1);
    tokio::spawn(async move {
        match client.examples().await {
            Ok(examples) if !examples.is_empty() => {
                tracing::debug!(count = examples.len(), "Loaded examples from backend");
                let _ = tx.send(examples).await;
            }
            Ok(_) => {}
            Err(err) => {
                tracing::warn!(error = %err, "Using built-in examples");
            }
        }
    });
    rx
}
