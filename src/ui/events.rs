use crossterm::event::{self, Event, KeyEvent};
use std::thread;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::shutdown::ShutdownHandle;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub enum AppEvent {
    Key(KeyEvent),
    Paste(String),
    Resize,
}

/// Reads terminal events on a dedicated thread and forwards them to the
/// async UI loop.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl EventHandler {
    pub fn spawn(shutdown: ShutdownHandle) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        thread::spawn(move || {
            while !shutdown.is_shutting_down() {
                match event::poll(POLL_INTERVAL) {
                    Ok(true) => {}
                    Ok(false) => continue,
                    Err(err) => {
                        tracing::error!(error = %err, "Terminal event poll failed");
                        shutdown.signal();
                        break;
                    }
                }

                let app_event = match event::read() {
                    Ok(Event::Key(key)) => AppEvent::Key(key),
                    Ok(Event::Paste(text)) => AppEvent::Paste(text),
                    Ok(Event::Resize(_, _)) => AppEvent::Resize,
                    Ok(_) => continue,
                    Err(err) => {
                        tracing::error!(error = %err, "Terminal event read failed");
                        shutdown.signal();
                        break;
                    }
                };

                if tx.send(app_event).is_err() {
                    break;
                }
            }
        });

        Self { rx }
    }

    pub async fn next(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }
}
