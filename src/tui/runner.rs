//! TUI runner - main loop that owns the terminal and the submit task
//!
//! The runner draws at the tick rate, dispatches key events to the App, and
//! turns accepted submits into one spawned network call each. The call's
//! outcome comes back over a channel tagged with the session generation, so
//! a response that arrives after a reset resolves as stale and is dropped.

use std::sync::Arc;
use std::time::Duration;

use eyre::Result;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::Tui;
use super::app::App;
use super::events::{Event, EventHandler};
use super::state::PendingSubmit;
use super::views;
use crate::api::{DEFAULT_FAILURE_MESSAGE, PlanClient, PlanResult};

/// Outcome of the background submit task
#[derive(Debug)]
struct SubmitTaskResult {
    generation: u64,
    result: Result<PlanResult, String>,
}

/// TUI runner that manages the terminal and event loop
pub struct TuiRunner {
    /// Application state and key handling
    app: App,
    /// Terminal handle
    terminal: Tui,
    /// Event handler
    event_handler: EventHandler,
    /// Planning service client, shared with the submit task
    client: Arc<PlanClient>,
    /// Receiver for the in-flight submit's outcome
    submit_rx: Option<mpsc::Receiver<SubmitTaskResult>>,
    /// Handle to the in-flight submit task
    submit_task: Option<JoinHandle<()>>,
}

impl TuiRunner {
    /// Create a new runner
    pub fn new(terminal: Tui, client: PlanClient) -> Self {
        debug!("TuiRunner::new: called");
        Self {
            app: App::new(),
            terminal,
            event_handler: EventHandler::new(Duration::from_millis(100)),
            client: Arc::new(client),
            submit_rx: None,
            submit_task: None,
        }
    }

    /// Run the TUI main loop
    pub async fn run(&mut self) -> Result<()> {
        debug!("TuiRunner::run: entering main loop");
        loop {
            self.terminal.draw(|frame| views::render(self.app.state_mut(), frame))?;

            tokio::select! {
                event = self.event_handler.next() => {
                    match event? {
                        Event::Key(key_event) => {
                            if self.app.handle_key(key_event) {
                                debug!("TuiRunner::run: key handler requested exit");
                                break;
                            }
                        }
                        Event::Tick | Event::Resize(_, _) => {}
                    }
                }
                // Resolve the submit task's outcome as soon as it lands
                outcome = Self::next_submit_outcome(&mut self.submit_rx) => {
                    self.apply_submit_outcome(outcome);
                }
            }

            // An accepted submit leaves a pending request for us to spawn
            if let Some(pending) = self.app.state_mut().take_pending_submit() {
                self.spawn_submit(pending);
            }

            if self.app.state().should_quit {
                debug!("TuiRunner::run: should_quit is true, breaking");
                break;
            }
        }

        debug!("TuiRunner::run: exiting");
        Ok(())
    }

    /// Await the submit channel, or park forever when nothing is in flight
    async fn next_submit_outcome(rx: &mut Option<mpsc::Receiver<SubmitTaskResult>>) -> Option<SubmitTaskResult> {
        match rx {
            Some(rx) => rx.recv().await,
            None => std::future::pending().await,
        }
    }

    /// Spawn the network call for an accepted submit
    fn spawn_submit(&mut self, pending: PendingSubmit) {
        debug!(generation = pending.generation, "TuiRunner::spawn_submit: called");
        let (tx, rx) = mpsc::channel(1);
        let client = Arc::clone(&self.client);

        let task = tokio::spawn(async move {
            let result = client
                .plan_vacation(&pending.request)
                .await
                .map_err(|e| e.user_message());
            let _ = tx
                .send(SubmitTaskResult {
                    generation: pending.generation,
                    result,
                })
                .await;
        });

        self.submit_rx = Some(rx);
        self.submit_task = Some(task);
    }

    /// Feed the submit outcome into the session
    ///
    /// A closed channel means the task died before sending (a panic in the
    /// submit path); that is folded into the normal failure presentation so
    /// the UI always returns to an interactive state.
    fn apply_submit_outcome(&mut self, outcome: Option<SubmitTaskResult>) {
        let generation = self.app.state().session.generation();
        let outcome = outcome.unwrap_or_else(|| {
            warn!("TuiRunner::apply_submit_outcome: submit task died without reporting");
            SubmitTaskResult {
                generation,
                result: Err(DEFAULT_FAILURE_MESSAGE.to_string()),
            }
        });

        debug!(generation = outcome.generation, ok = outcome.result.is_ok(), "TuiRunner::apply_submit_outcome: resolving");
        self.app.state_mut().resolve_submit(outcome.generation, outcome.result);
        self.submit_rx = None;
        self.submit_task = None;
    }
}
