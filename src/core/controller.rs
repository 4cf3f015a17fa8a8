//! # Request Orchestrator
//!
//! Turns a submitted question into conversation entries:
//!
//! ```text
//! submit(raw)
//!   └─ trim, ignore empty, clear field
//!      └─ ask_question(q)
//!           dismiss welcome → user message → typing placeholder
//!           → disable input ──► backend.ask(q) ──► remove placeholder
//!           → answer | app error | transport error message
//!           → re-enable input + focus   (InputLease drop, every path)
//! ```
//!
//! One `Controller` owns one surface and runs one question at a time; the
//! `&mut self` receiver makes overlapping requests on the same controller
//! impossible.

use std::sync::Arc;

use log::{debug, info, warn};

use crate::backend::QuestionBackend;
use crate::core::conversation::Message;
use crate::core::intent::Intent;
use crate::core::surface::{InputControl, MessageSink};

/// Monotonic per-controller request number, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestId(pub u64);

/// Returns the question to send, or None for empty/whitespace-only input.
pub fn capture(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Holds the input disabled for its lifetime. Dropping it re-enables the
/// input and returns focus to it, whichever way the request ended.
struct InputLease<'a, I: InputControl> {
    input: &'a mut I,
}

impl<'a, I: InputControl> InputLease<'a, I> {
    fn acquire(input: &'a mut I) -> Self {
        input.set_enabled(false);
        Self { input }
    }
}

impl<I: InputControl> Drop for InputLease<'_, I> {
    fn drop(&mut self) {
        self.input.set_enabled(true);
        self.input.focus();
    }
}

pub struct Controller<S, I> {
    backend: Arc<dyn QuestionBackend>,
    log: S,
    input: I,
    last_request: u64,
}

impl<S: MessageSink, I: InputControl> Controller<S, I> {
    pub fn new(backend: Arc<dyn QuestionBackend>, log: S, input: I) -> Self {
        Self {
            backend,
            log,
            input,
            last_request: 0,
        }
    }

    pub fn log(&self) -> &S {
        &self.log
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    /// Input capture entry point shared by the input box and quick questions.
    ///
    /// Returns false (and does nothing) when the trimmed text is empty.
    pub async fn submit(&mut self, raw: &str) -> bool {
        let Some(question) = capture(raw) else {
            debug!("Ignoring empty submission");
            return false;
        };
        self.input.clear();
        self.ask_question(question).await;
        true
    }

    /// Runs one question through the backend and records the outcome.
    pub async fn ask_question(&mut self, question: &str) -> RequestId {
        self.last_request += 1;
        let id = RequestId(self.last_request);

        self.log.dismiss_welcome();
        self.log.add_message(Message::user(question));
        let typing = self.log.show_typing_indicator();

        let _lease = InputLease::acquire(&mut self.input);

        info!("Request #{} dispatched", id.0);
        let outcome = self.backend.ask(question).await;
        self.log.remove_typing_indicator(typing);

        match outcome {
            Ok(response) => {
                let message = Message::from_response(&response);
                if message.is_error {
                    info!("Request #{} answered with application error", id.0);
                } else {
                    let intent = message
                        .meta
                        .as_ref()
                        .and_then(|meta| meta.intent.as_ref())
                        .map(Intent::id)
                        .unwrap_or("none");
                    info!(
                        "Request #{} answered (intent={}, query_executed={:?}, row_count={:?})",
                        id.0, intent, response.query_executed, response.row_count
                    );
                }
                self.log.add_message(message);
            }
            Err(e) => {
                warn!("Request #{} failed: {}", id.0, e);
                self.log.add_message(Message::transport_failure());
            }
        }

        id
    }
}
