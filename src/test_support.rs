//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::backend::{AskResponse, BackendError, HealthResponse, QuestionBackend};
use crate::core::conversation::{Conversation, Message, TypingToken};
use crate::core::surface::{IndicatorState, InputControl, MessageSink, StatusIndicator};

/// Everything a host surface would show, recorded for assertions.
#[derive(Debug, Clone)]
pub struct SurfaceState {
    pub conversation: Conversation,
    pub input_enabled: bool,
    pub clear_count: usize,
    pub focus_count: usize,
    pub enable_calls: Vec<bool>,
}

/// A cloneable in-memory surface. Clones share state, so one copy can be
/// handed to the controller as both sink and input while the test (or a
/// `ScriptedBackend`) inspects another.
#[derive(Clone)]
pub struct RecordingSurface(Arc<Mutex<SurfaceState>>);

impl RecordingSurface {
    pub fn new() -> Self {
        Self(Arc::new(Mutex::new(SurfaceState {
            conversation: Conversation::new(),
            input_enabled: true,
            clear_count: 0,
            focus_count: 0,
            enable_calls: Vec::new(),
        })))
    }

    pub fn snapshot(&self) -> SurfaceState {
        self.0.lock().unwrap().clone()
    }
}

impl MessageSink for RecordingSurface {
    fn dismiss_welcome(&mut self) {
        self.0.lock().unwrap().conversation.dismiss_welcome();
    }

    fn add_message(&mut self, message: Message) {
        self.0.lock().unwrap().conversation.push_message(message);
    }

    fn show_typing_indicator(&mut self) -> TypingToken {
        self.0.lock().unwrap().conversation.show_typing_indicator()
    }

    fn remove_typing_indicator(&mut self, token: TypingToken) {
        self.0.lock().unwrap().conversation.remove_typing(token);
    }
}

impl InputControl for RecordingSurface {
    fn clear(&mut self) {
        self.0.lock().unwrap().clear_count += 1;
    }

    fn set_enabled(&mut self, enabled: bool) {
        let mut state = self.0.lock().unwrap();
        state.input_enabled = enabled;
        state.enable_calls.push(enabled);
    }

    fn focus(&mut self) {
        self.0.lock().unwrap().focus_count += 1;
    }
}

/// Records the last state written to one indicator.
#[derive(Debug, Default)]
pub struct IndicatorRecorder {
    pub state: IndicatorState,
    pub writes: usize,
}

impl StatusIndicator for IndicatorRecorder {
    fn set_state(&mut self, state: IndicatorState) {
        self.state = state;
        self.writes += 1;
    }
}

/// A backend that replays canned results in order.
///
/// When `observing` a surface, it snapshots that surface every time `ask`
/// is called, which is how tests see the pending-request state.
pub struct ScriptedBackend {
    answers: Mutex<VecDeque<Result<AskResponse, BackendError>>>,
    health: Mutex<Option<Result<HealthResponse, BackendError>>>,
    questions: Arc<Mutex<Vec<String>>>,
    observer: Option<RecordingSurface>,
    observed: Arc<Mutex<Vec<SurfaceState>>>,
    never_answers: bool,
}

impl ScriptedBackend {
    pub fn new(answers: Vec<Result<AskResponse, BackendError>>) -> Self {
        Self {
            answers: Mutex::new(answers.into()),
            health: Mutex::new(None),
            questions: Arc::new(Mutex::new(Vec::new())),
            observer: None,
            observed: Arc::new(Mutex::new(Vec::new())),
            never_answers: false,
        }
    }

    /// A backend whose `ask` never completes.
    pub fn pending() -> Self {
        Self {
            never_answers: true,
            ..Self::new(vec![])
        }
    }

    pub fn with_health(self, health: Result<HealthResponse, BackendError>) -> Self {
        *self.health.lock().unwrap() = Some(health);
        self
    }

    pub fn observing(mut self, surface: RecordingSurface) -> Self {
        self.observer = Some(surface);
        self
    }

    pub fn questions(&self) -> Arc<Mutex<Vec<String>>> {
        self.questions.clone()
    }

    pub fn observed(&self) -> Arc<Mutex<Vec<SurfaceState>>> {
        self.observed.clone()
    }
}

#[async_trait]
impl QuestionBackend for ScriptedBackend {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn ask(&self, question: &str) -> Result<AskResponse, BackendError> {
        self.questions.lock().unwrap().push(question.to_string());
        if let Some(surface) = &self.observer {
            self.observed.lock().unwrap().push(surface.snapshot());
        }
        if self.never_answers {
            std::future::pending::<()>().await;
        }
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(BackendError::Network("script exhausted".into())))
    }

    async fn health(&self) -> Result<HealthResponse, BackendError> {
        self.health
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Err(BackendError::Network("no health scripted".into())))
    }
}
