//! Surface bridge: lets background tasks drive the terminal.
//!
//! The controller and health probe run on tokio tasks, but only the event
//! loop may touch `App`. These adapters implement the core capability traits
//! by turning every call into an `Action` on the loop's channel, so the
//! calls are applied in exactly the order they were made.

use std::sync::mpsc;

use log::warn;

use crate::core::action::Action;
use crate::core::conversation::{Message, TypingToken};
use crate::core::state::Indicator;
use crate::core::surface::{IndicatorState, InputControl, MessageSink, StatusIndicator};

#[derive(Clone)]
pub struct ActionSink {
    tx: mpsc::Sender<Action>,
}

impl ActionSink {
    pub fn new(tx: mpsc::Sender<Action>) -> Self {
        Self { tx }
    }

    fn send(&self, action: Action) {
        if self.tx.send(action).is_err() {
            warn!("Failed to send action: receiver dropped");
        }
    }
}

impl MessageSink for ActionSink {
    fn dismiss_welcome(&mut self) {
        self.send(Action::DismissWelcome);
    }

    fn add_message(&mut self, message: Message) {
        self.send(Action::AppendMessage(message));
    }

    fn show_typing_indicator(&mut self) -> TypingToken {
        let token = TypingToken::new();
        self.send(Action::ShowTyping(token));
        token
    }

    fn remove_typing_indicator(&mut self, token: TypingToken) {
        self.send(Action::RemoveTyping(token));
    }
}

impl InputControl for ActionSink {
    fn clear(&mut self) {
        self.send(Action::ClearInput);
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.send(Action::SetInputEnabled(enabled));
    }

    fn focus(&mut self) {
        self.send(Action::FocusInput);
    }
}

/// One title-bar indicator, addressed through the action channel.
pub struct IndicatorSink {
    which: Indicator,
    sink: ActionSink,
}

impl IndicatorSink {
    pub fn new(which: Indicator, tx: mpsc::Sender<Action>) -> Self {
        Self {
            which,
            sink: ActionSink::new(tx),
        }
    }
}

impl StatusIndicator for IndicatorSink {
    fn set_state(&mut self, state: IndicatorState) {
        self.sink.send(Action::SetIndicator(self.which, state));
    }
}
