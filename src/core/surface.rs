//! # Host Surface Capabilities
//!
//! The controller never touches UI elements directly. It drives these three
//! traits, and each host (the terminal, a test recorder) implements them.

use crate::core::conversation::{Conversation, Message, TypingToken};

/// Append-side of the conversation log.
pub trait MessageSink {
    /// Removes the one-time welcome placeholder if it is still shown.
    fn dismiss_welcome(&mut self);

    /// Appends a message and scrolls to it.
    fn add_message(&mut self, message: Message);

    /// Inserts a typing placeholder and returns its token.
    fn show_typing_indicator(&mut self) -> TypingToken;

    /// Removes the placeholder if it is still present.
    fn remove_typing_indicator(&mut self, token: TypingToken);
}

/// The question field together with its send control.
pub trait InputControl {
    /// Empties the question field.
    fn clear(&mut self);

    /// Enables or disables the field and send control. Disabled implies the
    /// send control shows its busy visual.
    fn set_enabled(&mut self, enabled: bool);

    /// Moves focus back to the question field.
    fn focus(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndicatorState {
    /// Initial visual; also what remains when the health probe fails.
    #[default]
    Unset,
    Connected,
    Warning,
}

impl IndicatorState {
    pub fn from_flag(ok: bool) -> Self {
        if ok {
            IndicatorState::Connected
        } else {
            IndicatorState::Warning
        }
    }
}

/// One health indicator.
pub trait StatusIndicator {
    fn set_state(&mut self, state: IndicatorState);
}

impl MessageSink for Conversation {
    fn dismiss_welcome(&mut self) {
        Conversation::dismiss_welcome(self);
    }

    fn add_message(&mut self, message: Message) {
        self.push_message(message);
    }

    fn show_typing_indicator(&mut self) -> TypingToken {
        let token = TypingToken::new();
        self.push_typing(token);
        token
    }

    fn remove_typing_indicator(&mut self, token: TypingToken) {
        self.remove_typing(token);
    }
}
