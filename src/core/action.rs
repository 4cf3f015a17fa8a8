//! # Actions
//!
//! Everything that can happen in Diagora becomes an `Action`.
//! User presses Enter? That's `Action::Submit(text)`.
//! The controller appends the answer? That's `Action::AppendMessage(msg)`.
//!
//! The `update()` function applies an action to the state and returns an
//! `Effect` describing the I/O the caller should perform. No side effects here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, info};

use crate::core::controller::capture;
use crate::core::conversation::{Message, TypingToken};
use crate::core::state::{App, Indicator};
use crate::core::surface::IndicatorState;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Text submitted from the input box.
    Submit(String),
    /// Quick question by index into `App::quick_questions`.
    QuickQuestion(usize),

    // Reported by the controller task through the surface bridge
    DismissWelcome,
    AppendMessage(Message),
    ShowTyping(TypingToken),
    RemoveTyping(TypingToken),
    ClearInput,
    SetInputEnabled(bool),
    FocusInput,

    // Reported by the health probe
    SetIndicator(Indicator, IndicatorState),

    Quit,
}

/// I/O the caller performs after `update()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Hand this question to the controller task.
    Ask(String),
    ClearInput,
    FocusInput,
    ScrollToEnd,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Submit(text) => dispatch(app, &text),
        Action::QuickQuestion(index) => match app.quick_questions.get(index).cloned() {
            Some(question) => dispatch(app, &question),
            None => {
                debug!("No quick question bound to slot {}", index + 1);
                Effect::None
            }
        },
        Action::DismissWelcome => {
            app.conversation.dismiss_welcome();
            Effect::None
        }
        Action::AppendMessage(message) => {
            app.conversation.push_message(message);
            Effect::ScrollToEnd
        }
        Action::ShowTyping(token) => {
            app.conversation.push_typing(token);
            Effect::ScrollToEnd
        }
        Action::RemoveTyping(token) => {
            app.conversation.remove_typing(token);
            Effect::None
        }
        Action::ClearInput => Effect::ClearInput,
        Action::SetInputEnabled(enabled) => {
            app.input_enabled = enabled;
            app.status_message = if enabled {
                String::from("Hazir")
            } else {
                String::from("Yanit bekleniyor...")
            };
            Effect::None
        }
        Action::FocusInput => Effect::FocusInput,
        Action::SetIndicator(which, state) => {
            *app.indicator_mut(which) = state;
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

/// Shared path for typed and quick questions.
///
/// Input is marked disabled here, ahead of the controller's own disable, so
/// a second trigger in the same frame cannot queue a duplicate question.
fn dispatch(app: &mut App, raw: &str) -> Effect {
    if !app.input_enabled {
        debug!("Input disabled, ignoring submission");
        return Effect::None;
    }
    if capture(raw).is_none() {
        return Effect::None;
    }
    info!("Dispatching question ({} chars)", raw.trim().chars().count());
    app.input_enabled = false;
    Effect::Ask(raw.to_string())
}
