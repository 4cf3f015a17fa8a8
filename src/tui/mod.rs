//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Tasks
//!
//! ```text
//!  event loop (owns App) ◄──── std mpsc<Action> ────┐
//!        │                                          │
//!        │ Effect::Ask(q)                           │ ActionSink / IndicatorSink
//!        ▼                                          │
//!  tokio mpsc<String> ──► controller task ──────────┤   (one question at a time)
//!                         health probe task ────────┘   (once, at startup)
//! ```
//!
//! ## Redraw Strategy
//!
//! - **Busy** (question in flight): draws every ~80ms for the typing dots and spinner.
//! - **Idle**: sleeps up to 500ms, only redraws on events, actions, or resize.

mod bridge;
mod component;
mod components;
mod event;
pub mod markdown;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};

use crossterm::cursor::{SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use tokio::sync::mpsc::UnboundedSender;

use crate::backend::{HttpBackend, QuestionBackend};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::controller::Controller;
use crate::core::health::check_health;
use crate::core::state::{App, Indicator};
use crate::tui::bridge::{ActionSink, IndicatorSink};
use crate::tui::component::EventHandler;
use crate::tui::components::{InputBox, InputEvent, MessageListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Modal input mode: determines how keyboard events are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Browse the conversation. Typing auto-switches to Input, `q` quits.
    Browse,
    /// Text editing in the input box. Esc switches to Browse.
    Input,
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub message_list: MessageListState,
    pub input_box: InputBox,
    pub input_mode: InputMode,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBox::new(),
            input_mode: InputMode::Input, // User expects to type immediately
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol is harmlessly ignored by terminals without support
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock, // Non-blinking: avoids blink timer reset from continuous redraws
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            SetCursorStyle::DefaultUserShape
        );
    }
}

/// Outcome of applying one action: whether the loop should stop.
fn apply(
    app: &mut App,
    tui: &mut TuiState,
    questions: &UnboundedSender<String>,
    action: Action,
) -> bool {
    match update(app, action) {
        Effect::None => {}
        Effect::Ask(question) => {
            if questions.send(question).is_err() {
                warn!("Controller task is gone, question dropped");
                update(app, Action::SetInputEnabled(true));
            }
        }
        Effect::ClearInput => tui.input_box.clear(),
        Effect::FocusInput => tui.input_mode = InputMode::Input,
        Effect::ScrollToEnd => tui.message_list.scroll_to_end(),
        Effect::Quit => return true,
    }
    false
}

/// Route one terminal event. Returns true when the app should quit.
fn handle_event(
    app: &mut App,
    tui: &mut TuiState,
    questions: &UnboundedSender<String>,
    event: TuiEvent,
) -> bool {
    match event {
        // Resize just needs a redraw
        TuiEvent::Resize => return false,
        // ForceQuit (Ctrl+C) always quits regardless of mode
        TuiEvent::ForceQuit => return apply(app, tui, questions, Action::Quit),
        TuiEvent::QuickQuestion(index) => {
            return apply(app, tui, questions, Action::QuickQuestion(index));
        }
        // Scroll events always go to the MessageList regardless of mode
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown
        | TuiEvent::ScrollToBottom => {
            tui.message_list.handle_event(&event);
            return false;
        }
        _ => {}
    }

    match tui.input_mode {
        InputMode::Input => {
            if matches!(event, TuiEvent::Escape) {
                tui.input_mode = InputMode::Browse;
                return false;
            }
            if let Some(InputEvent::Submit(text)) = tui.input_box.handle_event(&event) {
                return apply(app, tui, questions, Action::Submit(text));
            }
            false
        }
        InputMode::Browse => match event {
            TuiEvent::InputChar('q') => apply(app, tui, questions, Action::Quit),
            // Typing auto-switches to Input mode and forwards the event
            TuiEvent::InputChar(_) | TuiEvent::Paste(_) => {
                tui.input_mode = InputMode::Input;
                tui.input_box.handle_event(&event);
                false
            }
            TuiEvent::Submit => {
                tui.input_mode = InputMode::Input;
                false
            }
            TuiEvent::CursorHome => {
                tui.message_list.scroll_to_top();
                false
            }
            TuiEvent::CursorEnd => {
                tui.message_list.scroll_to_end();
                false
            }
            _ => false,
        },
    }
}

/// Runs queued questions through one controller, strictly one at a time.
fn spawn_controller(
    backend: Arc<dyn QuestionBackend>,
    tx: mpsc::Sender<Action>,
) -> UnboundedSender<String> {
    let (question_tx, mut question_rx) = tokio::sync::mpsc::unbounded_channel::<String>();
    tokio::spawn(async move {
        let sink = ActionSink::new(tx);
        let mut controller = Controller::new(backend, sink.clone(), sink);
        while let Some(question) = question_rx.recv().await {
            controller.submit(&question).await;
        }
        debug!("Question channel closed, controller task exiting");
    });
    question_tx
}

fn spawn_health_probe(backend: Arc<dyn QuestionBackend>, tx: mpsc::Sender<Action>) {
    tokio::spawn(async move {
        let mut storage = IndicatorSink::new(Indicator::Storage, tx.clone());
        let mut model = IndicatorSink::new(Indicator::Model, tx);
        check_health(backend.as_ref(), &mut storage, &mut model).await;
    });
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let backend: Arc<dyn QuestionBackend> = Arc::new(HttpBackend::new(&config.base_url));
    info!("Using backend {} at {}", backend.name(), config.base_url);

    let mut app = App::from_config(&config);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = match TerminalModeGuard::new() {
        Ok(guard) => Some(guard),
        Err(e) => {
            warn!("Failed to enable terminal modes: {}", e);
            None
        }
    };

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    let questions = spawn_controller(backend.clone(), tx.clone());
    spawn_health_probe(backend, tx);

    let start_time = std::time::Instant::now();
    let mut needs_redraw = true; // Force first frame

    'main: loop {
        let animating = app.is_busy();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short when animating (~12fps), long when idle
        let timeout = if animating {
            std::time::Duration::from_millis(80)
        } else {
            std::time::Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if handle_event(&mut app, &mut tui, &questions, event) {
                break 'main;
            }
        }

        // Handle background task actions (controller, health probe)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if apply(&mut app, &mut tui, &questions, action) {
                break 'main;
            }
        }
    }

    ratatui::restore();
    Ok(())
}
