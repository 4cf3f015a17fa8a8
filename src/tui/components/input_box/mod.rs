//! # InputBox Component
//!
//! The question field and its send control.
//!
//! ## Responsibilities
//!
//! - Capture text input (single line; pasted newlines become spaces)
//! - Handle editing (backspace, delete, cursor movement, paste)
//! - Emit a submission on Enter
//! - Show the disabled/busy state while a question is in flight
//!
//! ## State Management
//!
//! The buffer is internal state. `enabled`, `focused` and `spinner_frame` are
//! props synced from the application state each frame. While disabled the box
//! is read-only and its title shows a spinner in place of the send hint.
//! The buffer is only emptied by [`InputBox::clear`], which the event loop
//! calls when the controller asks for it.

mod cursor;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use cursor::{BORDER_OFFSET, CursorState, inner_width, next_char_boundary, prev_char_boundary};

/// Spinner frames for the busy send control.
const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Fixed height: one text row plus borders.
pub const INPUT_HEIGHT: u16 = 3;

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// User submitted the text (Enter pressed)
    Submit(String),
    /// Text content or cursor changed
    ContentChanged,
}

pub struct InputBox {
    /// Text buffer (Internal State)
    pub buffer: String,
    /// Accepts edits and submissions (Prop)
    pub enabled: bool,
    /// Holds keyboard focus (Prop)
    pub focused: bool,
    /// Animation frame for the busy spinner (Prop)
    pub spinner_frame: usize,
    cursor: CursorState,
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBox {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            enabled: true,
            focused: true,
            spinner_frame: 0,
            cursor: CursorState::new(),
        }
    }

    /// Empties the field.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor.reset();
    }

    fn insert_str(&mut self, text: &str) {
        self.buffer.insert_str(self.cursor.pos, text);
        self.cursor.pos += text.len();
    }

    fn title(&self) -> String {
        if self.enabled {
            "Soru (Enter: gonder)".to_string()
        } else {
            let frame = SPINNER[self.spinner_frame % SPINNER.len()];
            format!("Soru {frame} yanit bekleniyor")
        }
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let width = inner_width(area.width);
        self.cursor.update_scroll_offset(&self.buffer, width);
        let visible_text = self.cursor.visible(&self.buffer, width).to_string();

        let mut style = Style::default().fg(Color::Green);
        if !self.enabled || !self.focused {
            style = style.add_modifier(Modifier::DIM);
        }

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .padding(Padding::horizontal(1))
            .border_style(style)
            .title(self.title());

        let input = Paragraph::new(visible_text).block(block).style(style);
        frame.render_widget(input, area);

        if self.enabled && self.focused {
            let x = area.x + BORDER_OFFSET + 1 + self.cursor.screen_col(&self.buffer);
            let y = area.y + BORDER_OFFSET;
            frame.set_cursor_position((x, y));
        }
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        if !self.enabled {
            return None;
        }
        match event {
            TuiEvent::InputChar(c) => {
                let mut tmp = [0u8; 4];
                self.insert_str(c.encode_utf8(&mut tmp));
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                let flat: String = text
                    .chars()
                    .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
                    .collect();
                self.insert_str(&flat);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace => {
                if self.cursor.pos > 0 {
                    let prev = prev_char_boundary(&self.buffer, self.cursor.pos);
                    self.buffer.drain(prev..self.cursor.pos);
                    self.cursor.pos = prev;
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::Delete => {
                if self.cursor.pos < self.buffer.len() {
                    let next = next_char_boundary(&self.buffer, self.cursor.pos);
                    self.buffer.drain(self.cursor.pos..next);
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::CursorLeft => (self.cursor.pos > 0).then(|| {
                self.cursor.pos = prev_char_boundary(&self.buffer, self.cursor.pos);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorRight => (self.cursor.pos < self.buffer.len()).then(|| {
                self.cursor.pos = next_char_boundary(&self.buffer, self.cursor.pos);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorHome => (self.cursor.pos != 0).then(|| {
                self.cursor.pos = 0;
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorEnd => (self.cursor.pos != self.buffer.len()).then(|| {
                self.cursor.pos = self.buffer.len();
                InputEvent::ContentChanged
            }),
            TuiEvent::Submit => Some(InputEvent::Submit(self.buffer.clone())),
            _ => None,
        }
    }
}
