//! # TitleBar Component
//!
//! Top status bar: backend address, the two health indicators, and the
//! current status message.
//!
//! ```text
//!  Diagora │ http://localhost:5000 │ ● Veritabani  ▲ LLM │ Hazir │ ↓ Yeni
//! ```
//!
//! ## Indicators
//!
//! | State       | Glyph | Color     |
//! |-------------|-------|-----------|
//! | `Unset`     | `○`   | dark gray |
//! | `Connected` | `●`   | green     |
//! | `Warning`   | `▲`   | yellow    |
//!
//! `Unset` is what the user sees until the health probe answers, and what
//! stays if it never does.
//!
//! Stateless: all fields are props, set by the parent each frame.

use crate::core::surface::IndicatorState;
use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

pub struct TitleBar {
    pub backend_url: String,
    pub storage: IndicatorState,
    pub model: IndicatorState,
    pub status_message: String,
    /// Whether there's content below the current scroll position
    pub has_unseen_content: bool,
}

impl TitleBar {
    pub fn new(
        backend_url: String,
        storage: IndicatorState,
        model: IndicatorState,
        status_message: String,
        has_unseen_content: bool,
    ) -> Self {
        Self {
            backend_url,
            storage,
            model,
            status_message,
            has_unseen_content,
        }
    }
}

pub fn indicator_glyph(state: IndicatorState) -> (&'static str, Color) {
    match state {
        IndicatorState::Unset => ("○", Color::DarkGray),
        IndicatorState::Connected => ("●", Color::Green),
        IndicatorState::Warning => ("▲", Color::Yellow),
    }
}

fn indicator_spans(label: &'static str, state: IndicatorState) -> [Span<'static>; 2] {
    let (glyph, color) = indicator_glyph(state);
    [
        Span::styled(format!("{glyph} "), Style::default().fg(color)),
        Span::raw(label),
    ]
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let sep = || Span::styled(" │ ", Style::default().fg(Color::DarkGray));

        let mut spans = vec![
            Span::styled(" Diagora", Style::default().add_modifier(Modifier::BOLD)),
            sep(),
            Span::raw(self.backend_url.clone()),
            sep(),
        ];
        spans.extend(indicator_spans("Veritabani", self.storage));
        spans.push(Span::raw("  "));
        spans.extend(indicator_spans("LLM", self.model));

        if !self.status_message.is_empty() {
            spans.push(sep());
            spans.push(Span::raw(self.status_message.clone()));
        }
        if self.has_unseen_content {
            spans.push(sep());
            spans.push(Span::styled("↓ Yeni", Style::default().fg(Color::Cyan)));
        }

        frame.render_widget(Line::from(spans), area);
    }
}
