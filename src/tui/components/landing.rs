//! # Landing Page Component
//!
//! The one-time welcome placeholder: greeting plus the numbered quick
//! questions. Shown while the conversation still holds its welcome entry,
//! replaced by the message list on the first question.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

pub struct LandingPage<'a> {
    pub quick_questions: &'a [String],
}

impl<'a> LandingPage<'a> {
    pub fn new(quick_questions: &'a [String]) -> Self {
        Self { quick_questions }
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::from(Span::styled(
                "Merhaba! Ben Diagora.",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Oracle EBS sisteminiz hakkinda soru sorabilirsiniz.",
                Style::default().fg(Color::Gray),
            )),
            Line::default(),
        ];

        if !self.quick_questions.is_empty() {
            lines.push(Line::from(Span::styled(
                "Hizli sorular",
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD),
            )));
            for (i, question) in self.quick_questions.iter().enumerate() {
                lines.push(Line::from(vec![
                    Span::styled(format!("F{:<3}", i + 1), Style::default().fg(Color::Cyan)),
                    Span::raw(question.clone()),
                ]));
            }
            lines.push(Line::default());
        }

        lines.push(Line::from(Span::styled(
            format!("v{}  ·  Esc: gezinme  ·  Ctrl+C: cikis", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::DarkGray),
        )));
        lines
    }
}

impl<'a> Component for LandingPage<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let lines = self.lines();
        let height = lines.len() as u16;

        let [centered] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(area);

        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), centered);
    }
}
