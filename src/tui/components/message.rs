use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

use crate::core::conversation::{Message as ChatMessage, MetaLine, Role};
use crate::tui::component::Component;
use crate::tui::markdown;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

const USER_COLOR: Color = Color::Green;
const ASSISTANT_COLOR: Color = Color::Blue;
const ERROR_COLOR: Color = Color::Red;

/// A stateless component that renders one conversation message.
///
/// # Styling
///
/// - **User** (green): literal text, never interpreted as markdown
/// - **Assistant** (blue): markdown, or literal text when rendering is off
/// - **Error** (red): assistant text with the error modifier and no metadata
///
/// Non-error assistant messages may end with a metadata row holding the
/// intent badge and/or the `"<n> kayit"` row annotation.
///
/// # Height Calculation
///
/// [`calculate_height`](Self::calculate_height) builds the same `Text` the
/// widget renders and asks `Paragraph::line_count` for the wrapped height,
/// so the parent `MessageList` can lay out the scroll canvas up front.
#[derive(Clone, Copy)]
pub struct Message<'a> {
    pub message: &'a ChatMessage,
    pub render_markdown: bool,
}

impl<'a> Message<'a> {
    pub fn new(message: &'a ChatMessage, render_markdown: bool) -> Self {
        Self {
            message,
            render_markdown,
        }
    }

    pub fn calculate_height(message: &ChatMessage, render_markdown: bool, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Terminal too narrow for borders + padding; still occupy a row.
            return 1;
        }

        let body = body_text(message, render_markdown);
        let body_lines = Paragraph::new(body)
            .wrap(Wrap { trim: false })
            .line_count(content_width);
        let body_lines = u16::try_from(body_lines).unwrap_or(u16::MAX);
        let meta_lines = u16::from(message.meta_line().is_some());

        body_lines
            .max(1)
            .saturating_add(meta_lines)
            .saturating_add(VERTICAL_OVERHEAD)
    }
}

fn accent(message: &ChatMessage) -> Color {
    match (message.role, message.is_error) {
        (_, true) => ERROR_COLOR,
        (Role::User, false) => USER_COLOR,
        (Role::Assistant, false) => ASSISTANT_COLOR,
    }
}

fn title(role: Role) -> &'static str {
    match role {
        Role::User => "siz",
        Role::Assistant => "diagora",
    }
}

fn body_text(message: &ChatMessage, render_markdown: bool) -> Text<'static> {
    let fg = accent(message);
    let content = message.content.trim();
    match message.role {
        Role::Assistant if render_markdown => markdown::render(content, fg),
        _ => markdown::plain(content, fg),
    }
}

/// `[Requests]  12 kayit`
pub fn meta_spans(meta: &MetaLine) -> Line<'static> {
    let mut spans = Vec::new();
    if let Some(badge) = &meta.intent_badge {
        spans.push(Span::styled(
            format!(" {badge} "),
            Style::default().fg(Color::Black).bg(Color::Magenta),
        ));
    }
    if let Some(rows) = meta.row_annotation() {
        if !spans.is_empty() {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(rows, Style::default().fg(Color::DarkGray)));
    }
    Line::from(spans)
}

impl<'a> Widget for Message<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let color = accent(self.message);
        let mut border_style = Style::default().fg(color).add_modifier(Modifier::DIM);
        if self.message.is_error {
            border_style = border_style.remove_modifier(Modifier::DIM).add_modifier(Modifier::BOLD);
        }

        let block = Block::bordered()
            .title(title(self.message.role))
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title_style(border_style)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner_area = block.inner(area);
        block.render(area, buf);

        let meta = self.message.meta_line();
        let [body_area, meta_area] = Layout::vertical([
            Constraint::Min(0),
            Constraint::Length(u16::from(meta.is_some())),
        ])
        .areas(inner_area);

        Paragraph::new(body_text(self.message, self.render_markdown))
            .wrap(Wrap { trim: false })
            .render(body_area, buf);

        if let Some(meta) = meta {
            meta_spans(&meta).render(meta_area, buf);
        }
    }
}

impl<'a> Component for Message<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}

/// Content-less placeholder shown while a question is in flight.
#[derive(Clone, Copy)]
pub struct TypingIndicator {
    pub spinner_frame: usize,
}

impl TypingIndicator {
    pub const HEIGHT: u16 = 1 + VERTICAL_OVERHEAD;

    /// Three dots with one lit, cycling with the spinner frame.
    pub fn dots(spinner_frame: usize) -> Line<'static> {
        let lit = spinner_frame % 3;
        let spans: Vec<Span<'static>> = (0..3)
            .map(|i| {
                let style = if i == lit {
                    Style::default().fg(ASSISTANT_COLOR).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                Span::styled(if i < 2 { "● " } else { "●" }, style)
            })
            .collect();
        Line::from(spans)
    }
}

impl Widget for TypingIndicator {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let border_style = Style::default().fg(ASSISTANT_COLOR).add_modifier(Modifier::DIM);
        let block = Block::bordered()
            .title(title(Role::Assistant))
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title_style(border_style)
            .padding(Padding::horizontal(CONTENT_PAD_H));
        let inner_area = block.inner(area);
        block.render(area, buf);
        Self::dots(self.spinner_frame).render(inner_area, buf);
    }
}
