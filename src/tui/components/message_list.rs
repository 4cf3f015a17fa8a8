//! # MessageList Component
//!
//! Scrollable view of the conversation log.
//!
//! ## Responsibilities
//!
//! - Display messages and typing placeholders in order
//! - Keep the newest entry in view (stick-to-bottom) until the user scrolls up
//! - Perform efficient layout caching (entry heights)
//!
//! ## Architecture
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&'a mut MessageListState` (persistent state) and `Conversation` (props).
//!
//! Since `Component::render` takes `&mut self`, we can safely mutate the state
//! (including layout cache and scroll state) during the render pass, aligning
//! with Ratatui's `StatefulWidget` pattern.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::conversation::{Conversation, Entry, TypingToken};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::{Message, TypingIndicator};
use crate::tui::event::TuiEvent;

/// Layout and scroll state for the message list.
/// Must be persisted in the parent TuiState.
pub struct MessageListState {
    /// Scroll offset and view state
    pub scroll_state: ScrollViewState,
    /// Cached layout measurements
    pub layout: LayoutCache,
    /// When true, auto-scroll to bottom on new content
    pub stick_to_bottom: bool,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            layout: LayoutCache::new(),
            stick_to_bottom: true, // Start attached to bottom
            viewport_height: 0,
        }
    }

    fn max_offset(&self) -> u16 {
        self.layout.total_height().saturating_sub(self.viewport_height)
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Clamp scroll and re-engage auto-scroll if the user has reached the bottom.
    /// Called on scroll-down events so that scrolling past the end re-pins to bottom.
    pub fn repin_if_at_bottom(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Jump to the newest entry and follow new content again.
    pub fn scroll_to_end(&mut self) {
        self.stick_to_bottom = true;
        self.scroll_state.scroll_to_bottom();
    }

    pub fn scroll_to_top(&mut self) {
        self.stick_to_bottom = false;
        self.scroll_state.scroll_to_top();
    }

    /// True when the user has scrolled away from the newest entry.
    pub fn has_unseen_content(&self) -> bool {
        !self.stick_to_bottom && self.scroll_state.offset().y < self.max_offset()
    }
}

/// Scrollable conversation view component.
/// Created fresh each frame with references to state and data.
pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub conversation: &'a Conversation,
    pub render_markdown: bool,
    pub spinner_frame: usize,
}

impl<'a> MessageList<'a> {
    pub fn new(
        state: &'a mut MessageListState,
        conversation: &'a Conversation,
        render_markdown: bool,
        spinner_frame: usize,
    ) -> Self {
        Self {
            state,
            conversation,
            render_markdown,
            spinner_frame,
        }
    }
}

/// Height of one entry at the given width. The welcome placeholder is drawn
/// by the landing page, never inside the list.
fn entry_height(entry: &Entry, render_markdown: bool, width: u16) -> u16 {
    match entry {
        Entry::Welcome => 0,
        Entry::Message(msg) => Message::calculate_height(msg, render_markdown, width),
        Entry::Typing(_) => TypingIndicator::HEIGHT,
    }
}

impl<'a> Component for MessageList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar safe area
        let entries = self.conversation.entries();

        // 1. Update Layout Cache (Internal Mutation)
        let layout = &mut self.state.layout;
        let reusable = layout.reusable_count(entries, content_width, self.render_markdown);
        layout.truncate(reusable);
        for entry in entries.iter().skip(reusable) {
            layout.push(
                SlotKey::of(entry),
                entry_height(entry, self.render_markdown, content_width),
            );
        }
        layout.rebuild_prefix_heights();
        layout.update_metadata(content_width, self.render_markdown);

        let total_height = self.state.layout.total_height();

        // 2. Pin to the newest entry, or clamp so we never overscroll.
        // Must happen before the visible range is taken from the offset.
        self.state.viewport_height = area.height;
        if self.state.stick_to_bottom {
            let max_y = self.state.max_offset();
            self.state.scroll_state.set_offset(Position { x: 0, y: max_y });
        } else {
            self.state.clamp_scroll();
        }

        let scroll_offset = self.state.scroll_state.offset().y;
        let visible_range = self.state.layout.visible_range(scroll_offset, area.height);

        // 3. Render visible entries into a ScrollView
        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Always)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = if visible_range.start > 0 {
            self.state.layout.prefix_heights[visible_range.start - 1]
        } else {
            0
        };

        for i in visible_range {
            let height = self.state.layout.heights[i];
            if height == 0 {
                continue;
            }
            let rect = Rect::new(0, y_offset, content_width, height);
            match &entries[i] {
                Entry::Message(msg) => {
                    scroll_view.render_widget(Message::new(msg, self.render_markdown), rect);
                }
                Entry::Typing(_) => {
                    scroll_view.render_widget(
                        TypingIndicator {
                            spinner_frame: self.spinner_frame,
                        },
                        rect,
                    );
                }
                Entry::Welcome => {}
            }
            y_offset = y_offset.saturating_add(height);
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

/// EventHandler is implemented on `MessageListState` rather than `MessageList` because:
/// 1. Event handling requires persistent state (scroll position, stick_to_bottom flag)
/// 2. `MessageList` is recreated each frame with fresh props, so it can't hold state
impl EventHandler for MessageListState {
    type Event = (); // Scrolling is handled internally

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollToBottom => self.scroll_to_end(),
            _ => {}
        }
        None
    }
}

/// Identity of a cached entry. Messages are immutable once appended, so
/// (role, error flag, length) is enough to tell a cached slot from a new one;
/// typing placeholders carry their own token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKey {
    Welcome,
    Typing(TypingToken),
    Message {
        user: bool,
        is_error: bool,
        len: usize,
    },
}

impl SlotKey {
    pub fn of(entry: &Entry) -> Self {
        match entry {
            Entry::Welcome => SlotKey::Welcome,
            Entry::Typing(token) => SlotKey::Typing(*token),
            Entry::Message(msg) => SlotKey::Message {
                user: msg.role == crate::core::conversation::Role::User,
                is_error: msg.is_error,
                len: msg.content.len(),
            },
        }
    }
}

/// Cached layout measurements
pub struct LayoutCache {
    pub heights: Vec<u16>,
    pub prefix_heights: Vec<u16>,
    keys: Vec<SlotKey>,
    content_width: u16,
    render_markdown: bool,
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutCache {
    pub fn new() -> Self {
        Self {
            heights: Vec::new(),
            prefix_heights: Vec::new(),
            keys: Vec::new(),
            content_width: 0,
            render_markdown: true,
        }
    }

    /// Number of leading cached heights still valid for `entries`.
    ///
    /// Placeholder removal shifts later entries, so this is the longest
    /// common prefix of cached and current slots rather than a count check.
    pub fn reusable_count(&self, entries: &[Entry], content_width: u16, render_markdown: bool) -> usize {
        if self.content_width != content_width || self.render_markdown != render_markdown {
            return 0;
        }
        self.keys
            .iter()
            .zip(entries)
            .take_while(|(key, entry)| **key == SlotKey::of(entry))
            .count()
    }

    pub fn truncate(&mut self, len: usize) {
        self.heights.truncate(len);
        self.keys.truncate(len);
    }

    pub fn push(&mut self, key: SlotKey, height: u16) {
        self.keys.push(key);
        self.heights.push(height);
    }

    pub fn update_metadata(&mut self, content_width: u16, render_markdown: bool) {
        self.content_width = content_width;
        self.render_markdown = render_markdown;
    }

    /// Sum of all entry heights, saturating at the canvas limit.
    pub fn total_height(&self) -> u16 {
        self.heights.iter().fold(0u16, |acc, &h| acc.saturating_add(h))
    }

    pub fn rebuild_prefix_heights(&mut self) {
        self.prefix_heights = self
            .heights
            .iter()
            .scan(0u16, |acc, &h| {
                *acc = acc.saturating_add(h);
                Some(*acc)
            })
            .collect();
    }

    pub fn visible_range(&self, scroll_offset: u16, viewport_height: u16) -> std::ops::Range<usize> {
        let buffer = viewport_height / 2;
        let buffered_start = scroll_offset.saturating_sub(buffer);
        let buffered_end = scroll_offset
            .saturating_add(viewport_height)
            .saturating_add(buffer);

        let start = self
            .prefix_heights
            .partition_point(|&end| end <= buffered_start);
        let end = self
            .prefix_heights
            .partition_point(|&end| end < buffered_end)
            .saturating_add(1)
            .min(self.prefix_heights.len());

        start..end
    }
}
