//! Cursor position tracking and horizontal scrolling for the InputBox.
//!
//! `CursorState` owns the cursor byte offset and the horizontal scroll
//! offset. All methods accept `buffer: &str` explicitly; the text itself is
//! owned by `InputBox`. Widths are display columns (`unicode-width`), so
//! wide characters keep the terminal cursor aligned.

use unicode_width::UnicodeWidthStr;

/// Offset from area edge to content (border width)
pub(super) const BORDER_OFFSET: u16 = 1;
/// Border (2) + padding (2) consumed horizontally by the bordered block
pub(super) const HORIZONTAL_OVERHEAD: u16 = 4;

/// Calculate the inner content width after subtracting border/padding overhead.
/// Returns 0 if the area is too narrow.
pub(super) fn inner_width(area_width: u16) -> u16 {
    area_width.saturating_sub(HORIZONTAL_OVERHEAD)
}

/// Find the byte offset of the previous character boundary before `pos` in `text`.
pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Find the byte offset of the next character boundary after `pos` in `text`.
pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

/// Cursor and scroll state, separated from the text buffer.
pub(super) struct CursorState {
    /// Cursor position as byte offset in buffer (0..=buffer.len())
    pub pos: usize,
    /// Display columns hidden to the left of the viewport
    pub scroll_cols: usize,
}

impl CursorState {
    pub fn new() -> Self {
        Self {
            pos: 0,
            scroll_cols: 0,
        }
    }

    /// Reset cursor to start (used when the field is cleared).
    pub fn reset(&mut self) {
        self.pos = 0;
        self.scroll_cols = 0;
    }

    /// Display column of the cursor within the whole buffer.
    pub fn column(&self, buffer: &str) -> usize {
        buffer[..self.pos].width()
    }

    /// Scroll just enough to keep the cursor inside a viewport `width` columns wide.
    pub fn update_scroll_offset(&mut self, buffer: &str, width: u16) {
        let width = width as usize;
        if width == 0 {
            self.scroll_cols = 0;
            return;
        }
        let col = self.column(buffer);
        if col < self.scroll_cols {
            self.scroll_cols = col;
        } else if col >= self.scroll_cols + width {
            self.scroll_cols = col + 1 - width;
        }
    }

    /// The slice of `buffer` visible in a viewport `width` columns wide.
    pub fn visible<'b>(&self, buffer: &'b str, width: u16) -> &'b str {
        let width = width as usize;
        let mut start = buffer.len();
        let mut end = buffer.len();
        let mut col = 0;
        for (i, c) in buffer.char_indices() {
            if col >= self.scroll_cols && start == buffer.len() {
                start = i;
            }
            let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
            if col + w > self.scroll_cols + width {
                end = i;
                break;
            }
            col += w;
        }
        if start > end {
            return "";
        }
        &buffer[start..end]
    }

    /// Screen column of the cursor relative to the content area's left edge.
    pub fn screen_col(&self, buffer: &str) -> u16 {
        self.column(buffer).saturating_sub(self.scroll_cols) as u16
    }
}
