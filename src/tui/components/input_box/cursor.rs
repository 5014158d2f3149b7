//! Cursor and scroll tracking for the input box.
//!
//! The text itself is owned by `InputBox`; every method takes it as `buffer`.

use ratatui::layout::Rect;

use super::text_wrap::{CONTENT_OFFSET_X, CONTENT_OFFSET_Y, inner_width, wrap_options, wrapped_lines};

pub(super) struct CursorState {
    /// Byte offset into the buffer (always on a char boundary)
    pub pos: usize,
    /// First wrapped line shown when the content is taller than the box
    pub scroll_offset: u16,
}

impl CursorState {
    pub fn new() -> Self {
        Self {
            pos: 0,
            scroll_offset: 0,
        }
    }

    pub fn reset(&mut self) {
        self.pos = 0;
        self.scroll_offset = 0;
    }

    /// (wrapped line, column) of the cursor.
    fn line_and_column(&self, buffer: &str, width: u16) -> (u16, u16) {
        if width == 0 {
            return (0, 0);
        }
        let before = &buffer[..self.pos];
        let line = wrapped_lines(before, width).len().saturating_sub(1) as u16;

        // textwrap trims trailing spaces, so count columns on the raw logical line.
        let logical_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let logical = &before[logical_start..];
        let segments = textwrap::wrap(logical, wrap_options(width));
        let column = match segments.split_last() {
            Some((_, earlier)) => {
                let consumed: usize = earlier.iter().map(|s| s.chars().count()).sum();
                logical.chars().count().saturating_sub(consumed)
            }
            None => 0,
        };
        (line, column as u16)
    }

    /// Scroll so the cursor's line stays inside a window of `max_lines`.
    pub fn follow(&mut self, buffer: &str, outer_width: u16, max_lines: u16) {
        let width = inner_width(outer_width);
        let total = wrapped_lines(buffer, width).len() as u16;
        if total <= max_lines {
            self.scroll_offset = 0;
            return;
        }
        let (line, _) = self.line_and_column(buffer, width);
        if line < self.scroll_offset {
            self.scroll_offset = line;
        } else if line >= self.scroll_offset + max_lines {
            self.scroll_offset = line + 1 - max_lines;
        }
    }

    /// Screen coordinates of the cursor inside `area`.
    pub fn screen_pos(&self, buffer: &str, area: Rect) -> (u16, u16) {
        let width = inner_width(area.width);
        let (line, column) = self.line_and_column(buffer, width);
        let row = line.saturating_sub(self.scroll_offset);
        (
            area.x + CONTENT_OFFSET_X + column.min(width),
            area.y + CONTENT_OFFSET_Y + row,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_at_end_of_single_line() {
        let mut cursor = CursorState::new();
        cursor.pos = 5;
        let area = Rect::new(0, 0, 40, 3);
        assert_eq!(cursor.screen_pos("hello", area), (2 + 5, 1));
    }

    #[test]
    fn cursor_after_newline_starts_next_row() {
        let mut cursor = CursorState::new();
        cursor.pos = 3;
        let area = Rect::new(0, 0, 40, 4);
        assert_eq!(cursor.screen_pos("ab\n", area), (2, 2));
    }

    #[test]
    fn follow_scrolls_to_cursor_line() {
        let buffer = "1\n2\n3\n4\n5\n6\n7";
        let mut cursor = CursorState::new();
        cursor.pos = buffer.len();
        cursor.follow(buffer, 40, 3);
        assert_eq!(cursor.scroll_offset, 4);

        cursor.pos = 0;
        cursor.follow(buffer, 40, 3);
        assert_eq!(cursor.scroll_offset, 0);
    }
}
