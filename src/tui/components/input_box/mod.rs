//! # InputBox Component
//!
//! Multi-line text entry at the bottom of the screen.
//!
//! The buffer is internal state; `send_enabled` and `max_lines` are props
//! refreshed by the parent before every render. Enter only produces
//! `InputEvent::Submit` while sending is enabled, so text typed during an
//! outstanding exchange stays in the box until it can be sent.

mod cursor;
mod text_wrap;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState};

use crate::core::input::fit_height;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use cursor::CursorState;
use text_wrap::{
    VERTICAL_OVERHEAD, inner_width, next_char_boundary, prev_char_boundary, wrap_line_count,
    wrapped_lines,
};

const HINT: &str = " Enter to send · Shift+Enter newline ";

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Enter pressed with sending enabled; carries the raw buffer
    Submit(String),
    /// Buffer or cursor changed
    ContentChanged,
}

pub struct InputBox {
    pub buffer: String,
    /// Prop: whether Enter may submit
    pub send_enabled: bool,
    /// Prop: visible rows before the box starts scrolling
    pub max_lines: u16,
    cursor: CursorState,
}

impl InputBox {
    pub fn new(max_lines: u16) -> Self {
        Self {
            buffer: String::new(),
            send_enabled: false,
            max_lines: max_lines.max(1),
            cursor: CursorState::new(),
        }
    }

    /// Height for the current buffer, growing with content up to `max_lines` rows.
    pub fn calculate_height(&self, outer_width: u16) -> u16 {
        let content = wrap_line_count(&self.buffer, inner_width(outer_width));
        fit_height(content, self.max_lines) + VERTICAL_OVERHEAD
    }

    fn visible_lines(&self, outer_width: u16) -> Vec<Line<'static>> {
        wrapped_lines(&self.buffer, inner_width(outer_width))
            .into_iter()
            .skip(self.cursor.scroll_offset as usize)
            .take(self.max_lines as usize)
            .map(Line::from)
            .collect()
    }

    fn render_scrollbar(&self, frame: &mut Frame, area: Rect) {
        let total = wrap_line_count(&self.buffer, inner_width(area.width));
        if total <= self.max_lines {
            return;
        }
        let max_scroll = total - self.max_lines;
        let mut state = ScrollbarState::default()
            .content_length(max_scroll as usize)
            .position(self.cursor.scroll_offset as usize);
        let track = Rect {
            x: area.x + area.width.saturating_sub(1),
            y: area.y + 1,
            width: 1,
            height: area.height.saturating_sub(VERTICAL_OVERHEAD),
        };
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            track,
            &mut state,
        );
    }

    /// Empties the buffer and resets cursor and scroll.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor.reset();
    }

    fn changed(&self) -> Option<InputEvent> {
        Some(InputEvent::ContentChanged)
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.cursor.follow(&self.buffer, area.width, self.max_lines);

        let border = if self.send_enabled {
            Color::Green
        } else {
            Color::DarkGray
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border))
            .title(HINT)
            .padding(ratatui::widgets::Padding::horizontal(1));

        let input = Paragraph::new(self.visible_lines(area.width)).block(block);
        frame.render_widget(input, area);
        self.render_scrollbar(frame, area);

        frame.set_cursor_position(self.cursor.screen_pos(&self.buffer, area));
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor.pos, *c);
                self.cursor.pos += c.len_utf8();
                self.changed()
            }
            TuiEvent::Newline => {
                self.buffer.insert(self.cursor.pos, '\n');
                self.cursor.pos += 1;
                self.changed()
            }
            TuiEvent::Paste(text) => {
                let text = text.replace("\r\n", "\n").replace('\r', "\n");
                self.buffer.insert_str(self.cursor.pos, &text);
                self.cursor.pos += text.len();
                self.changed()
            }
            TuiEvent::Backspace => {
                if self.cursor.pos == 0 {
                    return None;
                }
                let prev = prev_char_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(prev..self.cursor.pos);
                self.cursor.pos = prev;
                self.changed()
            }
            TuiEvent::Delete => {
                if self.cursor.pos >= self.buffer.len() {
                    return None;
                }
                let next = next_char_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(self.cursor.pos..next);
                self.changed()
            }
            TuiEvent::CursorLeft => (self.cursor.pos > 0).then(|| {
                self.cursor.pos = prev_char_boundary(&self.buffer, self.cursor.pos);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorRight => (self.cursor.pos < self.buffer.len()).then(|| {
                self.cursor.pos = next_char_boundary(&self.buffer, self.cursor.pos);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorHome => {
                let line_start = self.buffer[..self.cursor.pos]
                    .rfind('\n')
                    .map(|i| i + 1)
                    .unwrap_or(0);
                (self.cursor.pos != line_start).then(|| {
                    self.cursor.pos = line_start;
                    InputEvent::ContentChanged
                })
            }
            TuiEvent::CursorEnd => {
                let line_end = self.buffer[self.cursor.pos..]
                    .find('\n')
                    .map(|i| self.cursor.pos + i)
                    .unwrap_or(self.buffer.len());
                (self.cursor.pos != line_end).then(|| {
                    self.cursor.pos = line_end;
                    InputEvent::ContentChanged
                })
            }
            TuiEvent::Submit if self.send_enabled => {
                let text = std::mem::take(&mut self.buffer);
                self.cursor.reset();
                Some(InputEvent::Submit(text))
            }
            _ => None,
        }
    }
}
