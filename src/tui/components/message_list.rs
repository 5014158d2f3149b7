//! # MessageList Component
//!
//! Scrollable transcript view.
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&'a mut MessageListState` (persistent scroll state and layout cache) and
//! the transcript slice (props). New entries pull the view to the bottom
//! unless the user has scrolled away; scrolling back down re-pins it.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use ratatui::widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::message::Message;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::MessageView;
use crate::tui::event::TuiEvent;

/// Scroll position is tracked in `u32` rows over the whole transcript; only
/// the entries around the viewport are laid out in a `u16` `ScrollView`.
pub struct MessageListState {
    pub layout: LayoutCache,
    /// First transcript row shown at the top of the viewport.
    pub scroll_offset: u32,
    /// When true, auto-scroll to the newest entry.
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
            layout: LayoutCache::new(),
            scroll_offset: 0,
            stick_to_bottom: true,
            viewport_height: 0,
        }
    }

    fn max_offset(&self) -> u32 {
        self.layout
            .total_height()
            .saturating_sub(self.viewport_height as u32)
    }

    /// Keep the offset within the content so the view never scrolls past the last entry.
    pub fn clamp_scroll(&mut self) {
        self.scroll_offset = self.scroll_offset.min(self.max_offset());
    }

    /// Re-engage auto-scroll once the user scrolls back to the bottom.
    pub fn repin_if_at_bottom(&mut self) {
        let max_y = self.max_offset();
        if self.scroll_offset >= max_y {
            self.stick_to_bottom = true;
            self.scroll_offset = max_y;
        }
    }

    /// True when entries exist below the visible window.
    pub fn has_unseen_content(&self) -> bool {
        !self.stick_to_bottom && self.scroll_offset < self.max_offset()
    }

    fn scroll_up_by(&mut self, rows: u32) {
        self.scroll_offset = self.scroll_offset.saturating_sub(rows);
        self.stick_to_bottom = false;
    }

    fn scroll_down_by(&mut self, rows: u32) {
        self.scroll_offset = self.scroll_offset.saturating_add(rows).min(self.max_offset());
        self.repin_if_at_bottom();
    }
}

pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub messages: &'a [Message],
    pub show_timestamps: bool,
}

impl<'a> MessageList<'a> {
    pub fn new(state: &'a mut MessageListState, messages: &'a [Message], show_timestamps: bool) -> Self {
        Self {
            state,
            messages,
            show_timestamps,
        }
    }

    fn render_scrollbar(&self, frame: &mut Frame, area: Rect) {
        let max_offset = self.state.max_offset();
        if max_offset == 0 {
            return;
        }
        let mut scrollbar_state = ScrollbarState::new(max_offset as usize)
            .position(self.state.scroll_offset as usize)
            .viewport_content_length(area.height as usize);
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            area,
            &mut scrollbar_state,
        );
    }
}

impl<'a> Component for MessageList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for the scrollbar

        self.state.layout.measure(self.messages, content_width);
        self.state.viewport_height = area.height;
        if self.state.stick_to_bottom {
            self.state.scroll_offset = self.state.max_offset();
        } else {
            self.state.clamp_scroll();
        }

        let layout = &self.state.layout;
        let visible = layout.visible_range(self.state.scroll_offset, area.height);
        let window_top = layout.start_of(visible.start);
        let window_height = (layout.start_of(visible.end) - window_top).min(u16::MAX as u32) as u16;

        let mut scroll_view = ScrollView::new(Size::new(content_width, window_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Never)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y: u16 = 0;
        for i in visible {
            let height = layout.heights[i];
            if window_height - y < height {
                break;
            }
            let rect = Rect::new(0, y, content_width, height);
            scroll_view.render_widget(MessageView::new(&self.messages[i], self.show_timestamps), rect);
            y += height;
        }

        let offset_in_window = (self.state.scroll_offset - window_top).min(u16::MAX as u32) as u16;
        let mut window_state = ScrollViewState::default();
        window_state.set_offset(Position { x: 0, y: offset_in_window });
        frame.render_stateful_widget(scroll_view, area, &mut window_state);

        self.render_scrollbar(frame, area);
    }
}

/// Scroll handling lives on the persistent state, since `MessageList` is
/// rebuilt every frame.
impl EventHandler for MessageListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        let page = self.viewport_height.max(1) as u32;
        match event {
            TuiEvent::ScrollUp => self.scroll_up_by(1),
            TuiEvent::ScrollDown => self.scroll_down_by(1),
            TuiEvent::ScrollPageUp => self.scroll_up_by(page),
            TuiEvent::ScrollPageDown => self.scroll_down_by(page),
            TuiEvent::ScrollToBottom => {
                self.stick_to_bottom = true;
                self.scroll_offset = self.max_offset();
            }
            _ => {}
        }
        None
    }
}

/// Entry heights for the current width. Entries never change once appended,
/// so only new entries are measured unless the width changes.
///
/// Prefix sums are `u32`: a long session easily outgrows `u16` rows.
pub struct LayoutCache {
    pub heights: Vec<u16>,
    pub prefix_heights: Vec<u32>,
    content_width: u16,
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
            content_width: 0,
        }
    }

    pub fn measure(&mut self, messages: &[Message], content_width: u16) {
        if content_width != self.content_width || messages.len() < self.heights.len() {
            self.heights.clear();
            self.prefix_heights.clear();
            self.content_width = content_width;
        }
        for message in &messages[self.heights.len()..] {
            let height = MessageView::calculate_height(message, content_width);
            let end = self.total_height().saturating_add(height as u32);
            self.heights.push(height);
            self.prefix_heights.push(end);
        }
    }

    pub fn total_height(&self) -> u32 {
        self.prefix_heights.last().copied().unwrap_or(0)
    }

    /// First row of entry `index`; `heights.len()` gives the total height.
    pub fn start_of(&self, index: usize) -> u32 {
        match index {
            0 => 0,
            i => self.prefix_heights[i - 1],
        }
    }

    /// Entries overlapping the viewport, padded by half a screen each way.
    pub fn visible_range(&self, scroll_offset: u32, viewport_height: u16) -> std::ops::Range<usize> {
        let pad = viewport_height as u32 / 2;
        let top = scroll_offset.saturating_sub(pad);
        let bottom = scroll_offset
            .saturating_add(viewport_height as u32)
            .saturating_add(pad);

        let start = self.prefix_heights.partition_point(|&end| end <= top);
        let end = self
            .prefix_heights
            .partition_point(|&end| end < bottom)
            .saturating_add(1)
            .min(self.prefix_heights.len());
        start..end.max(start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn transcript(n: usize) -> Vec<Message> {
        (0..n).map(|i| Message::user(format!("message {i}"))).collect()
    }

    #[test]
    fn measure_only_appends_new_entries() {
        let mut cache = LayoutCache::new();
        let mut messages = transcript(2);
        cache.measure(&messages, 40);
        assert_eq!(cache.heights, vec![3, 3]);
        assert_eq!(cache.prefix_heights, vec![3, 6]);

        messages.push(Message::assistant("line one\n\nline three"));
        cache.measure(&messages, 40);
        assert_eq!(cache.heights.len(), 3);
        assert_eq!(cache.total_height(), 6 + cache.heights[2] as u32);
    }

    #[test]
    fn width_change_remeasures() {
        let mut cache = LayoutCache::new();
        let messages = vec![Message::user("Hello world")];
        cache.measure(&messages, 40);
        assert_eq!(cache.heights, vec![3]);
        cache.measure(&messages, 9);
        assert_eq!(cache.heights, vec![4]);
    }

    #[test]
    fn visible_range_covers_viewport() {
        let mut cache = LayoutCache::new();
        cache.measure(&transcript(20), 40); // 20 entries × 3 rows
        let range = cache.visible_range(30, 10);
        assert!(range.start <= 10 && range.end > 13, "{range:?}");
        assert!(range.end <= 20);
    }

    #[test]
    fn scroll_up_unpins_and_scroll_to_bottom_repins() {
        let mut state = MessageListState::new();
        state.handle_event(&TuiEvent::ScrollUp);
        assert!(!state.stick_to_bottom);
        state.handle_event(&TuiEvent::ScrollToBottom);
        assert!(state.stick_to_bottom);
    }

    #[test]
    fn renders_newest_entry_when_pinned() {
        let backend = TestBackend::new(40, 8);
        let mut terminal = Terminal::new(backend).unwrap();
        let messages = transcript(10);
        let mut state = MessageListState::new();

        terminal
            .draw(|f| MessageList::new(&mut state, &messages, false).render(f, f.area()))
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("message 9"));
        assert!(!text.contains("message 0"));
    }

    #[test]
    fn page_scroll_stops_at_bottom_and_repins() {
        let mut state = MessageListState::new();
        state.layout.measure(&transcript(20), 40); // 60 rows
        state.viewport_height = 10;
        state.scroll_offset = 0;
        state.stick_to_bottom = false;

        state.handle_event(&TuiEvent::ScrollPageDown);
        assert_eq!(state.scroll_offset, 10);
        assert!(state.has_unseen_content());

        for _ in 0..10 {
            state.handle_event(&TuiEvent::ScrollPageDown);
        }
        assert_eq!(state.scroll_offset, 50);
        assert!(state.stick_to_bottom);
        assert!(!state.has_unseen_content());
    }

    #[test]
    fn transcript_taller_than_u16_rows_still_shows_newest_entry() {
        let messages = transcript(23_000); // 3 rows each
        let mut state = MessageListState::new();
        let backend = TestBackend::new(40, 10);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal
            .draw(|f| MessageList::new(&mut state, &messages, false).render(f, f.area()))
            .unwrap();

        assert!(state.layout.total_height() > u16::MAX as u32);
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("message 22999"));
    }

    #[test]
    fn scrolled_far_up_renders_middle_of_long_transcript() {
        let messages = transcript(23_000);
        let mut state = MessageListState::new();
        state.stick_to_bottom = false;
        state.scroll_offset = 3 * 21_000;
        let backend = TestBackend::new(40, 9);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal
            .draw(|f| MessageList::new(&mut state, &messages, false).render(f, f.area()))
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("message 21000"));
        assert!(text.contains("message 21002"));
        assert!(!text.contains("message 22999"));
    }
}
