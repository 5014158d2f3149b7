//! # TitleBar Component
//!
//! Single-line status bar: service endpoint, what the startup probe found,
//! whether a reply is being composed, and a "↓ New" marker when entries sit
//! below the scrolled-away view.
//!
//! Purely presentational. All props come from elsewhere:
//! - `endpoint`: the transport
//! - `connection`, `composing`: core `Conversation`
//! - `has_unseen_content`: TUI scroll state

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

use crate::core::state::ConnectionStatus;
use crate::tui::component::Component;

pub struct TitleBar<'a> {
    pub endpoint: &'a str,
    pub connection: &'a ConnectionStatus,
    pub composing: bool,
    pub has_unseen_content: bool,
}

impl<'a> TitleBar<'a> {
    pub fn new(
        endpoint: &'a str,
        connection: &'a ConnectionStatus,
        composing: bool,
        has_unseen_content: bool,
    ) -> Self {
        Self {
            endpoint,
            connection,
            composing,
            has_unseen_content,
        }
    }

    fn connection_style(&self) -> Style {
        match self.connection {
            ConnectionStatus::Ready => Style::default().fg(Color::Green),
            ConnectionStatus::Unknown => Style::default().fg(Color::DarkGray),
            ConnectionStatus::NotConfigured | ConnectionStatus::Unreachable(_) => {
                Style::default().fg(Color::Yellow)
            }
        }
    }

    /// Builds the line, dropping the endpoint first when `width` is too small.
    pub fn line(&self, width: u16) -> Line<'static> {
        let mut tail = vec![
            Span::raw(" | "),
            Span::styled(self.connection.label().to_string(), self.connection_style()),
        ];
        if self.composing {
            tail.push(Span::raw(" | "));
            tail.push(Span::styled("composing…", Style::default().fg(Color::Magenta)));
        }
        if self.has_unseen_content {
            tail.push(Span::raw(" | ↓ New"));
        }

        let head = format!("chatbot ({})", self.endpoint);
        let tail_width: usize = tail.iter().map(|s| s.content.width()).sum();
        let head = if head.width() + tail_width > width as usize {
            "chatbot".to_string()
        } else {
            head
        };

        let mut spans = vec![Span::raw(head)];
        spans.extend(tail);
        Line::from(spans)
    }
}

impl<'a> Component for TitleBar<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(self.line(area.width), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered(bar: &mut TitleBar<'_>, width: u16) -> String {
        let backend = TestBackend::new(width, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| bar.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_title_bar_shows_endpoint_and_status() {
        let status = ConnectionStatus::Ready;
        let mut bar = TitleBar::new("http://localhost:5000", &status, false, false);
        let text = rendered(&mut bar, 80);
        assert!(text.contains("http://localhost:5000"));
        assert!(text.contains("connected"));
        assert!(!text.contains("composing"));
        assert!(!text.contains("↓ New"));
    }

    #[test]
    fn test_title_bar_composing_and_unseen() {
        let status = ConnectionStatus::NotConfigured;
        let mut bar = TitleBar::new("http://localhost:5000", &status, true, true);
        let text = rendered(&mut bar, 100);
        assert!(text.contains("not configured"));
        assert!(text.contains("composing"));
        assert!(text.contains("↓ New"));
    }

    #[test]
    fn test_title_bar_drops_endpoint_when_narrow() {
        let status = ConnectionStatus::Unreachable("refused".to_string());
        let bar = TitleBar::new("http://a-very-long-hostname.example.com:5000", &status, false, false);
        let line = bar.line(30);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "chatbot | offline");
    }
}
