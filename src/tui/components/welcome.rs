//! # Welcome View
//!
//! Empty-state screen shown until the first turn: a greeting and the
//! configured suggestion prompts, each bound to Alt+N.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::tui::component::Component;

/// At most this many suggestions get a key binding (Alt+1..Alt+9).
pub const MAX_SUGGESTIONS: usize = 9;

pub struct WelcomeView<'a> {
    pub suggestions: &'a [String],
}

impl<'a> WelcomeView<'a> {
    pub fn new(suggestions: &'a [String]) -> Self {
        Self { suggestions }
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::from(Span::styled(
                "How can I help you today?",
                Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("chatbot v{}", env!("CARGO_PKG_VERSION")),
                Style::default().fg(Color::DarkGray),
            )),
        ];

        if !self.suggestions.is_empty() {
            lines.push(Line::default());
            for (i, suggestion) in self.suggestions.iter().take(MAX_SUGGESTIONS).enumerate() {
                lines.push(Line::from(vec![
                    Span::styled(format!("Alt+{}  ", i + 1), Style::default().fg(Color::DarkGray)),
                    Span::styled(suggestion.clone(), Style::default().fg(Color::White)),
                ]));
            }
        }
        lines
    }
}

impl<'a> Component for WelcomeView<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let lines = self.lines();
        let [centered] = Layout::vertical([Constraint::Length(lines.len() as u16)])
            .flex(Flex::Center)
            .areas(area);

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, centered);
    }
}
