use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::message::Originator;
use crate::tui::component::Component;
use crate::tui::components::message::avatar;

const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// One-row "assistant is typing" cue shown while a reply is awaited.
pub struct ComposingIndicator {
    pub spinner_frame: usize,
}

impl ComposingIndicator {
    pub fn line(&self) -> Line<'static> {
        let (glyph, label) = avatar(Originator::Assistant);
        let frame = SPINNER[self.spinner_frame % SPINNER.len()];
        Line::from(vec![
            Span::styled(format!(" {glyph} "), Style::default().fg(Color::Magenta)),
            Span::styled(
                format!("{label} is typing {frame}"),
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            ),
        ])
    }
}

impl Component for ComposingIndicator {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Paragraph::new(self.line()), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spinner_wraps_around() {
        let a = ComposingIndicator { spinner_frame: 0 }.line();
        let b = ComposingIndicator { spinner_frame: SPINNER.len() }.line();
        assert_eq!(a, b);
    }

    #[test]
    fn mentions_typing() {
        let line = ComposingIndicator { spinner_frame: 3 }.line();
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(text.contains("assistant is typing"));
    }
}
