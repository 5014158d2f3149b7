use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Text};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

use crate::core::message::{Message, Originator, RenderMode};
use crate::tui::markdown;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

/// A single transcript entry: avatar + label in the border title, body inside.
///
/// Successful assistant replies are rendered as markdown; everything else
/// (user turns, error turns) is shown literally with control characters
/// escaped so they cannot drive the terminal.
#[derive(Clone, Copy)]
pub struct MessageView<'a> {
    pub message: &'a Message,
    pub show_timestamp: bool,
}

impl<'a> MessageView<'a> {
    pub fn new(message: &'a Message, show_timestamp: bool) -> Self {
        Self {
            message,
            show_timestamp,
        }
    }

    /// Rows this entry occupies at the given outer width.
    pub fn calculate_height(message: &Message, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            return 1;
        }
        let lines = body_paragraph(message).line_count(content_width) as u16;
        lines.max(1) + VERTICAL_OVERHEAD
    }

    fn title(&self) -> Line<'static> {
        let (avatar, label) = avatar(self.message.originator);
        let mut title = format!(" {avatar} {label} ");
        if self.show_timestamp {
            title = format!(" {avatar} {label} · {} ", self.message.created_at.format("%H:%M"));
        }
        Line::from(title)
    }
}

/// Avatar glyph and label keyed by originator.
pub fn avatar(originator: Originator) -> (&'static str, &'static str) {
    match originator {
        Originator::User => ("●", "you"),
        Originator::Assistant => ("✦", "assistant"),
    }
}

pub fn body_style(message: &Message) -> Style {
    match (message.originator, message.is_error) {
        (_, true) => Style::default().fg(Color::Red),
        (Originator::User, false) => Style::default().fg(Color::Cyan),
        (Originator::Assistant, false) => Style::default().fg(Color::White),
    }
}

/// Literal text for plain entries: tabs expanded, other control characters
/// other than newlines shown in escaped form.
pub fn escape_plain(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    for c in content.chars() {
        match c {
            '\n' => out.push('\n'),
            '\t' => out.push_str("    "),
            c if c.is_control() => out.extend(c.escape_default()),
            c => out.push(c),
        }
    }
    out
}

fn body_text(message: &Message) -> Text<'static> {
    let style = body_style(message);
    match message.render_mode() {
        RenderMode::Markdown => {
            markdown::render(message.content.trim(), style.fg.unwrap_or(Color::Reset))
        }
        RenderMode::Plain => Text::styled(escape_plain(message.content.trim()), style),
    }
}

fn body_paragraph(message: &Message) -> Paragraph<'static> {
    Paragraph::new(body_text(message)).wrap(Wrap { trim: true })
}

impl<'a> Widget for MessageView<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let style = body_style(self.message);
        let border_style = if self.message.is_error {
            style
        } else {
            style.add_modifier(Modifier::DIM)
        };

        let block = Block::bordered()
            .title(self.title())
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title_style(border_style)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner_area = block.inner(area);
        block.render(area, buf);
        body_paragraph(self.message).render(inner_area, buf);
    }
}
