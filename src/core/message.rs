use chrono::{DateTime, Local};

/// Who authored a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Originator {
    User,
    Assistant,
}

/// How an entry's content is projected onto the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Formatted rich text (markdown).
    Markdown,
    /// Literal text with control characters escaped.
    Plain,
}

/// One turn of the conversation. Immutable once appended to the transcript.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub content: String,
    pub originator: Originator,
    pub is_error: bool,
    pub created_at: DateTime<Local>,
}

impl Message {
    pub fn new(content: impl Into<String>, originator: Originator, is_error: bool) -> Self {
        Self {
            content: content.into(),
            originator,
            is_error,
            created_at: Local::now(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(content, Originator::User, false)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(content, Originator::Assistant, false)
    }

    /// An assistant-origin entry describing a failed exchange.
    pub fn failure(description: &str) -> Self {
        Self::new(format!("Error: {description}"), Originator::Assistant, true)
    }

    /// Only successful assistant replies are rendered as markdown.
    pub fn render_mode(&self) -> RenderMode {
        match (self.originator, self.is_error) {
            (Originator::Assistant, false) => RenderMode::Markdown,
            _ => RenderMode::Plain,
        }
    }
}
