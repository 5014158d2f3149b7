//! # Conversation State
//!
//! Everything the client knows about the current session, as one queryable
//! value. Front ends project this onto the screen; they never own it.
//!
//! ```text
//! Conversation
//! ├── messages: Vec<Message>        // transcript, display order
//! ├── input: String                 // mirror of the input control
//! ├── in_flight: bool               // one exchange outstanding
//! ├── composing: bool               // composing indicator visible
//! ├── connection: ConnectionStatus  // result of the startup probe
//! └── diagnostics: Vec<Diagnostic>  // local, never shown in the transcript
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use log::warn;

use crate::core::input;
use crate::core::message::Message;

/// Local notes about the service's health. Logged, recorded, never rendered
/// into the transcript.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// The service is reachable but its AI backend is not set up.
    NotConfigured,
    /// The health probe could not reach the service.
    ConnectionFailed(String),
}

/// What the startup probe found out.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ConnectionStatus {
    #[default]
    Unknown,
    Ready,
    NotConfigured,
    Unreachable(String),
}

impl ConnectionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ConnectionStatus::Unknown => "checking",
            ConnectionStatus::Ready => "connected",
            ConnectionStatus::NotConfigured => "not configured",
            ConnectionStatus::Unreachable(_) => "offline",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Conversation {
    pub messages: Vec<Message>,
    pub input: String,
    pub in_flight: bool,
    pub composing: bool,
    pub connection: ConnectionStatus,
    pub diagnostics: Vec<Diagnostic>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// The welcome view is shown iff the transcript is empty.
    pub fn welcome_visible(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn transcript_visible(&self) -> bool {
        !self.welcome_visible()
    }

    pub fn send_enabled(&self) -> bool {
        input::send_enabled(&self.input, self.in_flight)
    }

    pub fn append(&mut self, message: Message) -> &Message {
        self.messages.push(message);
        self.messages.last().expect("just pushed")
    }

    pub(crate) fn emit(&mut self, diagnostic: Diagnostic) {
        match &diagnostic {
            Diagnostic::NotConfigured => warn!("API key not configured"),
            Diagnostic::ConnectionFailed(e) => warn!("Connection failed: {}", e),
        }
        self.diagnostics.push(diagnostic);
    }
}
