use std::fmt;

use async_trait::async_trait;

use super::types::{ChatReply, HealthStatus};

/// Shown to the user when a failed exchange carries no description of its own.
pub const GENERIC_FAILURE: &str = "Failed to send message";

/// Errors that can occur while talking to the chat service.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportError {
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// Service answered with a failure status or an `error` field.
    /// `message` is the service's own description, or [`GENERIC_FAILURE`].
    Api { status: u16, message: String },
    /// The response body could not be decoded.
    Parse(String),
}

impl TransportError {
    /// The text shown to the user after `"Error: "`.
    pub fn description(&self) -> &str {
        match self {
            TransportError::Network(msg) => msg,
            TransportError::Api { message, .. } => message,
            TransportError::Parse(_) => GENERIC_FAILURE,
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Network(msg) => write!(f, "network error: {msg}"),
            TransportError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            TransportError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for TransportError {}

/// The two operations the client needs from the chat service.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Where requests go, for the status bar and logs.
    fn endpoint(&self) -> &str;

    /// `GET /health`.
    async fn health(&self) -> Result<HealthStatus, TransportError>;

    /// `POST /chat` with one user message.
    async fn send(&self, message: &str) -> Result<ChatReply, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn description_surfaces_service_message_verbatim() {
        let err = TransportError::Api {
            status: 429,
            message: "rate limited".to_string(),
        };
        assert_eq!(err.description(), "rate limited");
        assert_eq!(err.to_string(), "API error (HTTP 429): rate limited");
    }

    #[test]
    fn parse_failures_fall_back_to_generic_description() {
        let err = TransportError::Parse("expected value at line 1".to_string());
        assert_eq!(err.description(), GENERIC_FAILURE);
    }

    #[test]
    fn network_failures_use_transport_text() {
        let err = TransportError::Network("connection refused".to_string());
        assert_eq!(err.description(), "connection refused");
    }
}
