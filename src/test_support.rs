//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Mutex;

use async_trait::async_trait;

use crate::transport::{ChatReply, ChatTransport, HealthStatus, TransportError};

/// An in-memory transport that answers every call with a canned result and
/// records what was sent.
pub struct ScriptedTransport {
    health: Result<HealthStatus, TransportError>,
    reply: Result<ChatReply, TransportError>,
    sent: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub fn replying(reply: Result<ChatReply, TransportError>) -> Self {
        Self {
            health: Ok(HealthStatus {
                status: Some("healthy".to_string()),
                ai_configured: true,
            }),
            reply,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn with_health(health: Result<HealthStatus, TransportError>) -> Self {
        Self {
            health,
            ..Self::replying(Ok(ChatReply::new("ok")))
        }
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatTransport for ScriptedTransport {
    fn endpoint(&self) -> &str {
        "scripted"
    }

    async fn health(&self) -> Result<HealthStatus, TransportError> {
        self.health.clone()
    }

    async fn send(&self, message: &str) -> Result<ChatReply, TransportError> {
        self.sent.lock().unwrap().push(message.to_string());
        self.reply.clone()
    }
}
