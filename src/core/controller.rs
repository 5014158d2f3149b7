//! # Conversation Controller
//!
//! Drives one conversation against an injected [`ChatTransport`]: the
//! awaitable counterpart of the terminal event loop, which feeds the same
//! `update()` reducer from spawned tasks instead of awaiting in place.

use std::sync::Arc;

use log::info;

use crate::core::action::{Action, Effect, update};
use crate::core::message::{Message, Originator};
use crate::core::state::Conversation;
use crate::transport::ChatTransport;

pub struct ConversationController {
    transport: Arc<dyn ChatTransport>,
    state: Conversation,
}

impl ConversationController {
    pub fn new(transport: Arc<dyn ChatTransport>) -> Self {
        Self {
            transport,
            state: Conversation::new(),
        }
    }

    pub fn state(&self) -> &Conversation {
        &self.state
    }

    pub fn send_enabled(&self) -> bool {
        self.state.send_enabled()
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        update(&mut self.state, Action::InputChanged(text.into()));
    }

    /// Startup readiness check. Never blocks or alters the transcript.
    pub async fn probe_connection(&mut self) {
        let action = match self.transport.health().await {
            Ok(health) => Action::HealthChecked(health),
            Err(e) => Action::HealthCheckFailed(e),
        };
        update(&mut self.state, action);
    }

    /// Sends one turn and waits for its outcome.
    ///
    /// Returns false when nothing was sent (blank input, or an exchange is
    /// already outstanding).
    pub async fn submit(&mut self, raw_text: &str) -> bool {
        let Effect::SendRequest(message) =
            update(&mut self.state, Action::Submit(raw_text.to_string()))
        else {
            return false;
        };

        info!("Sending turn {} to {}", self.state.messages.len(), self.transport.endpoint());
        let outcome = match self.transport.send(&message).await {
            Ok(reply) => Action::ReplyReceived(reply),
            Err(e) => Action::RequestFailed(e),
        };
        update(&mut self.state, outcome);
        true
    }

    /// Appends an entry to the transcript directly, bypassing the exchange.
    pub fn append_message(&mut self, content: &str, originator: Originator, is_error: bool) -> &Message {
        self.state.append(Message::new(content, originator, is_error))
    }
}
