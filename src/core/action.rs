//! # Actions
//!
//! Everything that can happen in the client becomes an `Action`.
//! User presses Enter? That's `Action::Submit(text)`.
//! The service replies? That's `Action::ReplyReceived(reply)`.
//!
//! `update()` applies an action to the conversation and returns the `Effect`
//! the caller must carry out. No I/O here; the caller owns the network.
//!
//! ```text
//! Conversation + Action  →  update()  →  Effect
//! ```

use log::{debug, info, warn};

use crate::core::message::Message;
use crate::core::state::{ConnectionStatus, Conversation, Diagnostic};
use crate::transport::{ChatReply, HealthStatus, TransportError};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The input control's content changed.
    InputChanged(String),
    /// Send a turn (Enter, form submit, or a suggestion).
    Submit(String),
    ReplyReceived(ChatReply),
    RequestFailed(TransportError),
    HealthChecked(HealthStatus),
    HealthCheckFailed(TransportError),
    Quit,
}

/// Side effect requested by `update()`.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// POST this (already trimmed) message to the chat endpoint.
    SendRequest(String),
    Quit,
}

pub fn update(state: &mut Conversation, action: Action) -> Effect {
    match action {
        Action::InputChanged(text) => {
            state.input = text;
            Effect::None
        }
        Action::Submit(raw) => {
            let message = raw.trim();
            if message.is_empty() {
                return Effect::None;
            }
            if state.in_flight {
                debug!("Submit ignored: a request is already in flight");
                return Effect::None;
            }

            if state.welcome_visible() {
                info!("First turn, leaving the welcome view");
            }
            state.append(Message::user(message));
            state.input.clear();
            state.in_flight = true;
            state.composing = true;
            Effect::SendRequest(message.to_string())
        }
        Action::ReplyReceived(reply) => {
            if !finish_exchange(state) {
                return Effect::None;
            }
            state.append(Message::assistant(reply.response));
            if !reply.configured {
                state.emit(Diagnostic::NotConfigured);
            }
            Effect::None
        }
        Action::RequestFailed(err) => {
            if !finish_exchange(state) {
                return Effect::None;
            }
            info!("Exchange failed: {}", err);
            state.append(Message::failure(err.description()));
            Effect::None
        }
        Action::HealthChecked(health) => {
            debug!(
                "Health: status={:?}, ai_configured={}",
                health.status, health.ai_configured
            );
            if health.ai_configured {
                state.connection = ConnectionStatus::Ready;
            } else {
                state.connection = ConnectionStatus::NotConfigured;
                state.emit(Diagnostic::NotConfigured);
            }
            Effect::None
        }
        Action::HealthCheckFailed(err) => {
            state.connection = ConnectionStatus::Unreachable(err.description().to_string());
            state.emit(Diagnostic::ConnectionFailed(err.to_string()));
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

/// Clears the transient exchange flags. Returns false for a stray outcome
/// that arrived with no exchange outstanding.
fn finish_exchange(state: &mut Conversation) -> bool {
    if !state.in_flight {
        warn!("Exchange outcome arrived with nothing in flight, dropping it");
        return false;
    }
    state.in_flight = false;
    state.composing = false;
    true
}
