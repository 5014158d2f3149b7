//! reqwest-backed transport for the chat service.

use async_trait::async_trait;
use log::{debug, info, warn};

use super::client::{ChatTransport, GENERIC_FAILURE, TransportError};
use super::types::{ChatReply, ChatRequest, ChatResponseBody, HealthStatus};

/// Talks to a chat service rooted at `base_url` (e.g. `http://localhost:5000`).
pub struct HttpTransport {
    base_url: String,
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

/// Maps a decoded `/chat` body plus its status onto the reply/failure split.
///
/// A failure status or an `error` field makes the exchange a failure; the
/// service's `error` text wins over the generic fallback.
fn interpret_chat_body(status: u16, body: ChatResponseBody) -> Result<ChatReply, TransportError> {
    let ok = (200..300).contains(&status);
    if !ok || body.error.is_some() {
        let message = body
            .error
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| GENERIC_FAILURE.to_string());
        return Err(TransportError::Api { status, message });
    }

    match body.response {
        Some(response) => Ok(ChatReply {
            response,
            configured: body.configured.unwrap_or(false),
        }),
        None => Err(TransportError::Parse(
            "response body has no `response` field".to_string(),
        )),
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    fn endpoint(&self) -> &str {
        &self.base_url
    }

    async fn health(&self) -> Result<HealthStatus, TransportError> {
        let response = self
            .client
            .get(self.url("health"))
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        debug!("Health response status: {}", response.status());

        let status = response.status().as_u16();
        if !response.status().is_success() {
            warn!("Health check returned HTTP {}", status);
            return Err(TransportError::Api {
                status,
                message: format!("health check returned HTTP {status}"),
            });
        }

        response
            .json::<HealthStatus>()
            .await
            .map_err(|e| TransportError::Parse(e.to_string()))
    }

    async fn send(&self, message: &str) -> Result<ChatReply, TransportError> {
        let request = ChatRequest {
            message: message.to_string(),
        };

        info!("POST /chat: message_len={}", request.message.len());

        let response = self
            .client
            .post(self.url("chat"))
            .json(&request)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        debug!("Chat response status: {}", status);

        let text = response
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let body = match serde_json::from_str::<ChatResponseBody>(&text) {
            Ok(body) => body,
            Err(e) if (200..300).contains(&status) => {
                warn!("Undecodable /chat body: {}", e);
                return Err(TransportError::Parse(e.to_string()));
            }
            Err(e) => {
                warn!("HTTP {} with undecodable body: {}", status, e);
                ChatResponseBody::default()
            }
        };

        let result = interpret_chat_body(status, body);
        if let Err(ref e) = result {
            warn!("Chat request failed: {}", e);
        }
        result
    }
}
