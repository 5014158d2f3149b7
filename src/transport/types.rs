//! Wire types for the two HTTP operations the client speaks.
//!
//! ```text
//! POST /chat    { "message": "..." }  →  { "response": "...", "configured": true }
//!                                     →  { "error": "..." }   (non-2xx)
//! GET  /health                        →  { "status": "healthy", "ai_configured": true }
//! ```

use serde::{Deserialize, Serialize};

/// Request body for `POST /chat`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub message: String,
}

/// Raw `/chat` response body. Every field is optional on the wire; the
/// transport decides success or failure from the status code and `error`.
#[derive(Deserialize, Debug, Default)]
pub(crate) struct ChatResponseBody {
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub configured: Option<bool>,
    #[serde(default)]
    pub error: Option<String>,
}

/// A successful assistant reply.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatReply {
    pub response: String,
    /// False when the service answered but flags its AI backend as not set up.
    /// Only an explicit `true` on the wire counts as configured.
    pub configured: bool,
}

impl ChatReply {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            configured: true,
        }
    }
}

/// `/health` response body.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct HealthStatus {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub ai_configured: bool,
}
