pub mod client;
pub mod http;
pub mod types;

pub use client::{ChatTransport, TransportError, GENERIC_FAILURE};
pub use http::HttpTransport;
pub use types::{ChatReply, ChatRequest, HealthStatus};
