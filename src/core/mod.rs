//! # Core Client Logic
//!
//! The conversation model and its transitions. It knows nothing about any
//! specific UI technology and performs no I/O of its own.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Conversation (state) │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │ Controller │      │ Transport  │
//!     │  Adapter   │      │  (awaits)  │      │  (reqwest) │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: `Conversation`, the whole session in one value
//! - [`action`]: `Action`, `Effect`, and the `update()` reducer
//! - [`message`]: transcript entries
//! - [`input`]: send enablement and input height rules
//! - [`controller`]: awaitable driver over an injected transport
//! - [`config`]: layered settings

pub mod action;
pub mod config;
pub mod controller;
pub mod input;
pub mod message;
pub mod state;
