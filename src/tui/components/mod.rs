//! # TUI Components
//!
//! Stateless components receive all data as props and render it:
//! - `TitleBar`: endpoint, connection status and composing state
//! - `MessageView`: one transcript entry
//! - `WelcomeView`: empty-state screen with suggestion prompts
//! - `ComposingIndicator`: spinner row while a reply is awaited
//!
//! Stateful components keep local state and emit events:
//! - `InputBox`: multi-line text entry
//! - `MessageList`: scrollable transcript with layout caching
//!
//! ```text
//! components/
//! ├── mod.rs
//! ├── title_bar.rs
//! ├── message.rs
//! ├── message_list.rs
//! ├── welcome.rs
//! ├── composing.rs
//! └── input_box/
//! ```

mod composing;
mod title_bar;
pub mod input_box;
pub mod message;
pub mod message_list;
pub mod welcome;

pub use composing::ComposingIndicator;
pub use input_box::{InputBox, InputEvent};
pub use message_list::{MessageList, MessageListState};
pub use title_bar::TitleBar;
pub use welcome::WelcomeView;
