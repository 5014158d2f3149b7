//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the
//! conversation, and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! - **Animating** (composing indicator): draws every ~80ms.
//! - **Idle**: sleeps up to 500ms, only redraws on events, resize, or when a
//!   background task delivers an action.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call.

mod component;
mod components;
mod event;
pub mod markdown;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::Conversation;
use crate::transport::{ChatTransport, HttpTransport};
use crate::tui::component::EventHandler;
use crate::tui::components::{InputBox, InputEvent, MessageListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of the conversation)
pub struct TuiState {
    pub message_list: MessageListState,
    pub input_box: InputBox,
    pub endpoint: String,
    pub suggestions: Vec<String>,
    pub show_timestamps: bool,
}

impl TuiState {
    pub fn new(endpoint: &str, config: &ResolvedConfig) -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBox::new(config.max_input_lines),
            endpoint: endpoint.to_string(),
            suggestions: config.suggestions.clone(),
            show_timestamps: config.show_timestamps,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol lets us tell Shift+Enter from Enter; terminals
        // without it ignore the sequence.
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

/// Runs the interactive client until the user quits. Must be called from
/// within a tokio runtime.
pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let transport: Arc<dyn ChatTransport> = Arc::new(HttpTransport::new(config.base_url.clone()));
    let mut state = Conversation::new();
    let mut tui = TuiState::new(transport.endpoint(), &config);

    let (tx, rx) = mpsc::channel();
    spawn_health_probe(transport.clone(), tx.clone());

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let start_time = Instant::now();
    let mut needs_redraw = true;

    'outer: loop {
        let animating = state.composing;
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &state, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let action = match event {
                TuiEvent::Resize => None,
                TuiEvent::Quit => Some(Action::Quit),
                TuiEvent::ScrollUp
                | TuiEvent::ScrollDown
                | TuiEvent::ScrollPageUp
                | TuiEvent::ScrollPageDown
                | TuiEvent::ScrollToBottom => {
                    tui.message_list.handle_event(&event);
                    None
                }
                TuiEvent::Suggestion(index) => suggestion_action(&state, &tui, index),
                _ => {
                    tui.input_box.send_enabled = state.send_enabled();
                    match tui.input_box.handle_event(&event) {
                        Some(InputEvent::Submit(text)) => Some(Action::Submit(text)),
                        Some(InputEvent::ContentChanged) => {
                            Some(Action::InputChanged(tui.input_box.buffer.clone()))
                        }
                        None => None,
                    }
                }
            };

            if let Some(action) = action
                && !apply(&mut state, &mut tui, action, &transport, &tx)
            {
                break 'outer;
            }
        }

        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if !apply(&mut state, &mut tui, action, &transport, &tx) {
                break 'outer;
            }
        }
    }

    info!("Exiting after {} messages", state.messages.len());
    ratatui::restore();
    Ok(())
}

/// Alt+N on the welcome view sends the Nth suggestion.
fn suggestion_action(state: &Conversation, tui: &TuiState, index: usize) -> Option<Action> {
    if !state.welcome_visible() {
        return None;
    }
    tui.suggestions
        .get(index)
        .map(|suggestion| Action::Submit(suggestion.clone()))
}

/// Runs `action` through the reducer and carries out its effect.
/// Returns false when the client should exit.
fn apply(
    state: &mut Conversation,
    tui: &mut TuiState,
    action: Action,
    transport: &Arc<dyn ChatTransport>,
    tx: &mpsc::Sender<Action>,
) -> bool {
    match update(state, action) {
        Effect::Quit => return false,
        Effect::SendRequest(message) => {
            // The turn left the input control; whatever it showed is gone.
            tui.input_box.clear();
            // A new turn brings the transcript back to the bottom.
            tui.message_list.stick_to_bottom = true;
            spawn_request(transport.clone(), message, tx.clone());
        }
        Effect::None => {}
    }
    tui.input_box.send_enabled = state.send_enabled();
    true
}

fn spawn_health_probe(transport: Arc<dyn ChatTransport>, tx: mpsc::Sender<Action>) {
    tokio::spawn(async move {
        let action = match transport.health().await {
            Ok(health) => Action::HealthChecked(health),
            Err(e) => Action::HealthCheckFailed(e),
        };
        if tx.send(action).is_err() {
            warn!("Failed to deliver health result: receiver dropped");
        }
    });
}

fn spawn_request(transport: Arc<dyn ChatTransport>, message: String, tx: mpsc::Sender<Action>) {
    info!("Spawning chat request ({} chars)", message.len());
    tokio::spawn(async move {
        let action = match transport.send(&message).await {
            Ok(reply) => Action::ReplyReceived(reply),
            Err(e) => Action::RequestFailed(e),
        };
        if tx.send(action).is_err() {
            warn!("Failed to deliver chat outcome: receiver dropped");
        }
    });
}
