use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::core::state::Conversation;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{ComposingIndicator, MessageList, TitleBar, WelcomeView};

/// Draws one frame: status bar, welcome view or transcript, composing row, input box.
pub fn draw_ui(frame: &mut Frame, state: &Conversation, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};

    tui.input_box.send_enabled = state.send_enabled();
    let area = frame.area();
    let input_height = tui.input_box.calculate_height(area.width);
    let composing_height = if state.composing { 1 } else { 0 };

    let [title_area, main_area, composing_area, input_area] = Layout::vertical([
        Length(1),
        Min(0),
        Length(composing_height),
        Length(input_height),
    ])
    .areas(area);

    if state.welcome_visible() {
        WelcomeView::new(&tui.suggestions).render(frame, main_area);
    } else {
        MessageList::new(&mut tui.message_list, &state.messages, tui.show_timestamps)
            .render(frame, main_area);
    }

    TitleBar::new(
        &tui.endpoint,
        &state.connection,
        state.composing,
        tui.message_list.has_unseen_content(),
    )
    .render(frame, title_area);

    if state.composing {
        ComposingIndicator { spinner_frame }.render(frame, composing_area);
    }

    tui.input_box.render(frame, input_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::transport::ChatReply;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn tui_state() -> TuiState {
        TuiState {
            message_list: crate::tui::components::MessageListState::new(),
            input_box: crate::tui::components::InputBox::new(5),
            endpoint: "http://localhost:5000".into(),
            suggestions: vec!["Tell me a joke".into()],
            show_timestamps: false,
        }
    }

    fn draw(state: &Conversation, tui: &mut TuiState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| draw_ui(f, state, tui, 0)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn empty_conversation_shows_welcome() {
        let state = Conversation::default();
        let mut tui = tui_state();
        let screen = draw(&state, &mut tui);
        assert!(screen.contains("How can I help you today?"));
        assert!(screen.contains("Tell me a joke"));
        assert!(screen.contains("checking"));
    }

    #[test]
    fn in_flight_exchange_shows_transcript_and_indicator() {
        let mut state = Conversation::default();
        update(&mut state, Action::Submit("Hi there".into()));
        let mut tui = tui_state();
        let screen = draw(&state, &mut tui);
        assert!(!screen.contains("How can I help you today?"));
        assert!(screen.contains("Hi there"));
        assert!(screen.contains("is typing"));
        assert!(!tui.input_box.send_enabled);
    }

    #[test]
    fn finished_exchange_hides_indicator() {
        let mut state = Conversation::default();
        update(&mut state, Action::Submit("Hi".into()));
        update(&mut state, Action::ReplyReceived(ChatReply::new("Hello back")));
        let mut tui = tui_state();
        let screen = draw(&state, &mut tui);
        assert!(screen.contains("Hello back"));
        assert!(!screen.contains("is typing"));
    }

    #[test]
    fn send_affordance_follows_input() {
        let mut state = Conversation::default();
        let mut tui = tui_state();
        draw(&state, &mut tui);
        assert!(!tui.input_box.send_enabled);

        update(&mut state, Action::InputChanged("draft".into()));
        draw(&state, &mut tui);
        assert!(tui.input_box.send_enabled);
    }
}
