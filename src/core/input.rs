//! Input affordance rules shared by every front end.

/// Height cap for the input control, in the host surface's own units.
pub const DEFAULT_INPUT_HEIGHT_CAP: u16 = 120;

/// The send control is enabled iff there is something to send and nothing
/// is already on its way.
pub fn send_enabled(input: &str, in_flight: bool) -> bool {
    !in_flight && !input.trim().is_empty()
}

/// Visible height of the input control: grows with its content, up to `cap`.
pub fn fit_height(content_height: u16, cap: u16) -> u16 {
    content_height.min(cap)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_input_disables_send() {
        assert!(!send_enabled("", false));
        assert!(!send_enabled("  \n\t ", false));
    }

    #[test]
    fn in_flight_disables_send() {
        assert!(!send_enabled("hello", true));
    }

    #[test]
    fn text_enables_send() {
        assert!(send_enabled(" hello ", false));
    }

    #[test]
    fn height_tracks_content_below_cap() {
        assert_eq!(fit_height(40, DEFAULT_INPUT_HEIGHT_CAP), 40);
        assert_eq!(fit_height(DEFAULT_INPUT_HEIGHT_CAP, DEFAULT_INPUT_HEIGHT_CAP), 120);
    }

    #[test]
    fn height_clamps_at_cap() {
        assert_eq!(fit_height(300, DEFAULT_INPUT_HEIGHT_CAP), 120);
        assert_eq!(fit_height(9, 5), 5);
    }
}
