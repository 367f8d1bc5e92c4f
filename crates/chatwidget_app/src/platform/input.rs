use chatwidget_core::Msg;

/// What one line of terminal input asks the widget to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    Dispatch(Vec<Msg>),
    Quit,
}

/// Maps a line typed at the terminal onto widget messages.
///
/// Slash commands drive the toggle, open and close controls; anything else is typed
/// into the input field and submitted with a plain Enter.
pub fn parse_line(line: &str) -> InputAction {
    match line.trim() {
        "/quit" | "/exit" => InputAction::Quit,
        "/toggle" => InputAction::Dispatch(vec![Msg::ToggleClicked]),
        "/open" => InputAction::Dispatch(vec![Msg::OpenRequested]),
        "/close" => InputAction::Dispatch(vec![Msg::CloseClicked]),
        _ => InputAction::Dispatch(vec![
            Msg::InputChanged(line.to_string()),
            Msg::EnterPressed { shift: false },
        ]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_typed_then_entered() {
        assert_eq!(
            parse_line("Hello"),
            InputAction::Dispatch(vec![
                Msg::InputChanged("Hello".to_string()),
                Msg::EnterPressed { shift: false },
            ])
        );
    }

    #[test]
    fn commands_map_to_controls() {
        assert_eq!(parse_line("/toggle"), InputAction::Dispatch(vec![Msg::ToggleClicked]));
        assert_eq!(parse_line("/open"), InputAction::Dispatch(vec![Msg::OpenRequested]));
        assert_eq!(parse_line(" /close "), InputAction::Dispatch(vec![Msg::CloseClicked]));
        assert_eq!(parse_line("/quit"), InputAction::Quit);
    }

    #[test]
    fn blank_line_is_still_forwarded() {
        // The controller decides that whitespace-only input is a no-op.
        assert_eq!(
            parse_line("   "),
            InputAction::Dispatch(vec![
                Msg::InputChanged("   ".to_string()),
                Msg::EnterPressed { shift: false },
            ])
        );
    }
}
