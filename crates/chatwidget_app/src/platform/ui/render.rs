use chatwidget_core::{EntryView, WidgetViewModel};

use super::constants::*;
use super::surface::UiCommand;

/// What the surface is currently showing, so each render only emits changes.
#[derive(Debug, Clone, Default)]
pub struct RenderCursor {
    open: Option<bool>,
    pending: Option<bool>,
    input: Option<String>,
    rendered_messages: usize,
    typing_shown: bool,
}

/// Diffs `view` against the cursor and returns the commands that bring the
/// surface up to date. The transcript is append-only, so only new entries
/// are emitted.
pub fn render(cursor: &mut RenderCursor, view: &WidgetViewModel) -> Vec<UiCommand> {
    let mut cmds = Vec::new();

    if cursor.open != Some(view.open) {
        cmds.push(UiCommand::SetVisible { visible: view.open });
        cmds.push(UiCommand::SetToggleActive {
            active: view.toggle_active,
        });
        cursor.open = Some(view.open);
    }

    if cursor.pending != Some(view.pending) {
        cmds.push(UiCommand::SetControlEnabled {
            control_id: BUTTON_SEND,
            enabled: !view.pending,
        });
        cursor.pending = Some(view.pending);
    }

    if cursor.input.as_deref() != Some(view.input.as_str()) {
        cmds.push(UiCommand::SetInputText {
            text: view.input.clone(),
        });
        cursor.input = Some(view.input.clone());
    }

    let messages: Vec<_> = view
        .entries
        .iter()
        .filter_map(|entry| match entry {
            EntryView::Message { text, sender } => Some((text, *sender)),
            EntryView::Typing => None,
        })
        .collect();
    let wants_typing = view.pending;
    let has_new_messages = messages.len() > cursor.rendered_messages;

    // The indicator is always the last entry; take it down before anything is
    // appended below it.
    if cursor.typing_shown && (!wants_typing || has_new_messages) {
        cmds.push(UiCommand::RemoveTyping);
        cursor.typing_shown = false;
    }

    for (text, sender) in messages.iter().skip(cursor.rendered_messages) {
        cmds.push(UiCommand::AppendMessage {
            text: text.to_string(),
            sender: *sender,
        });
        cmds.push(UiCommand::ScrollToEnd);
    }
    cursor.rendered_messages = messages.len();

    if wants_typing && !cursor.typing_shown {
        cmds.push(UiCommand::ShowTyping);
        cmds.push(UiCommand::ScrollToEnd);
        cursor.typing_shown = true;
    }

    cmds
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatwidget_core::{update, Msg, ReplyOutcome, Sender, WidgetState};

    fn apply(state: WidgetState, msg: Msg) -> WidgetState {
        update(state, msg).0
    }

    #[test]
    fn first_render_emits_full_state() {
        let mut cursor = RenderCursor::default();
        let cmds = render(&mut cursor, &WidgetState::new().view());

        assert_eq!(
            cmds,
            vec![
                UiCommand::SetVisible { visible: false },
                UiCommand::SetToggleActive { active: false },
                UiCommand::SetControlEnabled {
                    control_id: BUTTON_SEND,
                    enabled: true,
                },
                UiCommand::SetInputText {
                    text: String::new(),
                },
            ]
        );
        assert!(render(&mut cursor, &WidgetState::new().view()).is_empty());
    }

    #[test]
    fn send_and_reply_append_and_swap_indicator() {
        let mut cursor = RenderCursor::default();
        let state = WidgetState::new();
        render(&mut cursor, &state.view());

        let state = apply(state, Msg::MessageSubmitted("Hello".to_string()));
        assert_eq!(
            render(&mut cursor, &state.view()),
            vec![
                UiCommand::SetControlEnabled {
                    control_id: BUTTON_SEND,
                    enabled: false,
                },
                UiCommand::AppendMessage {
                    text: "Hello".to_string(),
                    sender: Sender::User,
                },
                UiCommand::ScrollToEnd,
                UiCommand::ShowTyping,
                UiCommand::ScrollToEnd,
            ]
        );

        let state = apply(
            state,
            Msg::ReplyReceived {
                request_id: 1,
                outcome: ReplyOutcome::Reply("Hi there!".to_string()),
            },
        );
        assert_eq!(
            render(&mut cursor, &state.view()),
            vec![
                UiCommand::SetControlEnabled {
                    control_id: BUTTON_SEND,
                    enabled: true,
                },
                UiCommand::RemoveTyping,
                UiCommand::AppendMessage {
                    text: "Hi there!".to_string(),
                    sender: Sender::Bot,
                },
                UiCommand::ScrollToEnd,
            ]
        );
    }

    #[test]
    fn coalesced_reply_and_resend_keeps_indicator_last() {
        let mut cursor = RenderCursor::default();
        let state = apply(WidgetState::new(), Msg::MessageSubmitted("one".to_string()));
        render(&mut cursor, &state.view());

        let state = apply(
            state,
            Msg::ReplyReceived {
                request_id: 1,
                outcome: ReplyOutcome::TransportFailure,
            },
        );
        let state = apply(state, Msg::MessageSubmitted("two".to_string()));
        let cmds = render(&mut cursor, &state.view());

        let shape: Vec<_> = cmds
            .iter()
            .filter(|cmd| !matches!(cmd, UiCommand::ScrollToEnd))
            .collect();
        assert!(matches!(shape[0], UiCommand::RemoveTyping));
        assert!(matches!(
            shape[1],
            UiCommand::AppendMessage {
                sender: Sender::Bot,
                ..
            }
        ));
        assert!(matches!(
            shape[2],
            UiCommand::AppendMessage {
                sender: Sender::User,
                ..
            }
        ));
        assert!(matches!(shape[3], UiCommand::ShowTyping));
        assert_eq!(shape.len(), 4);
    }

    #[test]
    fn every_append_is_followed_by_scroll() {
        let mut cursor = RenderCursor::default();
        let state = apply(WidgetState::new(), Msg::MessageSubmitted("hi".to_string()));
        let cmds = render(&mut cursor, &state.view());

        for (index, cmd) in cmds.iter().enumerate() {
            if matches!(cmd, UiCommand::AppendMessage { .. } | UiCommand::ShowTyping) {
                assert_eq!(cmds.get(index + 1), Some(&UiCommand::ScrollToEnd));
            }
        }
    }
}
