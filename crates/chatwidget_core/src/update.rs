use crate::{Effect, Msg, WidgetState};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: WidgetState, msg: Msg) -> (WidgetState, Vec<Effect>) {
    let effects = match msg {
        Msg::ToggleClicked => {
            if state.toggle_open() {
                vec![Effect::FocusInput]
            } else {
                Vec::new()
            }
        }
        Msg::OpenRequested => {
            if !state.is_open() {
                state.toggle_open();
            }
            vec![Effect::FocusInput]
        }
        Msg::CloseClicked => {
            // The close control lives inside the widget, so it only ever closes.
            if state.is_open() {
                state.toggle_open();
            }
            Vec::new()
        }
        Msg::InputChanged(text) => {
            state.set_input(text);
            Vec::new()
        }
        Msg::EnterPressed { shift: true } => Vec::new(),
        Msg::EnterPressed { shift: false } | Msg::SendClicked => {
            let raw = state.input().to_owned();
            submit(&mut state, &raw)
        }
        Msg::MessageSubmitted(raw) => submit(&mut state, &raw),
        Msg::ReplyReceived {
            request_id,
            outcome,
        } => {
            // A reply for anything but the in-flight request is stale; drop it.
            state.finish_request(request_id, outcome);
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn submit(state: &mut WidgetState, raw: &str) -> Vec<Effect> {
    let message = raw.trim();
    if message.is_empty() || state.is_pending() {
        return Vec::new();
    }

    let request_id = state.begin_request(message);
    vec![
        Effect::SendChat {
            request_id,
            message: message.to_owned(),
        },
        Effect::FocusInput,
    ]
}
