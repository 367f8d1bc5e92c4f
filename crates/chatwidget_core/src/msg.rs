#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User clicked the floating toggle button.
    ToggleClicked,
    /// Opens the widget if it is closed; focuses input either way.
    OpenRequested,
    /// User clicked the close control inside the widget.
    CloseClicked,
    /// User edited the input field.
    InputChanged(String),
    /// User pressed Enter in the input field.
    EnterPressed { shift: bool },
    /// User clicked Send.
    SendClicked,
    /// Programmatic submission of raw text, bypassing the input field.
    MessageSubmitted(String),
    /// Engine finished a chat request.
    ReplyReceived {
        request_id: crate::RequestId,
        outcome: ReplyOutcome,
    },
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}

/// How a chat request ended, as far as the transcript is concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyOutcome {
    Reply(String),
    /// The server answered but reported a non-success result.
    ApplicationFailure,
    /// The request did not complete or the response could not be interpreted.
    TransportFailure,
}
