use crate::RequestId;

/// Side effects requested by `update`; executed by the platform layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Post `message` to the chat endpoint. Exactly one per accepted submission.
    SendChat {
        request_id: RequestId,
        message: String,
    },
    /// Move keyboard focus to the input field.
    FocusInput,
}
