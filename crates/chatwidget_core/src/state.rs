use crate::view_model::{EntryView, WidgetViewModel};
use crate::ReplyOutcome;

pub type RequestId = u64;

/// Bot text shown when the server answered with a non-success result.
pub const APPLICATION_FAILURE_TEXT: &str =
    "Sorry, I encountered an error. Please try again later.";

/// Bot text shown when the request could not be completed.
pub const TRANSPORT_FAILURE_TEXT: &str =
    "Sorry, I could not connect to the server. Please check your connection.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub sender: Sender,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::User,
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::Bot,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WidgetState {
    open: bool,
    pending: Option<RequestId>,
    input: String,
    transcript: Vec<Message>,
    next_request_id: RequestId,
    dirty: bool,
}

impl WidgetState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> WidgetViewModel {
        let mut entries: Vec<EntryView> = self
            .transcript
            .iter()
            .map(|message| EntryView::Message {
                text: message.text.clone(),
                sender: message.sender,
            })
            .collect();
        if self.pending.is_some() {
            entries.push(EntryView::Typing);
        }

        WidgetViewModel {
            open: self.open,
            toggle_active: self.open,
            pending: self.pending.is_some(),
            input: self.input.clone(),
            entries,
            dirty: self.dirty,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending_request(&self) -> Option<RequestId> {
        self.pending
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    /// Returns whether anything changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Flips visibility and returns the new value.
    pub(crate) fn toggle_open(&mut self) -> bool {
        self.open = !self.open;
        self.mark_dirty();
        self.open
    }

    pub(crate) fn set_input(&mut self, text: String) {
        if self.input != text {
            self.input = text;
            self.mark_dirty();
        }
    }

    /// Records the user message and marks a new request as in flight.
    ///
    /// Callers must have checked that no request is pending.
    pub(crate) fn begin_request(&mut self, text: &str) -> RequestId {
        debug_assert!(self.pending.is_none());
        self.next_request_id += 1;
        let request_id = self.next_request_id;
        self.transcript.push(Message::user(text));
        self.input.clear();
        self.pending = Some(request_id);
        self.mark_dirty();
        request_id
    }

    /// Resolves the pending request. Returns `false` when `request_id` is not
    /// the one in flight, in which case nothing changes.
    pub(crate) fn finish_request(&mut self, request_id: RequestId, outcome: ReplyOutcome) -> bool {
        if self.pending != Some(request_id) {
            return false;
        }
        let text = match outcome {
            ReplyOutcome::Reply(text) => text,
            ReplyOutcome::ApplicationFailure => APPLICATION_FAILURE_TEXT.to_string(),
            ReplyOutcome::TransportFailure => TRANSPORT_FAILURE_TEXT.to_string(),
        };
        self.transcript.push(Message::bot(text));
        self.pending = None;
        self.mark_dirty();
        true
    }
}
