//! Chat widget core: pure state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::{Msg, ReplyOutcome};
pub use state::{
    Message, RequestId, Sender, WidgetState, APPLICATION_FAILURE_TEXT, TRANSPORT_FAILURE_TEXT,
};
pub use update::update;
pub use view_model::{EntryView, WidgetViewModel};
