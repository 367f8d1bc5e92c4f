//! Chat widget engine: HTTP transport and effect execution.
mod csrf;
mod engine;
mod transport;
mod types;
mod wire;

pub use csrf::{cookie_value, is_cookie_value};
pub use engine::{EngineError, EngineHandle};
pub use transport::{ChatSettings, ChatTransport, ReqwestTransport};
pub use types::{ChatError, ChatReply, EngineEvent, FailureKind, RequestId};
pub use wire::{classify_response, ChatRequest, ChatResponse};
