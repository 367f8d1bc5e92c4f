use std::fmt;

use thiserror::Error;

pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    ReplyReady {
        request_id: RequestId,
        result: Result<ChatReply, ChatError>,
    },
    SessionPrimed(Result<(), ChatError>),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ChatError {
    pub kind: FailureKind,
    pub message: String,
}

impl ChatError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidEndpoint,
    /// A configured value cannot be used as-is, e.g. a token with `;`.
    InvalidSetting,
    Network,
    Timeout,
    HttpStatus(u16),
    MalformedResponse,
    /// The server answered with `success: false`.
    Application { status: u16 },
    /// The request task ended without reporting a result.
    Abandoned,
}

impl FailureKind {
    /// Everything except an explicit server-side failure counts as transport.
    pub fn is_transport(&self) -> bool {
        !matches!(self, FailureKind::Application { .. })
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidEndpoint => write!(f, "invalid endpoint"),
            FailureKind::InvalidSetting => write!(f, "invalid setting"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::MalformedResponse => write!(f, "malformed response"),
            FailureKind::Application { status } => {
                write!(f, "server reported failure (status {status})")
            }
            FailureKind::Abandoned => write!(f, "request abandoned"),
        }
    }
}
