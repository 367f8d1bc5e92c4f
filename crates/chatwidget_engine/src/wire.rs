use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{ChatError, ChatReply, FailureKind};

/// Body of `POST /api/chatbot/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
}

/// Response body. The server also echoes `message` back, which is ignored.
///
/// Fields stay loosely typed so that an odd `error` or `response` payload
/// never hides the `success` flag.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub success: Option<Value>,
    #[serde(default)]
    pub response: Option<Value>,
    #[serde(default)]
    pub error: Option<Value>,
}

impl ChatResponse {
    /// The `success` flag, if the server sent a boolean one.
    pub fn success(&self) -> Option<bool> {
        self.success.as_ref().and_then(Value::as_bool)
    }

    pub fn reply_text(&self) -> Option<&str> {
        self.response.as_ref().and_then(Value::as_str)
    }

    /// `error` as text; structured errors are rendered as JSON.
    pub fn error_text(&self) -> Option<String> {
        match self.error.as_ref()? {
            Value::Null => None,
            Value::String(text) => Some(text.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// Turns a status code and raw body into a reply or a classified failure.
///
/// `success: false` is an application failure whatever the status, since the
/// server reports handler exceptions as a 500 with that body. Every other
/// non-success shape is a transport failure.
pub fn classify_response(status: u16, body: &[u8]) -> Result<ChatReply, ChatError> {
    let is_success_status = (200..300).contains(&status);

    let parsed: ChatResponse = match serde_json::from_slice(body) {
        Ok(parsed) => parsed,
        Err(err) if is_success_status => {
            return Err(ChatError::new(
                FailureKind::MalformedResponse,
                format!("invalid JSON body: {err}"),
            ));
        }
        Err(_) => {
            return Err(ChatError::new(
                FailureKind::HttpStatus(status),
                format!("http status {status} without a chat payload"),
            ));
        }
    };

    match parsed.success() {
        Some(false) => Err(ChatError::new(
            FailureKind::Application { status },
            parsed
                .error_text()
                .unwrap_or_else(|| "server reported failure".to_string()),
        )),
        Some(true) if is_success_status => match parsed.reply_text() {
            Some(text) => Ok(ChatReply {
                text: text.to_string(),
            }),
            None => Err(ChatError::new(
                FailureKind::MalformedResponse,
                "success without a string response field",
            )),
        },
        _ if !is_success_status => Err(ChatError::new(
            FailureKind::HttpStatus(status),
            parsed
                .error_text()
                .unwrap_or_else(|| format!("http status {status}")),
        )),
        _ => Err(ChatError::new(
            FailureKind::MalformedResponse,
            "missing boolean success field",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_message_field_only() {
        let body = serde_json::to_string(&ChatRequest { message: "Hello" }).unwrap();
        assert_eq!(body, r#"{"message":"Hello"}"#);
    }

    #[test]
    fn success_with_reply() {
        let reply = classify_response(
            200,
            br#"{"success": true, "response": "Hi there!", "message": "Hello"}"#,
        )
        .unwrap();
        assert_eq!(reply.text, "Hi there!");
    }

    #[test]
    fn server_exception_is_application_failure() {
        let err = classify_response(500, br#"{"success": false, "error": "quota"}"#).unwrap_err();
        assert_eq!(err.kind, FailureKind::Application { status: 500 });
        assert_eq!(err.message, "quota");
        assert!(!err.kind.is_transport());
    }

    #[test]
    fn failure_flag_wins_over_odd_payloads() {
        let err = classify_response(500, br#"{"success": false, "error": {"detail": "x"}}"#)
            .unwrap_err();
        assert_eq!(err.kind, FailureKind::Application { status: 500 });
        assert_eq!(err.message, r#"{"detail":"x"}"#);

        let err = classify_response(200, br#"{"success": false, "response": 0}"#).unwrap_err();
        assert_eq!(err.kind, FailureKind::Application { status: 200 });
        assert_eq!(err.message, "server reported failure");

        let err = classify_response(200, br#"{"success": false}"#).unwrap_err();
        assert_eq!(err.kind, FailureKind::Application { status: 200 });
        assert!(!err.kind.is_transport());
    }

    #[test]
    fn bad_request_without_discriminator_is_transport() {
        let err = classify_response(400, br#"{"error": "Empty message"}"#).unwrap_err();
        assert_eq!(err.kind, FailureKind::HttpStatus(400));
        assert_eq!(err.message, "Empty message");
        assert!(err.kind.is_transport());
    }

    #[test]
    fn other_shapes_are_transport() {
        let cases: [(u16, &[u8]); 6] = [
            (200, b"<html>oops</html>"),
            (200, br#"{"success": true}"#),
            (200, br#"{"success": true, "response": 0}"#),
            (200, br#"{"reply": "no discriminator"}"#),
            (200, br#"{"success": "yes", "response": "x"}"#),
            (502, b"Bad Gateway"),
        ];
        for (status, body) in cases {
            let err = classify_response(status, body).unwrap_err();
            assert!(err.kind.is_transport(), "{status} {err}");
        }
    }
}
