//! Response decoding
//!
//! The backend answers with `{"response": ...}` on success and
//! `{"detail": ...}` on failure. Everything is decoded once here into a
//! tagged outcome so the orchestrator never inspects raw JSON.

use serde_json::Value;

use crate::client::RawResponse;
use crate::errors::ChatError;

/// Prefix of every inline error message
pub const ERROR_PREFIX: &str = "Error: ";

/// Shown when the body is JSON but has neither `response` nor `detail`
pub const UNEXPECTED_RESPONSE_MESSAGE: &str = "Error: Unexpected response from server.";

/// Result of one chat request, decoded at the boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatOutcome {
    /// HTTP ok with a non-empty `response`
    Success { text: String },

    /// Body carried a `detail` message
    ApplicationError { detail: String },

    /// Body was not valid JSON
    MalformedBody { raw: String },

    /// JSON without `response` or `detail`
    UnexpectedResponse,

    /// Request never produced a response
    TransportError { description: String },
}

impl ChatOutcome {
    /// Decode an HTTP response
    ///
    /// Checks, in order: JSON validity, (ok && response), detail, fallback.
    /// A `detail` is honoured on any status.
    pub fn decode(raw: &RawResponse) -> Self {
        let value: Value = match serde_json::from_str(&raw.body) {
            Ok(value) => value,
            Err(_) => {
                return ChatOutcome::MalformedBody {
                    raw: raw.body.clone(),
                }
            }
        };

        if raw.is_success() {
            if let Some(text) = value.get("response").and_then(Value::as_str) {
                if !text.is_empty() {
                    return ChatOutcome::Success {
                        text: text.to_string(),
                    };
                }
            }
        }

        match value.get("detail").and_then(detail_text) {
            Some(detail) => ChatOutcome::ApplicationError { detail },
            None => ChatOutcome::UnexpectedResponse,
        }
    }

    /// Map a transport failure
    pub fn from_error(err: &ChatError) -> Self {
        ChatOutcome::TransportError {
            description: err.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ChatOutcome::Success { .. })
    }

    /// Inline message recorded for failure outcomes; None for success
    pub fn error_message(&self) -> Option<String> {
        match self {
            ChatOutcome::Success { .. } => None,
            ChatOutcome::MalformedBody { raw } => {
                Some(format!("{}Invalid JSON response. {}", ERROR_PREFIX, raw))
            }
            ChatOutcome::ApplicationError { detail } => {
                Some(format!("{}{}", ERROR_PREFIX, detail))
            }
            ChatOutcome::UnexpectedResponse => Some(UNEXPECTED_RESPONSE_MESSAGE.to_string()),
            ChatOutcome::TransportError { description } => {
                Some(format!("{}{}", ERROR_PREFIX, description))
            }
        }
    }

    /// Short label for logs
    pub fn kind(&self) -> &'static str {
        match self {
            ChatOutcome::Success { .. } => "success",
            ChatOutcome::ApplicationError { .. } => "application_error",
            ChatOutcome::MalformedBody { .. } => "malformed_body",
            ChatOutcome::UnexpectedResponse => "unexpected_response",
            ChatOutcome::TransportError { .. } => "transport_error",
        }
    }
}

/// Empty, null and `false` details count as absent. Non-string details
/// (FastAPI validation errors are arrays) are shown as compact JSON.
fn detail_text(detail: &Value) -> Option<String> {
    match detail {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(status: u16, body: &str) -> RawResponse {
        RawResponse {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn test_success() {
        let outcome = ChatOutcome::decode(&raw(200, r#"{"response": "Hi"}"#));
        assert_eq!(
            outcome,
            ChatOutcome::Success {
                text: "Hi".to_string()
            }
        );
        assert!(outcome.is_success());
        assert_eq!(outcome.error_message(), None);
    }

    #[test]
    fn test_malformed_body() {
        let outcome = ChatOutcome::decode(&raw(200, "not json"));
        let message = outcome.error_message().unwrap();
        assert!(message.contains("Invalid JSON response"));
        assert!(message.contains("not json"));
        assert_eq!(message, "Error: Invalid JSON response. not json");
    }

    #[test]
    fn test_malformed_body_on_error_status() {
        let outcome = ChatOutcome::decode(&raw(502, "<html>Bad Gateway</html>"));
        assert_eq!(
            outcome,
            ChatOutcome::MalformedBody {
                raw: "<html>Bad Gateway</html>".to_string()
            }
        );
    }

    #[test]
    fn test_detail_on_server_error() {
        let outcome = ChatOutcome::decode(&raw(500, r#"{"detail": "rate limited"}"#));
        assert_eq!(outcome.error_message().unwrap(), "Error: rate limited");
    }

    #[test]
    fn test_detail_on_ok_status() {
        let outcome = ChatOutcome::decode(&raw(200, r#"{"detail": "odd but honoured"}"#));
        assert_eq!(
            outcome,
            ChatOutcome::ApplicationError {
                detail: "odd but honoured".to_string()
            }
        );
    }

    #[test]
    fn test_response_ignored_on_error_status() {
        let outcome = ChatOutcome::decode(&raw(500, r#"{"response": "Hi"}"#));
        assert_eq!(outcome, ChatOutcome::UnexpectedResponse);
    }

    #[test]
    fn test_empty_response_is_unexpected() {
        let outcome = ChatOutcome::decode(&raw(200, r#"{"response": ""}"#));
        assert_eq!(outcome, ChatOutcome::UnexpectedResponse);
        assert_eq!(
            outcome.error_message().unwrap(),
            "Error: Unexpected response from server."
        );
    }

    #[test]
    fn test_non_object_json_is_unexpected() {
        assert_eq!(
            ChatOutcome::decode(&raw(200, "42")),
            ChatOutcome::UnexpectedResponse
        );
        assert_eq!(
            ChatOutcome::decode(&raw(200, "null")),
            ChatOutcome::UnexpectedResponse
        );
    }

    #[test]
    fn test_validation_detail_rendered_as_json() {
        let body = r#"{"detail": [{"loc": ["body", "user_message"], "msg": "field required"}]}"#;
        let outcome = ChatOutcome::decode(&raw(422, body));
        let message = outcome.error_message().unwrap();
        assert!(message.starts_with("Error: ["));
        assert!(message.contains("field required"));
    }

    #[test]
    fn test_transport_error_message() {
        let err = ChatError::Transport("Network down".to_string());
        let outcome = ChatOutcome::from_error(&err);
        assert_eq!(outcome.kind(), "transport_error");
        assert_eq!(outcome.error_message().unwrap(), "Error: Network down");
    }
}
