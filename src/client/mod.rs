//! Chat backend client
//!
//! Wire types, the transport seam, and response decoding.

pub mod http;
pub mod outcome;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::types::Language;

pub use http::{HttpTransport, DEFAULT_BASE_URL, DEFAULT_CHAT_PATH, DEFAULT_HEALTH_PATH};
pub use outcome::{ChatOutcome, ERROR_PREFIX, UNEXPECTED_RESPONSE_MESSAGE};

/// Body of `POST /chat`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub user_message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
}

/// Status and full body of an HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Body of `GET /health`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub gemini_client_ready: bool,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// Transport seam between the orchestrator and the network
///
/// Errors returned here are transport failures; any HTTP response,
/// including 4xx/5xx, is a `RawResponse`.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn post_chat(&self, request: &ChatRequest) -> Result<RawResponse>;

    async fn health(&self) -> Result<HealthStatus>;

    /// Where messages go, for status output
    fn endpoint(&self) -> String {
        String::from("(custom transport)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_with_language() {
        let request = ChatRequest {
            user_message: "hello".to_string(),
            language: Some(Language::Cpp),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"user_message": "hello", "language": "C++"})
        );
    }

    #[test]
    fn test_request_without_language() {
        let request = ChatRequest {
            user_message: "hello".to_string(),
            language: None,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"user_message":"hello"}"#);
    }

    #[test]
    fn test_raw_response_success_range() {
        let ok = RawResponse {
            status: 204,
            body: String::new(),
        };
        let err = RawResponse {
            status: 500,
            body: String::new(),
        };
        assert!(ok.is_success());
        assert!(!err.is_success());
    }

    #[test]
    fn test_health_status_parse() {
        let health: HealthStatus =
            serde_json::from_str(r#"{"status": "healthy", "gemini_client_ready": false}"#)
                .unwrap();
        assert!(health.is_healthy());
        assert!(!health.gemini_client_ready);
    }
}
