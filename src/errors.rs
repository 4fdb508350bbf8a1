//! Error types for BlueBot
//!
//! Conversation-level failures (bad JSON, backend `detail`, transport errors)
//! never surface here: they are turned into bot messages by the
//! orchestrator. This enum covers the plumbing around them.

use thiserror::Error;

/// Main error type for the BlueBot client
#[derive(Error, Debug)]
pub enum ChatError {
    /// Request state machine transition errors
    #[error("Invalid state transition from {from} via {event}: {reason}")]
    InvalidTransition {
        from: String,
        event: String,
        reason: String,
    },

    /// Transport-level failure (connect, DNS, reset, body read).
    /// Displays as the bare description so it can be shown inline.
    #[error("{0}")]
    Transport(String),

    /// HTTP client errors
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Language tag outside the supported set
    #[error("Unknown language: {0}")]
    UnknownLanguage(String),

    /// Generic errors with context
    #[error("BlueBot error: {0}")]
    Generic(String),
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ChatError>;

/// Convert anyhow errors to ChatError
impl From<anyhow::Error> for ChatError {
    fn from(err: anyhow::Error) -> Self {
        ChatError::Generic(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_transition_error() {
        let err = ChatError::InvalidTransition {
            from: "Revealing".to_string(),
            event: "Send".to_string(),
            reason: "Reveal still running".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Revealing"));
        assert!(msg.contains("Send"));
    }

    #[test]
    fn test_unknown_language_display() {
        let err = ChatError::UnknownLanguage("Cobol".to_string());
        assert_eq!(err.to_string(), "Unknown language: Cobol");
    }

    #[test]
    fn test_transport_display_is_bare() {
        let err = ChatError::Transport("Network down".to_string());
        assert_eq!(err.to_string(), "Network down");
    }

    #[test]
    fn test_from_anyhow() {
        let err: ChatError = anyhow::anyhow!("boom").into();
        assert!(matches!(err, ChatError::Generic(ref m) if m == "boom"));
    }
}
