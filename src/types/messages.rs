//! Message types for the conversation log

use serde::{Deserialize, Serialize};
use std::fmt;

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Bot,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sender::User => write!(f, "user"),
            Sender::Bot => write!(f, "bot"),
        }
    }
}

/// One entry of the conversation. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    sender: Sender,
    text: String,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Bot,
            text: text.into(),
        }
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_bot(&self) -> bool {
        self.sender == Sender::Bot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let user = Message::user("hi");
        assert_eq!(user.sender(), Sender::User);
        assert_eq!(user.text(), "hi");
        assert!(!user.is_bot());

        let bot = Message::bot(String::from("hello"));
        assert!(bot.is_bot());
        assert_eq!(bot.text(), "hello");
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&Message::bot("ok")).unwrap();
        assert_eq!(json, r#"{"sender":"bot","text":"ok"}"#);
    }

    #[test]
    fn test_sender_display() {
        assert_eq!(Sender::User.to_string(), "user");
        assert_eq!(Sender::Bot.to_string(), "bot");
    }
}
