//! Conversation store
//!
//! Authoritative ordered log of exchanged messages, plus the transient
//! streaming buffer and the request state that gates input.
//!
//! The log only grows: no deletion, no edit.

use tracing::{debug, warn};

use crate::conversation::state::{RequestEvent, RequestState};
use crate::types::Message;

/// Seed greeting shown before the first exchange
pub const DEFAULT_GREETING: &str = "Hello! How can I help you today?";

/// Conversation log and request-gating state
#[derive(Debug, Clone)]
pub struct ConversationStore {
    messages: Vec<Message>,
    streaming_buffer: String,
    state: RequestState,
}

impl ConversationStore {
    /// Create a store seeded with one bot greeting
    pub fn new(greeting: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::bot(greeting)],
            streaming_buffer: String::new(),
            state: RequestState::Idle,
        }
    }

    /// Append a user message and move to AwaitingResponse
    ///
    /// Returns false (and changes nothing) when the trimmed text is empty
    /// or a request/reveal cycle is already running.
    pub fn append_user_message(&mut self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() || !self.state.accepts_input() {
            return false;
        }

        self.messages.push(Message::user(text));
        self.streaming_buffer.clear();
        self.apply(RequestEvent::Send, RequestState::AwaitingResponse);
        true
    }

    /// Enter the Revealing state once a successful answer arrived
    pub fn begin_reveal(&mut self) -> bool {
        match self.state.transition(RequestEvent::ResponseReady) {
            Ok(next) => {
                debug!(from = ?self.state, to = ?next, "request state");
                self.state = next;
                self.streaming_buffer.clear();
                true
            }
            Err(e) => {
                warn!("cannot start reveal: {}", e);
                false
            }
        }
    }

    /// Publish the visible prefix of the answer being revealed
    ///
    /// Ignored outside the Revealing state so the buffer can never hold
    /// text while idle.
    pub fn set_streaming_buffer(&mut self, prefix: &str) {
        if self.state != RequestState::Revealing {
            return;
        }
        self.streaming_buffer.clear();
        self.streaming_buffer.push_str(prefix);
    }

    /// Commit a finished bot answer, clear the buffer, return to Idle
    pub fn append_bot_message(&mut self, text: &str) {
        self.messages.push(Message::bot(text));
        self.streaming_buffer.clear();
        self.apply(RequestEvent::RevealComplete, RequestState::Idle);
    }

    /// Surface an error inline as a bot message and return to Idle
    pub fn record_error(&mut self, text: &str) {
        self.messages.push(Message::bot(text));
        self.streaming_buffer.clear();
        self.apply(RequestEvent::Failed, RequestState::Idle);
    }

    fn apply(&mut self, event: RequestEvent, fallback: RequestState) {
        let next = self.state.transition(event).unwrap_or_else(|e| {
            warn!("{}; forcing {:?}", e, fallback);
            fallback
        });
        debug!(from = ?self.state, to = ?next, ?event, "request state");
        self.state = next;
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn streaming_buffer(&self) -> &str {
        &self.streaming_buffer
    }

    pub fn state(&self) -> RequestState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state.accepts_input()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new(DEFAULT_GREETING)
    }
}
