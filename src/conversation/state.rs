//! Request lifecycle state machine
//!
//! Three states gate the input line:
//! - Idle: a new message may be sent
//! - AwaitingResponse: one POST is in flight
//! - Revealing: the answer is being drawn character by character

use crate::errors::{ChatError, Result};
use serde::{Deserialize, Serialize};

/// Request lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum RequestState {
    /// Ready for input
    #[default]
    Idle,

    /// Waiting for the backend
    AwaitingResponse,

    /// Simulated streaming in progress
    Revealing,
}

/// Events that trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestEvent {
    /// User message accepted and request dispatched
    Send,

    /// Backend returned a usable answer
    ResponseReady,

    /// Any failure path (bad body, detail, transport)
    Failed,

    /// Reveal committed the final message
    RevealComplete,
}

impl RequestState {
    /// Attempt state transition with validation
    ///
    /// Valid transitions:
    /// 1. Idle             → AwaitingResponse (on: Send)
    /// 2. AwaitingResponse → Revealing        (on: ResponseReady)
    /// 3. AwaitingResponse → Idle             (on: Failed)
    /// 4. Revealing        → Idle             (on: RevealComplete)
    pub fn transition(&self, event: RequestEvent) -> Result<RequestState> {
        use RequestEvent::*;
        use RequestState::*;

        let next_state = match (self, event) {
            (Idle, Send) => AwaitingResponse,
            (AwaitingResponse, ResponseReady) => Revealing,
            (AwaitingResponse, Failed) => Idle,
            (Revealing, RevealComplete) => Idle,

            (from, event) => {
                return Err(ChatError::InvalidTransition {
                    from: format!("{:?}", from),
                    event: format!("{:?}", event),
                    reason: format!("No valid transition from {:?} on {:?}", from, event),
                });
            }
        };

        Ok(next_state)
    }

    /// Whether a new message may be sent
    pub fn accepts_input(&self) -> bool {
        matches!(self, RequestState::Idle)
    }

    /// Human-readable state name
    pub fn display_name(&self) -> &'static str {
        match self {
            RequestState::Idle => "Idle",
            RequestState::AwaitingResponse => "Waiting for response",
            RequestState::Revealing => "Streaming",
        }
    }
}
