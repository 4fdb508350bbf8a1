//! Conversation module
//!
//! Message log, streaming buffer and the request state machine.

pub mod state;
pub mod store;

pub use state::{RequestEvent, RequestState};
pub use store::{ConversationStore, DEFAULT_GREETING};
