//! BlueBot - terminal chat client
//!
//! Sends each message to the BlueBot backend with one `POST /chat` and
//! reveals the returned answer character by character.
//!
//! # Architecture
//!
//! - **conversation**: message log, streaming buffer, request state machine
//! - **streaming**: timer-driven reveal of complete answers
//! - **client**: wire types, HTTP transport, response decoding
//! - **orchestrator**: `ChatSession`, one send from input to committed reply
//! - **repl** / **cli**: terminal front end and configuration

pub mod client;
pub mod conversation;
pub mod errors;
pub mod orchestrator;
pub mod streaming;
pub mod types;

// Re-export commonly used types
pub use errors::{ChatError, Result};
pub use orchestrator::{ChatSession, SendOutcome, SessionObserver};

// Terminal front end
pub mod cli;
pub mod repl;
