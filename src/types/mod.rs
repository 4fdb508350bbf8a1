//! Core types for BlueBot
//!
//! Defines conversation messages and the target-language tags.

pub mod language;
pub mod messages;

pub use language::{Language, NO_LANGUAGE};
pub use messages::{Message, Sender};
