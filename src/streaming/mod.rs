//! Streaming presenter module
//!
//! Character-by-character reveal of complete bot answers.

pub mod presenter;

// Re-export commonly used types
pub use presenter::{
    NoopObserver, Reveal, RevealObserver, RevealOutcome, StreamingPresenter, DEFAULT_TICK_MS,
    MAX_TICK_MS, MIN_TICK_MS,
};
