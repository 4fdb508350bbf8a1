//! Simulated streaming of an already-complete answer
//!
//! The backend returns the whole response in one body. The presenter draws
//! it one character per tick so the terminal reads like a live stream:
//! - tick N shows the first N characters (tick 0 shows nothing)
//! - after the last character the full text is committed to the store
//! - starting a new reveal cancels the previous one

use std::time::Duration;

use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::conversation::ConversationStore;

/// Default tick period
pub const DEFAULT_TICK_MS: u64 = 5;

/// Accepted tick period range (milliseconds)
pub const MIN_TICK_MS: u64 = 5;
pub const MAX_TICK_MS: u64 = 15;

/// Receives reveal frames for rendering
pub trait RevealObserver {
    /// Called once per tick with the visible prefix
    fn on_frame(&mut self, visible: &str);

    /// Called after the full text was committed to the store
    fn on_commit(&mut self, _full_text: &str) {}

    /// Called when a newer reveal cancelled this one
    fn on_superseded(&mut self) {}
}

/// Observer that ignores every frame
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl RevealObserver for NoopObserver {
    fn on_frame(&mut self, _visible: &str) {}
}

/// How a reveal ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealOutcome {
    /// Final message appended after `frames` ticks
    Committed { frames: usize },

    /// Cancelled by a newer reveal before committing
    Superseded { frames: usize },
}

/// Owns the timer settings and the token of the reveal in progress
#[derive(Debug)]
pub struct StreamingPresenter {
    tick: Duration,
    current: Option<CancellationToken>,
}

impl StreamingPresenter {
    pub fn new(tick: Duration) -> Self {
        Self {
            tick,
            current: None,
        }
    }

    /// Create a reveal for `full_text`, cancelling any previous one
    pub fn start(&mut self, full_text: impl Into<String>) -> Reveal {
        self.cancel();

        let token = CancellationToken::new();
        self.current = Some(token.clone());

        let reveal = Reveal::new(full_text.into(), self.tick, token);
        debug!(chars = reveal.char_count(), tick_ms = self.tick.as_millis() as u64, "reveal started");
        reveal
    }

    /// Cancel the reveal in progress, if any
    pub fn cancel(&mut self) {
        if let Some(token) = self.current.take() {
            if !token.is_cancelled() {
                debug!("superseding previous reveal");
            }
            token.cancel();
        }
    }

    pub fn tick(&self) -> Duration {
        self.tick
    }
}

impl Default for StreamingPresenter {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_TICK_MS))
    }
}

/// One cooperative reveal task
///
/// Holds the full text, the char boundaries to cut at, and the current
/// index. `run` drives it on a tokio interval.
#[derive(Debug)]
pub struct Reveal {
    text: String,
    boundaries: Vec<usize>,
    index: usize,
    tick: Duration,
    token: CancellationToken,
}

impl Reveal {
    fn new(text: String, tick: Duration, token: CancellationToken) -> Self {
        // Prefix end offsets: 0, then one past each char. Never splits UTF-8.
        let boundaries = std::iter::once(0)
            .chain(text.char_indices().map(|(i, c)| i + c.len_utf8()))
            .collect();

        Self {
            text,
            boundaries,
            index: 0,
            tick,
            token,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn char_count(&self) -> usize {
        self.boundaries.len() - 1
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Next visible prefix, or None once the whole text has been shown
    pub fn advance(&mut self) -> Option<&str> {
        let end = *self.boundaries.get(self.index)?;
        self.index += 1;
        Some(&self.text[..end])
    }

    /// Run the reveal to completion against `store`
    pub async fn run<O>(mut self, store: &mut ConversationStore, observer: &mut O) -> RevealOutcome
    where
        O: RevealObserver + ?Sized,
    {
        let mut interval = time::interval(self.tick);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut frames = 0;

        loop {
            tokio::select! {
                biased;
                _ = self.token.cancelled() => {
                    debug!(frames, "reveal superseded");
                    observer.on_superseded();
                    return RevealOutcome::Superseded { frames };
                }
                _ = interval.tick() => {}
            }

            match self.advance() {
                Some(prefix) => {
                    store.set_streaming_buffer(prefix);
                    observer.on_frame(prefix);
                    frames += 1;
                }
                None => break,
            }
        }

        store.append_bot_message(&self.text);
        observer.on_commit(&self.text);
        debug!(frames, "reveal committed");
        RevealOutcome::Committed { frames }
    }
}
