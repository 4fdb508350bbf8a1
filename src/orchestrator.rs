//! Request orchestrator
//!
//! `ChatSession` owns the whole client state: the conversation store, the
//! streaming presenter, the transport and the selected language. One send
//! runs in three phases:
//! 1. `begin`: guard, append the user message, build the request
//! 2. network await (the only suspension point besides reveal ticks)
//! 3. `complete`: record an inline error, or hand the answer to a reveal

use tracing::{debug, info, warn};

use crate::client::{ChatOutcome, ChatRequest, ChatTransport, HealthStatus};
use crate::conversation::{ConversationStore, RequestState};
use crate::errors::Result;
use crate::streaming::{Reveal, RevealObserver, RevealOutcome, StreamingPresenter};
use crate::types::Language;

/// Hooks for rendering the parts of a send outside the reveal itself
pub trait SessionObserver: RevealObserver {
    /// Request dispatched; the loading indicator should start
    fn on_request_started(&mut self, _request: &ChatRequest) {}

    /// Response decoded (success or failure); the loading indicator stops
    fn on_response(&mut self, _outcome: &ChatOutcome) {}

    /// An inline error message was appended
    fn on_error(&mut self, _message: &str) {}
}

impl SessionObserver for crate::streaming::NoopObserver {}

/// Result of `complete`
#[derive(Debug)]
pub enum Completion {
    /// Answer ready to be revealed
    Reveal(Reveal),

    /// Inline error recorded
    Failed(String),

    /// No request was pending
    Ignored,
}

/// How one `send_message` call ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Blank input or a cycle already running
    Ignored,

    /// Answer revealed and committed
    Answered { frames: usize },

    /// Reveal cancelled by a newer one
    Superseded,

    /// Error message appended to the conversation
    Failed { message: String },
}

/// One chat session
pub struct ChatSession<T: ChatTransport> {
    store: ConversationStore,
    presenter: StreamingPresenter,
    transport: T,
    language: Option<Language>,
}

impl<T: ChatTransport> ChatSession<T> {
    /// Create session with the default greeting and tick
    pub fn new(transport: T, language: Option<Language>) -> Self {
        Self::with_parts(
            transport,
            language,
            ConversationStore::default(),
            StreamingPresenter::default(),
        )
    }

    /// Create session from explicit parts
    pub fn with_parts(
        transport: T,
        language: Option<Language>,
        store: ConversationStore,
        presenter: StreamingPresenter,
    ) -> Self {
        Self {
            store,
            presenter,
            transport,
            language,
        }
    }

    /// Phase 1: accept the message and build the request
    ///
    /// Returns None (and does nothing) for blank input or while a cycle is
    /// running.
    pub fn begin(&mut self, text: &str) -> Option<ChatRequest> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            debug!("ignoring blank input");
            return None;
        }
        if !self.store.is_idle() {
            debug!(state = ?self.store.state(), "ignoring input while busy");
            return None;
        }
        if !self.store.append_user_message(trimmed) {
            return None;
        }

        Some(ChatRequest {
            user_message: trimmed.to_string(),
            language: self.language,
        })
    }

    /// Phase 3: map the decoded outcome onto the store and presenter
    pub fn complete(&mut self, outcome: ChatOutcome) -> Completion {
        if self.store.state() != RequestState::AwaitingResponse {
            warn!(outcome = outcome.kind(), "response arrived with no pending request");
            return Completion::Ignored;
        }

        info!(outcome = outcome.kind(), "chat response");
        match outcome {
            ChatOutcome::Success { text } => {
                if !self.store.begin_reveal() {
                    return Completion::Ignored;
                }
                Completion::Reveal(self.presenter.start(text))
            }
            failure => {
                let message = failure
                    .error_message()
                    .unwrap_or_else(|| crate::client::UNEXPECTED_RESPONSE_MESSAGE.to_string());
                self.store.record_error(&message);
                Completion::Failed(message)
            }
        }
    }

    /// Send one message and drive it to completion
    pub async fn send_message<O>(&mut self, text: &str, observer: &mut O) -> SendOutcome
    where
        O: SessionObserver + ?Sized,
    {
        let Some(request) = self.begin(text) else {
            return SendOutcome::Ignored;
        };

        observer.on_request_started(&request);
        let outcome = match self.transport.post_chat(&request).await {
            Ok(raw) => ChatOutcome::decode(&raw),
            Err(e) => {
                warn!("chat request failed: {}", e);
                ChatOutcome::from_error(&e)
            }
        };
        observer.on_response(&outcome);

        match self.complete(outcome) {
            Completion::Reveal(reveal) => match reveal.run(&mut self.store, observer).await {
                RevealOutcome::Committed { frames } => SendOutcome::Answered { frames },
                RevealOutcome::Superseded { .. } => SendOutcome::Superseded,
            },
            Completion::Failed(message) => {
                observer.on_error(&message);
                SendOutcome::Failed { message }
            }
            Completion::Ignored => SendOutcome::Ignored,
        }
    }

    /// Query the backend health endpoint
    pub async fn health(&self) -> Result<HealthStatus> {
        self.transport.health().await
    }

    /// Change the target language; refused while a cycle is running
    pub fn set_language(&mut self, language: Option<Language>) -> bool {
        if !self.store.is_idle() {
            return false;
        }
        info!(language = ?language, "language changed");
        self.language = language;
        true
    }

    pub fn language(&self) -> Option<Language> {
        self.language
    }

    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    pub fn presenter(&self) -> &StreamingPresenter {
        &self.presenter
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::RawResponse;
    use crate::errors::ChatError;
    use crate::streaming::NoopObserver;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StaticTransport {
        status: u16,
        body: &'static str,
        calls: AtomicUsize,
    }

    impl StaticTransport {
        fn new(status: u16, body: &'static str) -> Self {
            Self {
                status,
                body,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ChatTransport for StaticTransport {
        async fn post_chat(&self, _request: &ChatRequest) -> Result<RawResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(RawResponse {
                status: self.status,
                body: self.body.to_string(),
            })
        }

        async fn health(&self) -> Result<HealthStatus> {
            Err(ChatError::Transport("no health endpoint".to_string()))
        }
    }

    #[test]
    fn test_begin_builds_trimmed_request() {
        let mut session = ChatSession::new(StaticTransport::new(200, "{}"), Some(Language::Go));
        let request = session.begin("  hi there \n").unwrap();
        assert_eq!(request.user_message, "hi there");
        assert_eq!(request.language, Some(Language::Go));
        assert_eq!(session.store().len(), 2);
        assert_eq!(session.store().state(), RequestState::AwaitingResponse);
    }

    #[test]
    fn test_begin_guards() {
        let mut session = ChatSession::new(StaticTransport::new(200, "{}"), None);
        assert!(session.begin("   ").is_none());
        assert!(session.begin("one").is_some());
        assert!(session.begin("two").is_none());
        assert_eq!(session.store().len(), 2);
    }

    #[test]
    fn test_complete_without_pending_request() {
        let mut session = ChatSession::new(StaticTransport::new(200, "{}"), None);
        let completion = session.complete(ChatOutcome::UnexpectedResponse);
        assert!(matches!(completion, Completion::Ignored));
        assert_eq!(session.store().len(), 1);
    }

    #[test]
    fn test_complete_failure_records_error() {
        let mut session = ChatSession::new(StaticTransport::new(200, "{}"), None);
        session.begin("hi");
        let completion = session.complete(ChatOutcome::ApplicationError {
            detail: "rate limited".to_string(),
        });
        assert!(matches!(completion, Completion::Failed(ref m) if m == "Error: rate limited"));
        assert!(session.store().is_idle());
    }

    #[tokio::test(start_paused = true)]
    async fn test_send_message_success() {
        let mut session = ChatSession::new(StaticTransport::new(200, r#"{"response": "Hi"}"#), None);
        let outcome = session.send_message("hello", &mut NoopObserver).await;

        assert_eq!(outcome, SendOutcome::Answered { frames: 3 });
        assert_eq!(session.store().last_message().unwrap().text(), "Hi");
        assert!(session.store().is_idle());
        assert_eq!(session.transport().calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_send_blank_issues_no_request() {
        let mut session = ChatSession::new(StaticTransport::new(200, r#"{"response": "Hi"}"#), None);
        let outcome = session.send_message(" \t ", &mut NoopObserver).await;

        assert_eq!(outcome, SendOutcome::Ignored);
        assert_eq!(session.transport().calls.load(Ordering::SeqCst), 0);
        assert_eq!(session.store().len(), 1);
    }

    #[test]
    fn test_health_error_propagates() {
        let session = ChatSession::new(StaticTransport::new(200, "{}"), None);
        let result = tokio_test::block_on(session.health());
        assert!(matches!(result, Err(ChatError::Transport(_))));
    }

    #[test]
    fn test_set_language_only_when_idle() {
        let mut session = ChatSession::new(StaticTransport::new(200, "{}"), None);
        assert!(session.set_language(Some(Language::Rust)));
        assert_eq!(session.language(), Some(Language::Rust));

        session.begin("hi");
        assert!(!session.set_language(Some(Language::Java)));
        assert_eq!(session.language(), Some(Language::Rust));
    }
}
