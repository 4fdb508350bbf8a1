//! HTTP transport for the chat backend
//!
//! One POST per message, body read in full:
//! - Endpoint: POST <base_url>/chat
//! - Health: GET <base_url>/health
//! - No timeout unless configured

use std::error::Error as _;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::client::{ChatRequest, ChatTransport, HealthStatus, RawResponse};
use crate::errors::{ChatError, Result};

/// Default backend base URL
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Default chat endpoint path
pub const DEFAULT_CHAT_PATH: &str = "/chat";

/// Default health endpoint path
pub const DEFAULT_HEALTH_PATH: &str = "/health";

/// reqwest-backed transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
    chat_path: String,
    health_path: String,
}

impl HttpTransport {
    /// Create transport with default paths and no timeout
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_config(base_url, DEFAULT_CHAT_PATH, DEFAULT_HEALTH_PATH, None)
    }

    /// Create transport with custom configuration
    pub fn with_config(
        base_url: &str,
        chat_path: &str,
        health_path: &str,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(ChatError::HttpError)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            chat_path: chat_path.to_string(),
            health_path: health_path.to_string(),
        })
    }

    pub fn chat_url(&self) -> String {
        format!("{}{}", self.base_url, self.chat_path)
    }

    pub fn health_url(&self) -> String {
        format!("{}{}", self.base_url, self.health_path)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn post_chat(&self, request: &ChatRequest) -> Result<RawResponse> {
        let url = self.chat_url();
        debug!(%url, language = ?request.language, "POST chat");

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport_error)?;
        debug!(status, bytes = body.len(), "chat response received");

        Ok(RawResponse { status, body })
    }

    async fn health(&self) -> Result<HealthStatus> {
        let url = self.health_url();

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(ChatError::Transport(format!(
                "Health check failed: HTTP {}",
                response.status()
            )));
        }

        let body = response.text().await.map_err(transport_error)?;
        Ok(serde_json::from_str(&body)?)
    }

    fn endpoint(&self) -> String {
        self.chat_url()
    }
}

/// Flatten a reqwest error and its sources into one line
fn transport_error(err: reqwest::Error) -> ChatError {
    let mut description = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !description.contains(&cause_text) {
            description.push_str(": ");
            description.push_str(&cause_text);
        }
        source = cause.source();
    }
    ChatError::Transport(description)
}
