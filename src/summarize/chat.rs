//! Hosted chat-completion summarization backend.
//!
//! Talks to any OpenAI-compatible `/chat/completions` endpoint: JSON POST
//! with bearer auth, fixed model/temperature/max-tokens from configuration,
//! and the structured interview prompt.

use crate::config::ChatBackendConfig;
use crate::error::{RecapError, Result};
use crate::summarize::prompt;
use crate::summarize::summarizer::Summarizer;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// Request timeout for the hosted call. Summaries of long transcripts can
/// take a while to generate; connect failures should still surface fast.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Chat message role on the wire.
#[derive(Debug, Clone, Copy)]
enum Role {
    System,
    User,
}

impl Role {
    fn as_str(self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
        }
    }
}

/// Summarizer that delegates to a hosted chat-completion API.
#[derive(Clone)]
pub struct ChatSummarizer {
    config: ChatBackendConfig,
    client: Client,
}

impl ChatSummarizer {
    /// Create a new chat summarizer.
    pub fn new(config: ChatBackendConfig) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { config, client }
    }

    fn message(role: Role, content: &str) -> Value {
        serde_json::json!({
            "role": role.as_str(),
            "content": content,
        })
    }

    /// Pull the assistant's text out of a chat-completion response body.
    fn extract_content(payload: &Value) -> Result<String> {
        payload["choices"]
            .as_array()
            .and_then(|choices| choices.first())
            .and_then(|choice| choice["message"]["content"].as_str())
            .map(|content| content.trim().to_string())
            .ok_or_else(|| RecapError::SummarizationFailed {
                message: format!("unparseable chat-completion response: {payload}"),
            })
    }
}

#[async_trait]
impl Summarizer for ChatSummarizer {
    async fn summarize(&self, transcript: &str) -> Result<String> {
        let body = serde_json::json!({
            "model": self.config.model,
            "messages": [
                Self::message(Role::System, prompt::SYSTEM_PROMPT),
                Self::message(Role::User, &prompt::interview_prompt(transcript)),
            ],
            "temperature": self.config.temperature,
            "max_tokens": self.config.max_tokens,
        });

        let response = self
            .client
            .post(&self.config.endpoint)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| RecapError::SummarizationFailed {
                message: format!("chat-completion request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(RecapError::SummarizationFailed {
                message: format!("chat-completion API returned {status}: {text}"),
            });
        }

        let payload: Value =
            response
                .json()
                .await
                .map_err(|e| RecapError::SummarizationFailed {
                    message: format!("invalid chat-completion response body: {e}"),
                })?;

        Self::extract_content(&payload)
    }

    fn name(&self) -> &str {
        &self.config.model
    }

    fn max_input_chars(&self) -> usize {
        self.config.max_input_chars
    }
}
