use crate::error::{RecapError, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// Trait for transcript summarization.
///
/// This trait allows swapping backends (hosted chat model, local seq2seq,
/// extractive scoring, mock) without touching the pipeline.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Produce a natural-language summary of a transcript.
    ///
    /// Callers truncate the input to [`Summarizer::max_input_chars`] before
    /// invocation; implementations may assume it fits.
    async fn summarize(&self, transcript: &str) -> Result<String>;

    /// Backend name for logging.
    fn name(&self) -> &str;

    /// Input length cap in characters for this backend.
    fn max_input_chars(&self) -> usize;
}

/// Implement Summarizer for Arc<T> to allow sharing across requests.
#[async_trait]
impl<T: Summarizer> Summarizer for Arc<T> {
    async fn summarize(&self, transcript: &str) -> Result<String> {
        (**self).summarize(transcript).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn max_input_chars(&self) -> usize {
        (**self).max_input_chars()
    }
}

/// Truncate text to at most `max_chars` characters, cutting back to the last
/// word boundary so the backend never sees a torn word.
pub fn truncate_to_chars(text: &str, max_chars: usize) -> &str {
    if text.chars().count() <= max_chars {
        return text;
    }

    let byte_limit = text
        .char_indices()
        .nth(max_chars)
        .map_or(text.len(), |(i, _)| i);
    let head = &text[..byte_limit];

    match head.rfind(char::is_whitespace) {
        Some(pos) => head[..pos].trim_end(),
        None => head,
    }
}

/// Mock summarizer for testing
#[derive(Debug, Clone)]
pub struct MockSummarizer {
    response: String,
    max_input_chars: usize,
    should_fail: bool,
    echo: bool,
}

impl MockSummarizer {
    /// Create a new mock summarizer with default settings
    pub fn new() -> Self {
        Self {
            response: "mock summary".to_string(),
            max_input_chars: usize::MAX,
            should_fail: false,
            echo: false,
        }
    }

    /// Configure the mock to echo its input back as the summary,
    /// letting tests observe exactly what the pipeline passed in.
    pub fn with_echo(mut self) -> Self {
        self.echo = true;
        self
    }

    /// Configure the mock to return a specific summary
    pub fn with_response(mut self, response: &str) -> Self {
        self.response = response.to_string();
        self
    }

    /// Configure the mock's input cap
    pub fn with_max_input_chars(mut self, max: usize) -> Self {
        self.max_input_chars = max;
        self
    }

    /// Configure the mock to fail on summarize
    pub fn with_failure(mut self) -> Self {
        self.should_fail = true;
        self
    }
}

impl Default for MockSummarizer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Summarizer for MockSummarizer {
    async fn summarize(&self, transcript: &str) -> Result<String> {
        if self.should_fail {
            Err(RecapError::SummarizationFailed {
                message: "mock summarization failure".to_string(),
            })
        } else if self.echo {
            Ok(transcript.to_string())
        } else {
            Ok(self.response.clone())
        }
    }

    fn name(&self) -> &str {
        "mock"
    }

    fn max_input_chars(&self) -> usize {
        self.max_input_chars
    }
}
