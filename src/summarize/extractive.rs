//! Extractive summarization by sentence scoring.
//!
//! No model involved: pick the highest-scoring transcript sentences and join
//! them. Fully deterministic, so it doubles as the default backend when no
//! hosted API key or local model is configured.

use crate::analysis::sentence::rank_sentences;
use crate::config::ExtractiveBackendConfig;
use crate::error::Result;
use crate::summarize::summarizer::Summarizer;
use async_trait::async_trait;

/// Entity weight for summary selection. Heavier than key-point scoring:
/// sentences naming people, organizations, or products carry the story.
const SUMMARY_ENTITY_WEIGHT: u32 = 3;

/// Deterministic extractive summarizer.
#[derive(Debug, Clone)]
pub struct ExtractiveSummarizer {
    sentences: usize,
}

impl ExtractiveSummarizer {
    /// Create a summarizer keeping `config.sentences` top sentences.
    pub fn new(config: &ExtractiveBackendConfig) -> Self {
        Self {
            sentences: config.sentences,
        }
    }
}

#[async_trait]
impl Summarizer for ExtractiveSummarizer {
    async fn summarize(&self, transcript: &str) -> Result<String> {
        Ok(rank_sentences(transcript, self.sentences, SUMMARY_ENTITY_WEIGHT).join(" "))
    }

    fn name(&self) -> &str {
        "extractive"
    }

    fn max_input_chars(&self) -> usize {
        // Scoring is linear in input size; no backend limit to respect.
        usize::MAX
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summarizer(sentences: usize) -> ExtractiveSummarizer {
        ExtractiveSummarizer::new(&ExtractiveBackendConfig { sentences })
    }

    #[tokio::test]
    async fn selects_top_sentences() {
        let transcript = "We said hello. \
                          Sarah Chen presented the Acme Dashboard roadmap with migration details. \
                          The weather was discussed. \
                          Deployment automation reduced release friction substantially.";
        let summary = summarizer(2).summarize(transcript).await.unwrap();

        assert!(summary.contains("Sarah Chen"));
        assert!(summary.contains("Deployment automation"));
        assert!(!summary.contains("weather"));
    }

    #[tokio::test]
    async fn empty_transcript_yields_empty_summary() {
        let summary = summarizer(3).summarize("").await.unwrap();
        assert!(summary.is_empty());
    }

    #[tokio::test]
    async fn fewer_sentences_than_requested_returns_all() {
        let summary = summarizer(5).summarize("Only one sentence here.").await.unwrap();
        assert_eq!(summary, "Only one sentence here.");
    }

    #[tokio::test]
    async fn output_is_deterministic() {
        let transcript = "First topic covered extensively. Second topic covered briefly. \
                          Third topic with Kubernetes details. Fourth filler sentence.";
        let s = summarizer(2);
        let first = s.summarize(transcript).await.unwrap();
        for _ in 0..10 {
            assert_eq!(s.summarize(transcript).await.unwrap(), first);
        }
    }

    #[test]
    fn name_and_limit() {
        let s = summarizer(3);
        assert_eq!(s.name(), "extractive");
        assert_eq!(s.max_input_chars(), usize::MAX);
    }
}
