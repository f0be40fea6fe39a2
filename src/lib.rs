//! recap - Interview audio summarization service
//!
//! Upload an interview recording, get back a structured summary: transcript,
//! natural-language summary, key points, topics, duration, confidence, and
//! an approximate speaker count.

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

pub mod analysis;
pub mod audio;
pub mod cli;
pub mod config;
pub mod defaults;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod server;
pub mod stt;
pub mod summarize;

// Core traits (transcribe → summarize), with mocks for test substitution
pub use stt::transcriber::{MockTranscriber, Transcriber, TranscriptionResult};
pub use summarize::summarizer::{MockSummarizer, Summarizer};

// Pipeline
pub use pipeline::{AnalysisPipeline, AnalysisResult};

// Error handling
pub use error::{RecapError, Result};

// Config
pub use config::{Config, KeyPointStrategy, SummarizerBackend};

/// Build version string with optional git commit hash.
///
/// Returns `"0.1.0+abc1234"` when git hash is available, `"0.1.0"` otherwise.
pub fn version_string() -> String {
    let version = env!("CARGO_PKG_VERSION");
    match option_env!("GIT_HASH") {
        Some(hash) if !hash.is_empty() => format!("{}+{}", version, hash),
        _ => version.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_string_starts_with_cargo_version() {
        let ver = version_string();
        assert!(
            ver.starts_with(env!("CARGO_PKG_VERSION")),
            "version_string should start with CARGO_PKG_VERSION, got: {}",
            ver
        );
    }

    #[test]
    fn version_string_contains_plus_when_git_hash_present() {
        let ver = version_string();
        // In a git repo build, GIT_HASH is set → expect "0.1.0+<hash>"
        // In CI without git, expect plain "0.1.0"
        if option_env!("GIT_HASH").is_some_and(|h| !h.is_empty()) {
            assert!(
                ver.contains('+'),
                "With GIT_HASH set, version should contain '+', got: {}",
                ver
            );
            let hash_part = ver.split('+').nth(1).unwrap_or("");
            assert_eq!(
                hash_part.len(),
                7,
                "Git hash should be 7 chars, got: {}",
                hash_part
            );
        } else {
            assert_eq!(ver, env!("CARGO_PKG_VERSION"));
        }
    }
}
