//! The analysis result record.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Complete output of one pipeline run.
///
/// Constructed exactly once per request and never mutated afterwards. This
/// is a response value, not persisted state.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AnalysisResult {
    /// Full transcript of the recording.
    pub transcript: String,
    /// Natural-language summary produced by the configured backend.
    pub summary: String,
    /// Key points in extraction order.
    pub key_points: Vec<String>,
    /// Topics discussed, most frequent first.
    pub topics_discussed: Vec<String>,
    /// Recording duration in seconds, always >= 0.
    pub duration_seconds: f64,
    /// Transcription confidence in [0, 1]; absent when the backend
    /// reports none.
    pub confidence: Option<f32>,
    /// Approximate speaker count, >= 1 when present; absent for an
    /// empty transcript.
    pub speaker_count: Option<u32>,
    /// When this analysis was produced.
    pub generated_at: DateTime<Utc>,
}
