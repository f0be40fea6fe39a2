//! The sequential analysis pipeline.
//!
//! One request runs normalize → transcribe → summarize → extract → assemble,
//! strictly in order, with no retries and no internal parallelism. Backends
//! are injected at construction and shared read-only across concurrent
//! requests.

use crate::analysis::{
    estimate_speaker_count, extract_topics, scored_key_points, structured_key_points,
};
use crate::audio::normalize;
use crate::config::{ExtractionConfig, KeyPointStrategy};
use crate::error::{RecapError, Result};
use crate::pipeline::result::AnalysisResult;
use crate::stt::Transcriber;
use crate::summarize::{Summarizer, truncate_to_chars};
use chrono::Utc;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Constructor-injected analysis pipeline.
pub struct AnalysisPipeline {
    transcriber: Arc<dyn Transcriber>,
    summarizer: Arc<dyn Summarizer>,
    extraction: ExtractionConfig,
}

impl AnalysisPipeline {
    /// Create a pipeline from explicit backends.
    pub fn new(
        transcriber: Arc<dyn Transcriber>,
        summarizer: Arc<dyn Summarizer>,
        extraction: ExtractionConfig,
    ) -> Self {
        Self {
            transcriber,
            summarizer,
            extraction,
        }
    }

    /// Name of the loaded transcription model.
    pub fn transcriber_model(&self) -> &str {
        self.transcriber.model_name()
    }

    /// Whether both injected backends are usable.
    pub fn is_ready(&self) -> bool {
        self.transcriber.is_ready()
    }

    /// Analyze an uploaded recording.
    ///
    /// `extension` is the declared file extension of the upload ("wav",
    /// "mp3", ...), used to decide whether canonical re-encoding is needed.
    ///
    /// # Errors
    /// - `UnsupportedAudioFormat` when the upload cannot be decoded
    /// - `TranscriptionFailed` when the speech model errors (fatal)
    /// - `SummarizationFailed` when the summary backend errors (fatal;
    ///   the caller may retry the whole request, not this stage)
    pub async fn analyze(&self, data: Vec<u8>, extension: &str) -> Result<AnalysisResult> {
        // Stage 1: normalize. Decoding is CPU-bound, keep it off the async workers.
        let extension = extension.to_string();
        let normalized = tokio::task::spawn_blocking(move || normalize(data, &extension))
            .await
            .map_err(|e| RecapError::Other(format!("normalize task failed: {e}")))??;

        let duration_seconds = normalized.duration_seconds;
        debug!(
            duration_seconds,
            source_rate = normalized.source_rate,
            reencoded = normalized.canonical_wav.is_some(),
            "audio normalized"
        );
        // The pipeline owns the canonical re-encoding; it is deleted when
        // this request finishes.
        let _canonical_wav = normalized.canonical_wav;

        // Stage 2: transcribe.
        let transcriber = Arc::clone(&self.transcriber);
        let samples = normalized.samples;
        let transcription = tokio::task::spawn_blocking(move || transcriber.transcribe(&samples))
            .await
            .map_err(|e| RecapError::Other(format!("transcribe task failed: {e}")))??;

        let transcript = transcription.text;
        info!(
            model = self.transcriber.model_name(),
            chars = transcript.len(),
            confidence = ?transcription.confidence,
            "transcription complete"
        );

        // Stages 3 + 4: summarize and extract. An empty transcript degrades
        // to defaults instead of failing the request.
        let (summary, key_points, topics_discussed, speaker_count) =
            if transcript.trim().is_empty() {
                let degraded = RecapError::ExtractionDegraded {
                    message: "empty transcript".to_string(),
                };
                warn!(error = %degraded, "proceeding with default outputs");
                (String::new(), Vec::new(), Vec::new(), None)
            } else {
                let truncated = truncate_to_chars(&transcript, self.summarizer.max_input_chars());
                let summary = self.summarizer.summarize(truncated).await?;
                debug!(backend = self.summarizer.name(), "summary generated");

                let key_points = match self.extraction.key_points {
                    KeyPointStrategy::Structured => structured_key_points(&summary),
                    KeyPointStrategy::Scored => {
                        scored_key_points(&transcript, self.extraction.key_point_count)
                    }
                };
                let topics = extract_topics(&transcript, self.extraction.topic_count);
                let speakers = estimate_speaker_count(&transcript);

                (summary, key_points, topics, speakers)
            };

        // Stage 5: assemble the immutable result.
        Ok(AnalysisResult {
            transcript,
            summary,
            key_points,
            topics_discussed,
            duration_seconds,
            confidence: transcription.confidence,
            speaker_count,
            generated_at: Utc::now(),
        })
    }

    /// Analyze a recording on disk; the extension comes from the path.
    pub async fn analyze_file(&self, path: &Path) -> Result<AnalysisResult> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_string();
        let data = tokio::fs::read(path).await?;
        self.analyze(data, &extension).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stt::MockTranscriber;
    use crate::summarize::MockSummarizer;
    use std::io::Cursor;

    fn wav_bytes(seconds: f64, sample_rate: u32) -> Vec<u8> {
        let mut cursor = Cursor::new(Vec::new());
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
        for _ in 0..(seconds * sample_rate as f64) as usize {
            writer.write_sample(100i16).unwrap();
        }
        writer.finalize().unwrap();
        cursor.into_inner()
    }

    fn pipeline(
        transcriber: MockTranscriber,
        summarizer: MockSummarizer,
        extraction: ExtractionConfig,
    ) -> AnalysisPipeline {
        AnalysisPipeline::new(Arc::new(transcriber), Arc::new(summarizer), extraction)
    }

    #[tokio::test]
    async fn full_run_assembles_all_fields() {
        let transcriber = MockTranscriber::new("mock-model")
            .with_response("I asked about scaling. You explained the Acme Dashboard design.")
            .with_confidence(0.93);
        let summarizer = MockSummarizer::new().with_response("a concise summary");
        let p = pipeline(transcriber, summarizer, ExtractionConfig::default());

        let result = p.analyze(wav_bytes(2.0, 16000), "wav").await.unwrap();

        assert!(result.transcript.contains("Acme Dashboard"));
        assert_eq!(result.summary, "a concise summary");
        assert!(!result.key_points.is_empty());
        assert!(
            result
                .topics_discussed
                .iter()
                .any(|t| t.eq_ignore_ascii_case("acme dashboard")),
            "topics: {:?}",
            result.topics_discussed
        );
        assert!((result.duration_seconds - 2.0).abs() < 0.01);
        assert_eq!(result.confidence, Some(0.93));
        assert!(result.speaker_count.unwrap() >= 2);
    }

    #[tokio::test]
    async fn empty_transcript_degrades_to_defaults() {
        let transcriber = MockTranscriber::new("mock-model").with_response("");
        // Summarizer configured to fail: it must never be called for an
        // empty transcript.
        let summarizer = MockSummarizer::new().with_failure();
        let p = pipeline(transcriber, summarizer, ExtractionConfig::default());

        let result = p.analyze(wav_bytes(1.0, 16000), "wav").await.unwrap();

        assert!(result.transcript.is_empty());
        assert!(result.summary.is_empty());
        assert!(result.key_points.is_empty());
        assert!(result.topics_discussed.is_empty());
        assert_eq!(result.speaker_count, None);
        assert!((result.duration_seconds - 1.0).abs() < 0.01);
    }

    #[tokio::test]
    async fn corrupt_audio_fails_with_unsupported_format() {
        let p = pipeline(
            MockTranscriber::new("mock-model"),
            MockSummarizer::new(),
            ExtractionConfig::default(),
        );

        let result = p.analyze(b"definitely not audio".to_vec(), "wav").await;

        assert!(matches!(
            result,
            Err(RecapError::UnsupportedAudioFormat { .. })
        ));
    }

    #[tokio::test]
    async fn transcriber_failure_is_fatal() {
        let p = pipeline(
            MockTranscriber::new("mock-model").with_failure(),
            MockSummarizer::new(),
            ExtractionConfig::default(),
        );

        let result = p.analyze(wav_bytes(1.0, 16000), "wav").await;

        assert!(matches!(result, Err(RecapError::TranscriptionFailed { .. })));
    }

    #[tokio::test]
    async fn summarizer_failure_is_fatal() {
        let p = pipeline(
            MockTranscriber::new("mock-model").with_response("some words were said here"),
            MockSummarizer::new().with_failure(),
            ExtractionConfig::default(),
        );

        let result = p.analyze(wav_bytes(1.0, 16000), "wav").await;

        assert!(matches!(result, Err(RecapError::SummarizationFailed { .. })));
    }

    #[tokio::test]
    async fn transcript_is_truncated_before_summarization() {
        let long_transcript =
            "word ".repeat(100).trim_end().to_string();
        let transcriber = MockTranscriber::new("mock-model").with_response(&long_transcript);
        // Echo mock returns exactly what the pipeline passed in
        let summarizer = MockSummarizer::new().with_echo().with_max_input_chars(50);
        let p = pipeline(transcriber, summarizer, ExtractionConfig::default());

        let result = p.analyze(wav_bytes(1.0, 16000), "wav").await.unwrap();

        assert!(
            result.summary.chars().count() <= 50,
            "summary input not truncated: {} chars",
            result.summary.chars().count()
        );
        // The full transcript is still reported untruncated
        assert_eq!(result.transcript, long_transcript);
    }

    #[tokio::test]
    async fn structured_strategy_parses_key_points_from_summary() {
        let structured_summary =
            "1. **Key Points**:\n- Point alpha.\n- Point beta.\n2. **Key Questions Asked**:\n- Q?";
        let extraction = ExtractionConfig {
            key_points: KeyPointStrategy::Structured,
            ..ExtractionConfig::default()
        };
        let p = pipeline(
            MockTranscriber::new("mock-model").with_response("non-empty transcript content"),
            MockSummarizer::new().with_response(structured_summary),
            extraction,
        );

        let result = p.analyze(wav_bytes(1.0, 16000), "wav").await.unwrap();

        assert_eq!(result.key_points, vec!["Point alpha.", "Point beta."]);
    }

    #[tokio::test]
    async fn scored_strategy_draws_key_points_from_transcript() {
        let extraction = ExtractionConfig {
            key_points: KeyPointStrategy::Scored,
            key_point_count: 1,
            ..ExtractionConfig::default()
        };
        let p = pipeline(
            MockTranscriber::new("mock-model")
                .with_response("Filler words only. Sarah Chen explained database sharding."),
            MockSummarizer::new().with_response("summary text"),
            extraction,
        );

        let result = p.analyze(wav_bytes(1.0, 16000), "wav").await.unwrap();

        assert_eq!(result.key_points.len(), 1);
        assert!(result.key_points[0].contains("Sarah Chen"));
    }

    #[tokio::test]
    async fn confidence_stays_absent_when_unreported() {
        let p = pipeline(
            MockTranscriber::new("mock-model").with_response("hello there"),
            MockSummarizer::new(),
            ExtractionConfig::default(),
        );

        let result = p.analyze(wav_bytes(1.0, 16000), "wav").await.unwrap();

        assert_eq!(result.confidence, None);
    }

    #[tokio::test]
    async fn analyze_file_uses_the_path_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("interview.wav");
        std::fs::write(&path, wav_bytes(1.0, 16000)).unwrap();

        let p = pipeline(
            MockTranscriber::new("mock-model").with_response("file input works"),
            MockSummarizer::new(),
            ExtractionConfig::default(),
        );

        let result = p.analyze_file(&path).await.unwrap();
        assert_eq!(result.transcript, "file input works");
    }

    #[tokio::test]
    async fn analyze_file_missing_path_is_io_error() {
        let p = pipeline(
            MockTranscriber::new("mock-model"),
            MockSummarizer::new(),
            ExtractionConfig::default(),
        );

        let result = p.analyze_file(Path::new("/nonexistent/audio.wav")).await;
        assert!(matches!(result, Err(RecapError::Io(_))));
    }

    #[test]
    fn accessors_reflect_injected_backends() {
        let p = pipeline(
            MockTranscriber::new("whisper-base"),
            MockSummarizer::new(),
            ExtractionConfig::default(),
        );
        assert_eq!(p.transcriber_model(), "whisper-base");
        assert!(p.is_ready());
    }
}
