use crate::error::{RecapError, Result};
use std::sync::Arc;

/// Result of a transcription run.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptionResult {
    /// Transcribed text, trimmed.
    pub text: String,
    /// Backend-reported confidence in [0, 1].
    ///
    /// `None` when the model does not report one, never a fabricated 0.0,
    /// so callers can distinguish "unknown" from "genuinely low".
    pub confidence: Option<f32>,
}

/// Trait for speech-to-text transcription.
///
/// This trait allows swapping implementations (real Whisper vs mock).
pub trait Transcriber: Send + Sync {
    /// Transcribe audio samples to text.
    ///
    /// # Arguments
    /// * `audio` - Audio samples as 16-bit PCM at 16kHz mono
    ///
    /// # Returns
    /// Transcription result or error
    fn transcribe(&self, audio: &[i16]) -> Result<TranscriptionResult>;

    /// Get the name of the loaded model
    fn model_name(&self) -> &str;

    /// Check if the transcriber is ready
    fn is_ready(&self) -> bool;
}

/// Implement Transcriber for Arc<T> to allow sharing across requests.
impl<T: Transcriber> Transcriber for Arc<T> {
    fn transcribe(&self, audio: &[i16]) -> Result<TranscriptionResult> {
        (**self).transcribe(audio)
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }

    fn is_ready(&self) -> bool {
        (**self).is_ready()
    }
}

/// Mock transcriber for testing
#[derive(Debug, Clone)]
pub struct MockTranscriber {
    model_name: String,
    response: String,
    confidence: Option<f32>,
    should_fail: bool,
}

impl MockTranscriber {
    /// Create a new mock transcriber with default settings
    pub fn new(model_name: &str) -> Self {
        Self {
            model_name: model_name.to_string(),
            response: "mock transcription".to_string(),
            confidence: None,
            should_fail: false,
        }
    }

    /// Configure the mock to return a specific transcript
    pub fn with_response(mut self, response: &str) -> Self {
        self.response = response.to_string();
        self
    }

    /// Configure the mock to report a confidence score
    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = Some(confidence);
        self
    }

    /// Configure the mock to fail on transcribe
    pub fn with_failure(mut self) -> Self {
        self.should_fail = true;
        self
    }
}

impl Transcriber for MockTranscriber {
    fn transcribe(&self, _audio: &[i16]) -> Result<TranscriptionResult> {
        if self.should_fail {
            Err(RecapError::TranscriptionFailed {
                message: "mock transcription failure".to_string(),
            })
        } else {
            Ok(TranscriptionResult {
                text: self.response.clone(),
                confidence: self.confidence,
            })
        }
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn is_ready(&self) -> bool {
        !self.should_fail
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_transcriber_returns_response() {
        let transcriber = MockTranscriber::new("test-model").with_response("Hello, this is a test");

        let audio = vec![0i16; 1000];
        let result = transcriber.transcribe(&audio).unwrap();

        assert_eq!(result.text, "Hello, this is a test");
        assert_eq!(result.confidence, None);
    }

    #[test]
    fn test_mock_transcriber_reports_configured_confidence() {
        let transcriber = MockTranscriber::new("test-model")
            .with_response("hi")
            .with_confidence(0.87);

        let result = transcriber.transcribe(&[0i16; 10]).unwrap();
        assert_eq!(result.confidence, Some(0.87));
    }

    #[test]
    fn test_mock_transcriber_returns_error_when_configured() {
        let transcriber = MockTranscriber::new("test-model").with_failure();

        let audio = vec![0i16; 1000];
        let result = transcriber.transcribe(&audio);

        match result {
            Err(RecapError::TranscriptionFailed { message }) => {
                assert_eq!(message, "mock transcription failure");
            }
            _ => panic!("Expected TranscriptionFailed error"),
        }
    }

    #[test]
    fn test_mock_transcriber_model_name() {
        let transcriber = MockTranscriber::new("whisper-base");
        assert_eq!(transcriber.model_name(), "whisper-base");
    }

    #[test]
    fn test_mock_transcriber_is_ready() {
        let ready = MockTranscriber::new("test-model");
        assert!(ready.is_ready());

        let failing = MockTranscriber::new("test-model").with_failure();
        assert!(!failing.is_ready());
    }

    #[test]
    fn test_transcriber_trait_is_object_safe() {
        // Verify that we can use Box<dyn Transcriber>
        let transcriber: Box<dyn Transcriber> =
            Box::new(MockTranscriber::new("test-model").with_response("boxed test"));

        assert_eq!(transcriber.model_name(), "test-model");
        assert!(transcriber.is_ready());

        let result = transcriber.transcribe(&[0i16; 100]).unwrap();
        assert_eq!(result.text, "boxed test");
    }

    #[test]
    fn test_arc_transcriber_delegates() {
        let transcriber = Arc::new(MockTranscriber::new("shared").with_response("shared result"));

        let result = transcriber.transcribe(&[0i16; 10]).unwrap();
        assert_eq!(result.text, "shared result");
        assert_eq!(transcriber.model_name(), "shared");
    }

    #[test]
    fn test_mock_transcriber_builder_pattern() {
        // Builder methods can be chained; the last call wins
        let transcriber = MockTranscriber::new("model")
            .with_response("first response")
            .with_response("second response");

        let result = transcriber.transcribe(&[0i16; 10]).unwrap();
        assert_eq!(result.text, "second response");
    }

    #[test]
    fn test_mock_transcriber_empty_audio() {
        let transcriber = MockTranscriber::new("test-model");
        let empty_audio: Vec<i16> = vec![];
        assert!(transcriber.transcribe(&empty_audio).is_ok());
    }
}
