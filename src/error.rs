//! Error types for recap.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecapError {
    // Configuration errors
    #[error("Configuration file not found at {path}")]
    ConfigFileNotFound { path: String },

    #[error("Failed to parse configuration: {message}")]
    ConfigParse { message: String },

    #[error("Invalid configuration value for {key}: {message}")]
    ConfigInvalidValue { key: String, message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    // Audio normalization errors
    #[error("Unsupported audio format: {message}")]
    UnsupportedAudioFormat { message: String },

    // Transcription errors
    #[error("Transcription model not found at {path}")]
    TranscriptionModelNotFound { path: String },

    #[error("Transcription failed: {message}")]
    TranscriptionFailed { message: String },

    // Summarization errors
    #[error("Summarization failed: {message}")]
    SummarizationFailed { message: String },

    // Extraction degraded its output instead of failing the request.
    // Callers substitute defaults and continue; never surfaced over HTTP.
    #[error("Extraction degraded: {message}")]
    ExtractionDegraded { message: String },

    // HTTP server errors
    #[error("Server error: {message}")]
    Server { message: String },

    // General I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Generic error for cases not covered above
    #[error("{0}")]
    Other(String),
}

impl RecapError {
    /// Whether this error is the caller's fault (bad upload) rather than ours.
    ///
    /// The HTTP layer maps these to status 400; everything else is 500.
    pub fn is_client_error(&self) -> bool {
        matches!(self, RecapError::UnsupportedAudioFormat { .. })
    }
}

// Type alias for convenience
pub type Result<T> = std::result::Result<T, RecapError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_unsupported_audio_format_display() {
        let error = RecapError::UnsupportedAudioFormat {
            message: "unknown container".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Unsupported audio format: unknown container"
        );
    }

    #[test]
    fn test_transcription_model_not_found_display() {
        let error = RecapError::TranscriptionModelNotFound {
            path: "/models/ggml-base.bin".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Transcription model not found at /models/ggml-base.bin"
        );
    }

    #[test]
    fn test_transcription_failed_display() {
        let error = RecapError::TranscriptionFailed {
            message: "inference error".to_string(),
        };
        assert_eq!(error.to_string(), "Transcription failed: inference error");
    }

    #[test]
    fn test_summarization_failed_display() {
        let error = RecapError::SummarizationFailed {
            message: "backend returned 503".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Summarization failed: backend returned 503"
        );
    }

    #[test]
    fn test_extraction_degraded_display() {
        let error = RecapError::ExtractionDegraded {
            message: "empty transcript".to_string(),
        };
        assert_eq!(error.to_string(), "Extraction degraded: empty transcript");
    }

    #[test]
    fn test_config_invalid_value_display() {
        let error = RecapError::ConfigInvalidValue {
            key: "summarization.backend".to_string(),
            message: "unknown backend".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid configuration value for summarization.backend: unknown backend"
        );
    }

    #[test]
    fn test_other_display() {
        let error = RecapError::Other("unexpected error".to_string());
        assert_eq!(error.to_string(), "unexpected error");
    }

    #[test]
    fn test_from_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let error: RecapError = io_error.into();
        assert!(error.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_toml_error() {
        let toml_str = "invalid = toml = syntax";
        let toml_error = toml::from_str::<toml::Value>(toml_str).unwrap_err();
        let error: RecapError = toml_error.into();
        assert!(error.to_string().contains("Configuration error"));
    }

    #[test]
    fn test_is_client_error_partition() {
        let client = RecapError::UnsupportedAudioFormat {
            message: "garbage".to_string(),
        };
        assert!(client.is_client_error());

        let server = RecapError::TranscriptionFailed {
            message: "oom".to_string(),
        };
        assert!(!server.is_client_error());

        let server = RecapError::SummarizationFailed {
            message: "timeout".to_string(),
        };
        assert!(!server.is_client_error());
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_result() -> Result<i32> {
            Ok(42)
        }
        assert_eq!(returns_result().unwrap(), 42);
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<RecapError>();
        assert_sync::<RecapError>();
    }

    #[test]
    fn test_error_source_chain_io() {
        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let error: RecapError = io_error.into();

        let error_trait: &dyn std::error::Error = &error;
        assert!(error_trait.source().is_some());
    }
}
