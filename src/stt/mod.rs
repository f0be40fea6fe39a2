//! Speech-to-text transcription backends.

pub mod transcriber;
pub mod whisper;

pub use transcriber::{MockTranscriber, Transcriber, TranscriptionResult};
pub use whisper::{WhisperConfig, WhisperTranscriber};
