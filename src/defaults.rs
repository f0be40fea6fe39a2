//! Default configuration constants for recap.
//!
//! This module provides shared constants used across different configuration types
//! to ensure consistency and eliminate duplication.

/// Audio sample rate expected by the transcription model, in Hz.
///
/// 16kHz is the standard for speech recognition and provides a good balance
/// between quality and computational efficiency for voice applications.
pub const SAMPLE_RATE: u32 = 16000;

/// Canonical audio container the normalizer re-encodes to.
pub const CANONICAL_EXTENSION: &str = "wav";

/// Default Whisper model name.
///
/// "base.en" is English-only optimized, a good balance between speed and
/// accuracy for interview transcription. Use "base" for multilingual audio.
pub const DEFAULT_MODEL: &str = "base.en";

/// Default language code for transcription.
///
/// Set to "auto" to let Whisper detect the spoken language.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Language value that triggers automatic language detection.
pub const AUTO_LANGUAGE: &str = "auto";

/// Default HTTP listen address.
pub const LISTEN_ADDR: &str = "127.0.0.1:8080";

/// Default upload size cap in megabytes.
///
/// A 50 MB WAV holds roughly 25 minutes of 16-bit mono audio at 16kHz,
/// ample for a single interview recording.
pub const MAX_UPLOAD_MB: u32 = 50;

/// Default chat-completion endpoint (OpenAI-compatible).
pub const CHAT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// Default chat model for hosted summarization.
pub const CHAT_MODEL: &str = "gpt-4";

/// Default sampling temperature for hosted summarization.
pub const CHAT_TEMPERATURE: f64 = 0.5;

/// Default completion token budget for hosted summarization.
pub const CHAT_MAX_TOKENS: u32 = 1000;

/// Transcript length cap (characters) before a hosted summarization call.
pub const CHAT_MAX_INPUT_CHARS: usize = 16_000;

/// Default local seq2seq summarization model.
pub const SEQ2SEQ_MODEL: &str = "flan-t5-base";

/// Minimum tokens the seq2seq decoder must emit before honoring end-of-sequence.
pub const SEQ2SEQ_MIN_NEW_TOKENS: usize = 40;

/// Maximum tokens the seq2seq decoder may emit.
pub const SEQ2SEQ_MAX_NEW_TOKENS: usize = 256;

/// Transcript length cap (characters) before a seq2seq summarization call.
pub const SEQ2SEQ_MAX_INPUT_CHARS: usize = 4_000;

/// Sentences kept by the extractive summarizer.
pub const SUMMARY_SENTENCES: usize = 3;

/// Key points reported per analysis.
pub const KEY_POINT_COUNT: usize = 5;

/// Topics reported per analysis.
pub const TOPIC_COUNT: usize = 5;

/// Report the GPU backend compiled into this build.
///
/// Returns a human-readable name based on the compile-time feature flags.
/// Only one GPU backend can be active at a time; if none is enabled, returns "CPU".
pub fn gpu_backend() -> &'static str {
    if cfg!(feature = "cuda") {
        "CUDA"
    } else if cfg!(feature = "vulkan") {
        "Vulkan"
    } else if cfg!(feature = "hipblas") {
        "HipBLAS (AMD)"
    } else if cfg!(feature = "openblas") {
        "OpenBLAS"
    } else {
        "CPU"
    }
}
