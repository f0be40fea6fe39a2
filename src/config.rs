use crate::defaults;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub transcription: TranscriptionConfig,
    pub summarization: SummarizationConfig,
    pub extraction: ExtractionConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    pub max_upload_mb: u32,
}

/// Speech-to-text configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TranscriptionConfig {
    pub model: String,
    pub language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threads: Option<usize>,
}

/// Summarization backend selection plus per-backend parameters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SummarizationConfig {
    pub backend: SummarizerBackend,
    pub chat: ChatBackendConfig,
    pub seq2seq: Seq2SeqBackendConfig,
    pub extractive: ExtractiveBackendConfig,
}

/// Summarization backend enumeration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum SummarizerBackend {
    /// Hosted OpenAI-compatible chat-completion call
    Chat,
    /// Local quantized Flan-T5 via candle
    Seq2seq,
    /// Deterministic sentence-scoring summary, no model
    Extractive,
}

/// Hosted chat-completion backend parameters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChatBackendConfig {
    pub endpoint: String,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub max_input_chars: usize,
    /// Normally supplied via RECAP_OPENAI_API_KEY rather than on disk.
    pub api_key: String,
}

/// Local seq2seq backend parameters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Seq2SeqBackendConfig {
    pub model: String,
    pub min_new_tokens: usize,
    pub max_new_tokens: usize,
    pub max_input_chars: usize,
}

/// Extractive backend parameters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExtractiveBackendConfig {
    pub sentences: usize,
}

/// Key-point / topic extraction configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExtractionConfig {
    pub key_points: KeyPointStrategy,
    pub key_point_count: usize,
    pub topic_count: usize,
}

/// Key-point extraction strategy
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum KeyPointStrategy {
    /// Parse the "Key Points" section out of a structured chat summary
    Structured,
    /// Rank transcript sentences by lexical score
    Scored,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: defaults::LISTEN_ADDR.to_string(),
            max_upload_mb: defaults::MAX_UPLOAD_MB,
        }
    }
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            model: defaults::DEFAULT_MODEL.to_string(),
            language: defaults::DEFAULT_LANGUAGE.to_string(),
            threads: None,
        }
    }
}

impl Default for SummarizationConfig {
    fn default() -> Self {
        Self {
            backend: SummarizerBackend::Extractive,
            chat: ChatBackendConfig::default(),
            seq2seq: Seq2SeqBackendConfig::default(),
            extractive: ExtractiveBackendConfig::default(),
        }
    }
}

impl Default for ChatBackendConfig {
    fn default() -> Self {
        Self {
            endpoint: defaults::CHAT_ENDPOINT.to_string(),
            model: defaults::CHAT_MODEL.to_string(),
            temperature: defaults::CHAT_TEMPERATURE,
            max_tokens: defaults::CHAT_MAX_TOKENS,
            max_input_chars: defaults::CHAT_MAX_INPUT_CHARS,
            api_key: String::new(),
        }
    }
}

impl Default for Seq2SeqBackendConfig {
    fn default() -> Self {
        Self {
            model: defaults::SEQ2SEQ_MODEL.to_string(),
            min_new_tokens: defaults::SEQ2SEQ_MIN_NEW_TOKENS,
            max_new_tokens: defaults::SEQ2SEQ_MAX_NEW_TOKENS,
            max_input_chars: defaults::SEQ2SEQ_MAX_INPUT_CHARS,
        }
    }
}

impl Default for ExtractiveBackendConfig {
    fn default() -> Self {
        Self {
            sentences: defaults::SUMMARY_SENTENCES,
        }
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            key_points: KeyPointStrategy::Scored,
            key_point_count: defaults::KEY_POINT_COUNT,
            topic_count: defaults::TOPIC_COUNT,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Returns an error if the file contains invalid TOML.
    /// Missing fields will use default values.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a file or return defaults if file doesn't exist
    ///
    /// Only returns defaults if the file is missing.
    /// Returns errors for invalid TOML.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        match Self::load(path) {
            Ok(config) => Ok(config),
            Err(e) => {
                if e.downcast_ref::<std::io::Error>()
                    .map(|io_err| io_err.kind() == std::io::ErrorKind::NotFound)
                    .unwrap_or(false)
                {
                    Ok(Self::default())
                } else {
                    Err(e)
                }
            }
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - RECAP_MODEL → transcription.model
    /// - RECAP_LANGUAGE → transcription.language
    /// - RECAP_LISTEN_ADDR → server.listen_addr
    /// - RECAP_OPENAI_API_KEY → summarization.chat.api_key
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(model) = std::env::var("RECAP_MODEL")
            && !model.is_empty()
        {
            self.transcription.model = model;
        }

        if let Ok(language) = std::env::var("RECAP_LANGUAGE")
            && !language.is_empty()
        {
            self.transcription.language = language;
        }

        if let Ok(addr) = std::env::var("RECAP_LISTEN_ADDR")
            && !addr.is_empty()
        {
            self.server.listen_addr = addr;
        }

        if let Ok(key) = std::env::var("RECAP_OPENAI_API_KEY")
            && !key.is_empty()
        {
            self.summarization.chat.api_key = key;
        }

        self
    }

    /// Upload size cap in bytes.
    pub fn max_upload_bytes(&self) -> usize {
        self.server.max_upload_mb as usize * 1024 * 1024
    }

    /// Get the default configuration file path
    ///
    /// Returns ~/.config/recap/config.toml on Linux
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join("recap")
            .join("config.toml")
    }
}
