//! Whisper model metadata catalog.
//!
//! This module provides a catalog of available Whisper models,
//! including model information, availability checks, and defaults.

use std::path::PathBuf;

/// Metadata for a Whisper model.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelInfo {
    /// Model identifier (e.g., "tiny.en", "base", "small")
    pub name: &'static str,
    /// Model size in megabytes
    pub size_mb: u32,
    /// SHA-256 checksum for integrity verification; empty = skip verification
    pub sha256: &'static str,
    /// Download URL from HuggingFace
    pub url: &'static str,
    /// Whether this model supports English only
    pub english_only: bool,
}

/// Catalog of available Whisper models.
///
/// Models range from tiny (75 MB, fast, lower accuracy) to small (466 MB,
/// slower, higher accuracy). The `.en` suffix indicates English-only models,
/// which are faster and more accurate on English interviews.
pub const MODELS: &[ModelInfo] = &[
    ModelInfo {
        name: "tiny.en",
        size_mb: 75,
        sha256: "",
        url: "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-tiny.en.bin",
        english_only: true,
    },
    ModelInfo {
        name: "tiny",
        size_mb: 75,
        sha256: "",
        url: "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-tiny.bin",
        english_only: false,
    },
    ModelInfo {
        name: "base.en",
        size_mb: 142,
        sha256: "",
        url: "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-base.en.bin",
        english_only: true,
    },
    ModelInfo {
        name: "base",
        size_mb: 142,
        sha256: "",
        url: "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-base.bin",
        english_only: false,
    },
    ModelInfo {
        name: "small.en",
        size_mb: 466,
        sha256: "",
        url: "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-small.en.bin",
        english_only: true,
    },
    ModelInfo {
        name: "small",
        size_mb: 466,
        sha256: "",
        url: "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-small.bin",
        english_only: false,
    },
];

/// Find a model by name.
pub fn get_model(name: &str) -> Option<&'static ModelInfo> {
    MODELS.iter().find(|m| m.name == name)
}

/// Get all available models.
pub fn list_models() -> &'static [ModelInfo] {
    MODELS
}

/// Get the directory where models are stored.
///
/// Uses `~/.cache/recap/models/` on Linux/Unix.
pub fn models_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from(".cache"))
        .join("recap")
        .join("models")
}

/// Get the full path for a model file.
///
/// Always returns a path regardless of whether the model is in the catalog.
/// The file may or may not exist on disk.
pub fn model_path(name: &str) -> PathBuf {
    models_dir().join(format!("ggml-{name}.bin"))
}

/// Check if a model is installed.
pub fn is_model_installed(name: &str) -> bool {
    model_path(name).exists()
}

/// One-line listing entry for `recap models list`.
pub fn format_model_info(model: &ModelInfo) -> String {
    let installed = if is_model_installed(model.name) {
        " [installed]"
    } else {
        ""
    };
    let scope = if model.english_only {
        "English-only"
    } else {
        "multilingual"
    };
    format!(
        "{:<10} {:>5} MB  {}{}",
        model.name, model.size_mb, scope, installed
    )
}
