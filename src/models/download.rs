//! Model download and installation management.
//!
//! Handles downloading Whisper models from HuggingFace, verifying their
//! integrity, and storing them in the user's cache directory.

use crate::error::{RecapError, Result};
use crate::models::catalog::{get_model, model_path};
use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// Download a Whisper model from the catalog.
///
/// # Errors
///
/// Returns an error if:
/// - The model is not found in the catalog
/// - The download fails
/// - The SHA-256 checksum doesn't match (when the catalog provides one)
/// - The file cannot be written
pub async fn download_model(name: &str, progress: bool) -> Result<PathBuf> {
    let path = model_path(name);

    if path.exists() {
        if progress {
            eprintln!("Model '{}' is already installed at {}", name, path.display());
        }
        return Ok(path);
    }

    let model = get_model(name).ok_or_else(|| {
        RecapError::Other(format!(
            "Unknown model: '{name}'. Run `recap models list` to see available models."
        ))
    })?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| RecapError::Other(format!("Failed to create models directory: {e}")))?;
    }

    if progress {
        eprintln!("Downloading {} ({} MB)...", model.name, model.size_mb);
    }

    let client = reqwest::Client::new();
    let response = client
        .get(model.url)
        .send()
        .await
        .map_err(|e| RecapError::Other(format!("Failed to start download: {e}")))?;

    if !response.status().is_success() {
        return Err(RecapError::Other(format!(
            "Download failed with status: {}",
            response.status()
        )));
    }

    let total_size = response.content_length().unwrap_or(0);

    let pb = if progress {
        let pb = ProgressBar::new(total_size);
        pb.set_style(
            // SAFETY: hardcoded template string — always valid
            #[allow(clippy::expect_used)]
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
                .expect("hardcoded progress bar template")
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    // Download with streaming and hash calculation
    let mut hasher = Sha256::new();
    let mut stream = response.bytes_stream();
    let mut file = fs::File::create(&path)
        .map_err(|e| RecapError::Other(format!("Failed to create output file: {e}")))?;

    while let Some(chunk) = stream.next().await {
        let chunk =
            chunk.map_err(|e| RecapError::Other(format!("Failed to read download chunk: {e}")))?;

        file.write_all(&chunk)
            .map_err(|e| RecapError::Other(format!("Failed to write to file: {e}")))?;

        hasher.update(&chunk);

        if let Some(ref pb) = pb {
            pb.inc(chunk.len() as u64);
        }
    }

    if let Some(pb) = pb {
        pb.finish_with_message("Downloaded");
    }

    // Verify SHA-256 checksum when the catalog carries one
    if !model.sha256.is_empty() {
        let calculated = format!("{:x}", hasher.finalize());
        if calculated != model.sha256 {
            if let Err(e) = fs::remove_file(&path) {
                eprintln!("recap: failed to remove corrupted download: {e}");
            }
            return Err(RecapError::Other(format!(
                "SHA-256 checksum mismatch. Expected: {}, got: {calculated}",
                model.sha256
            )));
        }
        if progress {
            eprintln!("Checksum verified");
        }
    }

    if progress {
        eprintln!("Model installed to: {}", path.display());
    }

    Ok(path)
}

/// Resolve the path to an installed model, downloading it if missing.
pub async fn ensure_model(name: &str, progress: bool) -> Result<PathBuf> {
    let path = model_path(name);
    if path.exists() {
        return Ok(path);
    }
    download_model(name, progress).await
}
