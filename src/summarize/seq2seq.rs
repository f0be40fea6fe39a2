//! Local abstractive summarization with quantized Flan-T5 via candle.
//!
//! Downloads model artifacts from HuggingFace on first use, then runs greedy
//! T5 decoding with fixed length bounds. Decoding is deterministic: argmax
//! at every step, end-of-sequence suppressed until the minimum length.
//!
//! # Feature Gate
//!
//! This module requires the `seq2seq` feature:
//!
//! ```bash
//! cargo build --features seq2seq
//! ```

use crate::config::Seq2SeqBackendConfig;
use crate::error::{RecapError, Result};
use crate::summarize::summarizer::Summarizer;
use async_trait::async_trait;

#[cfg(feature = "seq2seq")]
use crate::models::seq2seq_catalog::{TOKENIZER_FILENAME, get_seq2seq_model};
#[cfg(feature = "seq2seq")]
use candle_core::{Device, Tensor};
#[cfg(feature = "seq2seq")]
use candle_transformers::models::quantized_t5::{Config as T5Config, T5ForConditionalGeneration};
#[cfg(feature = "seq2seq")]
use candle_transformers::quantized_var_builder::VarBuilder;
#[cfg(feature = "seq2seq")]
use hf_hub::api::sync::Api;
#[cfg(feature = "seq2seq")]
use std::sync::Mutex;
#[cfg(feature = "seq2seq")]
use tokenizers::Tokenizer;

/// T5 task prefix that selects the summarization behavior.
#[cfg(feature = "seq2seq")]
const TASK_PREFIX: &str = "summarize: ";

/// T5 decoder start token (pad).
#[cfg(feature = "seq2seq")]
const PAD_TOKEN: u32 = 0;

/// T5 end-of-sequence token.
#[cfg(feature = "seq2seq")]
const EOS_TOKEN: u32 = 1;

/// Flan-T5 summarizer that runs quantized inference via candle.
///
/// The model state is wrapped in a Mutex: concurrent requests serialize on
/// the shared weights, matching the read-only-model contract upstream.
#[cfg(feature = "seq2seq")]
pub struct Seq2SeqSummarizer {
    state: Mutex<ModelState>,
    config: Seq2SeqBackendConfig,
}

#[cfg(feature = "seq2seq")]
struct ModelState {
    model: T5ForConditionalGeneration,
    tokenizer: Tokenizer,
    device: Device,
}

/// Seq2seq summarizer placeholder (without seq2seq feature).
///
/// Loading always fails with a build hint; enable the `seq2seq` feature
/// for real local summarization.
#[cfg(not(feature = "seq2seq"))]
#[derive(Debug)]
pub struct Seq2SeqSummarizer {
    config: Seq2SeqBackendConfig,
}

#[cfg(feature = "seq2seq")]
impl Seq2SeqSummarizer {
    /// Load a quantized Flan-T5 model from the HuggingFace cache.
    ///
    /// Downloads model, config, and tokenizer on first call.
    pub fn load(config: &Seq2SeqBackendConfig) -> Result<Self> {
        let info = get_seq2seq_model(&config.model).ok_or_else(|| {
            RecapError::ConfigInvalidValue {
                key: "summarization.seq2seq.model".to_string(),
                message: format!("unknown model '{}'", config.model),
            }
        })?;

        let device = Device::Cpu;
        let api = Api::new().map_err(|e| RecapError::Other(format!("HF Hub API init: {e}")))?;
        let repo = api.model(info.hf_repo.to_string());

        // Download / resolve paths
        let model_path = repo
            .get(info.hf_filename)
            .map_err(|e| RecapError::Other(format!("Download model {}: {e}", info.hf_filename)))?;

        let config_path = repo.get(info.config_filename).map_err(|e| {
            RecapError::Other(format!("Download config {}: {e}", info.config_filename))
        })?;

        let tokenizer_path = repo
            .get(TOKENIZER_FILENAME)
            .map_err(|e| RecapError::Other(format!("Download tokenizer: {e}")))?;

        // Load config
        let config_bytes = std::fs::read(&config_path).map_err(|e| {
            RecapError::Other(format!("Read config {}: {e}", config_path.display()))
        })?;
        let t5_config: T5Config = serde_json::from_slice(&config_bytes)
            .map_err(|e| RecapError::Other(format!("Parse T5 config: {e}")))?;

        // Load quantized model
        let vb = VarBuilder::from_gguf(&model_path, &device).map_err(|e| {
            RecapError::Other(format!("Load GGUF model {}: {e}", model_path.display()))
        })?;
        let model = T5ForConditionalGeneration::load(vb, &t5_config)
            .map_err(|e| RecapError::Other(format!("Init T5 model: {e}")))?;

        // Load tokenizer
        let tokenizer = Tokenizer::from_file(&tokenizer_path).map_err(|e| {
            RecapError::Other(format!("Load tokenizer {}: {e}", tokenizer_path.display()))
        })?;

        Ok(Self {
            state: Mutex::new(ModelState {
                model,
                tokenizer,
                device,
            }),
            config: config.clone(),
        })
    }
}

/// Encode the prompt and run greedy decoding with length bounds.
#[cfg(feature = "seq2seq")]
fn generate(
    state: &mut ModelState,
    prompt: &str,
    min_new_tokens: usize,
    max_new_tokens: usize,
) -> Result<String> {
    let failed = |message: String| RecapError::SummarizationFailed { message };

    let encoding = state
        .tokenizer
        .encode(prompt, true)
        .map_err(|e| failed(format!("Tokenize: {e}")))?;

    let input_ids: Vec<u32> = encoding.get_ids().to_vec();
    let input_tensor = Tensor::new(input_ids.as_slice(), &state.device)
        .map_err(|e| failed(format!("Create input tensor: {e}")))?
        .unsqueeze(0)
        .map_err(|e| failed(format!("Unsqueeze input: {e}")))?;

    // Encode
    let encoder_output = state
        .model
        .encode(&input_tensor)
        .map_err(|e| failed(format!("Encoder forward: {e}")))?;

    // Greedy decode with incremental KV cache.
    // First step: feed pad token. Subsequent steps: feed only the new token.
    let mut decoded_ids: Vec<u32> = vec![PAD_TOKEN];
    let mut next_input = vec![PAD_TOKEN];

    for step in 0..max_new_tokens {
        let decoder_input = Tensor::new(next_input.as_slice(), &state.device)
            .map_err(|e| failed(format!("Create decoder input: {e}")))?
            .unsqueeze(0)
            .map_err(|e| failed(format!("Unsqueeze decoder: {e}")))?;

        let logits = state
            .model
            .decode(&decoder_input, &encoder_output)
            .map_err(|e| failed(format!("Decoder forward: {e}")))?;

        // Take last-position logits and pick the argmax, suppressing EOS
        // until the minimum length is reached.
        let seq_len = logits
            .dim(1)
            .map_err(|e| failed(format!("Get logits dim: {e}")))?;
        let next_logits: Vec<f32> = logits
            .get_on_dim(1, seq_len - 1)
            .map_err(|e| failed(format!("Slice logits: {e}")))?
            .squeeze(0)
            .map_err(|e| failed(format!("Squeeze logits: {e}")))?
            .to_vec1()
            .map_err(|e| failed(format!("Read logits: {e}")))?;

        let allow_eos = step >= min_new_tokens;
        let mut best_token = PAD_TOKEN;
        let mut best_score = f32::NEG_INFINITY;
        for (token, &score) in next_logits.iter().enumerate() {
            if !allow_eos && token as u32 == EOS_TOKEN {
                continue;
            }
            if score > best_score {
                best_score = score;
                best_token = token as u32;
            }
        }

        if best_token == EOS_TOKEN {
            break;
        }

        decoded_ids.push(best_token);
        next_input = vec![best_token]; // incremental: only the new token
    }

    // Skip the leading pad token for decoding
    let output = state
        .tokenizer
        .decode(&decoded_ids[1..], true)
        .map_err(|e| failed(format!("Detokenize: {e}")))?;

    Ok(output.trim().to_string())
}

#[cfg(feature = "seq2seq")]
#[async_trait]
impl Summarizer for Seq2SeqSummarizer {
    async fn summarize(&self, transcript: &str) -> Result<String> {
        let prompt = format!("{TASK_PREFIX}{transcript}");
        let min_new = self.config.min_new_tokens;
        let max_new = self.config.max_new_tokens;

        // Inference is CPU-bound; block_in_place keeps the async worker pool
        // responsive. Requires the multi-thread tokio runtime.
        tokio::task::block_in_place(|| {
            let mut state = self.state.lock().map_err(|e| {
                RecapError::SummarizationFailed {
                    message: format!("Failed to acquire model lock: {e}"),
                }
            })?;
            state.model.clear_kv_cache();
            generate(&mut state, &prompt, min_new, max_new)
        })
    }

    fn name(&self) -> &str {
        &self.config.model
    }

    fn max_input_chars(&self) -> usize {
        self.config.max_input_chars
    }
}

#[cfg(not(feature = "seq2seq"))]
impl Seq2SeqSummarizer {
    /// Load stub; always fails with a build hint.
    pub fn load(_config: &Seq2SeqBackendConfig) -> Result<Self> {
        Err(RecapError::SummarizationFailed {
            message: concat!(
                "Seq2seq feature not enabled. This binary was built without local summarization.\n",
                "To fix: cargo build --release --features seq2seq\n",
                "Or select the `chat` or `extractive` backend in the configuration."
            )
            .to_string(),
        })
    }
}

#[cfg(not(feature = "seq2seq"))]
#[async_trait]
impl Summarizer for Seq2SeqSummarizer {
    async fn summarize(&self, _transcript: &str) -> Result<String> {
        Err(RecapError::SummarizationFailed {
            message: "seq2seq feature not enabled".to_string(),
        })
    }

    fn name(&self) -> &str {
        &self.config.model
    }

    fn max_input_chars(&self) -> usize {
        self.config.max_input_chars
    }
}
