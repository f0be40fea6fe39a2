//! Speaker-count estimation.
//!
//! A lexical approximation, not diarization: the estimate counts distinct
//! voice indicators in the transcript text: detected person names and
//! first/second/third-person pronoun forms. Treat the number as a floor on
//! how many voices are plausibly present, nothing more.

use crate::analysis::lexicon::{clean_token, is_speaker_pronoun};
use crate::analysis::sentence::{entity_spans, split_sentences};
use std::collections::BTreeSet;

/// Estimate how many distinct speakers a transcript contains.
///
/// Returns `None` for an empty transcript (nothing to estimate), otherwise
/// at least 1. Indicators: multi-token entity spans (likely person names,
/// case-folded) and distinct speaker pronouns.
pub fn estimate_speaker_count(transcript: &str) -> Option<u32> {
    if transcript.trim().is_empty() {
        return None;
    }

    let mut indicators: BTreeSet<String> = BTreeSet::new();

    for sentence in split_sentences(transcript) {
        for span in entity_spans(sentence) {
            // Single-token spans are usually products or places, not people
            if span.split_whitespace().count() >= 2 {
                let _ = indicators.insert(span.to_lowercase());
            }
        }
        for raw in sentence.split_whitespace() {
            let word = clean_token(raw).to_lowercase();
            if is_speaker_pronoun(&word) {
                let _ = indicators.insert(word);
            }
        }
    }

    Some((indicators.len() as u32).max(1))
}
