//! Sentence splitting and lexical relevance scoring.

use crate::analysis::lexicon::{clean_token, is_content_word, is_stopword};

/// Split text into sentences on terminal punctuation followed by whitespace.
///
/// Returned slices are trimmed and non-empty. Abbreviation periods followed
/// by a space ("Dr. Smith") split too; acceptable for scoring purposes.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if matches!(c, '.' | '!' | '?') {
            let end = i + c.len_utf8();
            let at_boundary = chars.peek().is_none_or(|&(_, next)| next.is_whitespace());
            if at_boundary {
                let sentence = text[start..end].trim();
                if !sentence.is_empty() {
                    sentences.push(sentence);
                }
                start = end;
            }
        }
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail);
    }

    sentences
}

/// Detect likely named-entity spans in a sentence.
///
/// A span is a run of consecutive capitalized tokens. Multi-token runs always
/// qualify (names, organizations, products); a single capitalized token
/// qualifies only when it is not sentence-initial and not a capitalized
/// stopword. The pronoun "I" never counts.
pub fn entity_spans(sentence: &str) -> Vec<String> {
    let mut spans = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_start = 0usize;

    for (idx, raw) in sentence.split_whitespace().enumerate() {
        let word = clean_token(raw);
        if is_capitalized(word) && word != "I" {
            if current.is_empty() {
                current_start = idx;
            }
            current.push(word);
        } else {
            flush_span(&mut current, current_start, &mut spans);
        }
    }
    flush_span(&mut current, current_start, &mut spans);

    spans
}

fn flush_span(current: &mut Vec<&str>, start: usize, spans: &mut Vec<String>) {
    if current.is_empty() {
        return;
    }

    // A sentence-initial capitalized stopword ("The", "A") is casing, not a name
    let mut effective_start = start;
    if start == 0 && current.len() >= 2 && is_stopword(&current[0].to_lowercase()) {
        let _ = current.remove(0);
        effective_start = 1;
    }

    let qualifies = current.len() >= 2
        || (effective_start > 0 && !is_stopword(&current[0].to_lowercase()));
    if qualifies {
        spans.push(current.join(" "));
    }
    current.clear();
}

/// Whether a cleaned token looks like a proper-noun candidate:
/// at least two characters with an uppercase first letter.
fn is_capitalized(word: &str) -> bool {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.is_uppercase() && chars.next().is_some(),
        None => false,
    }
}

/// Score a sentence by weighted entity presence plus content-word count.
///
/// Entity spans get `entity_weight` each; every content-bearing word adds one.
pub fn score_sentence(sentence: &str, entity_weight: u32) -> u32 {
    let entities = entity_spans(sentence).len() as u32;
    let content_words = sentence
        .split_whitespace()
        .map(clean_token)
        .filter(|w| is_content_word(w))
        .count() as u32;

    entity_weight * entities + content_words
}

/// Select the top `count` sentences by score, in rank order.
///
/// The sort is stable: equally scored sentences keep their original order.
/// Deterministic: identical input always produces identical output.
pub fn rank_sentences(text: &str, count: usize, entity_weight: u32) -> Vec<String> {
    let mut scored: Vec<(&str, u32)> = split_sentences(text)
        .into_iter()
        .map(|s| (s, score_sentence(s, entity_weight)))
        .collect();

    scored.sort_by(|a, b| b.1.cmp(&a.1));

    scored
        .into_iter()
        .take(count)
        .map(|(s, _)| s.to_string())
        .collect()
}
