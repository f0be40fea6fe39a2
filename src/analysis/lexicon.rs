//! Word lists backing the analysis heuristics.

/// English stopwords, sorted for binary search.
///
/// Covers articles, conjunctions, prepositions, auxiliaries, and the pronoun
/// forms that would otherwise dominate frequency counts.
const STOPWORDS: &[&str] = &[
    "a", "about", "after", "again", "all", "also", "am", "an", "and", "any", "are", "as", "at",
    "be", "because", "been", "before", "being", "but", "by", "can", "could", "did", "do", "does",
    "doing", "down", "during", "each", "few", "for", "from", "further", "had", "has", "have",
    "having", "he", "her", "here", "hers", "him", "his", "how", "i", "if", "in", "into", "is",
    "it", "its", "just", "like", "me", "more", "most", "my", "no", "not", "now", "of", "off",
    "on", "once", "only", "or", "other", "our", "ours", "out", "over", "own", "really", "she",
    "should", "so", "some", "such", "than", "that", "the", "their", "theirs", "them", "then",
    "there", "these", "they", "this", "those", "through", "to", "too", "under", "until", "up",
    "very", "was", "we", "were", "what", "when", "where", "which", "while", "who", "whom", "why",
    "will", "with", "would", "yeah", "yes", "you", "your", "yours",
];

/// Pronoun forms that indicate a distinct speaking voice.
///
/// First, second, and third person singular/plural subject forms; sorted.
const SPEAKER_PRONOUNS: &[&str] = &["he", "i", "she", "they", "you"];

/// Check whether a lowercased word is a stopword.
pub fn is_stopword(word: &str) -> bool {
    STOPWORDS.binary_search(&word).is_ok()
}

/// Check whether a lowercased word is a speaker-indicating pronoun.
pub fn is_speaker_pronoun(word: &str) -> bool {
    SPEAKER_PRONOUNS.binary_search(&word).is_ok()
}

/// Strip leading and trailing punctuation from a raw whitespace token.
pub fn clean_token(raw: &str) -> &str {
    raw.trim_matches(|c: char| !c.is_alphanumeric())
}

/// Whether a cleaned token carries content: alphabetic, at least three
/// characters, and not a stopword.
pub fn is_content_word(word: &str) -> bool {
    word.chars().count() >= 3
        && word.chars().all(|c| c.is_alphabetic() || c == '\'')
        && !is_stopword(&word.to_lowercase())
}
