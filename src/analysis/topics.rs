//! Topic aggregation from transcript text.

use crate::analysis::lexicon::{clean_token, is_content_word};
use crate::analysis::sentence::{entity_spans, split_sentences};

/// Minimum length for a bare content word to count as a topic candidate.
/// Shorter words are too generic to name a topic on their own.
const MIN_TOPIC_WORD_LEN: usize = 4;

/// Extract the main topics discussed, most frequent first.
///
/// Topic candidates are entity spans (case-folded) and longer content words.
/// Candidates are ranked by occurrence count; ties keep first-appearance
/// order, so the result is deterministic.
pub fn extract_topics(text: &str, count: usize) -> Vec<String> {
    let mut candidates: Vec<(String, u32)> = Vec::new();

    let mut bump = |candidate: String| {
        match candidates.iter_mut().find(|(name, _)| *name == candidate) {
            Some((_, n)) => *n += 1,
            None => candidates.push((candidate, 1)),
        }
    };

    for sentence in split_sentences(text) {
        for span in entity_spans(sentence) {
            bump(span.to_lowercase());
        }
        for raw in sentence.split_whitespace() {
            let word = clean_token(raw);
            // Capitalized tokens belong to entity spans (or sentence starts);
            // counting them again here would double-weight entities.
            let lowercase_in_source = word.chars().next().is_some_and(|c| c.is_lowercase());
            if lowercase_in_source
                && word.chars().count() >= MIN_TOPIC_WORD_LEN
                && is_content_word(word)
            {
                bump(word.to_lowercase());
            }
        }
    }

    candidates.sort_by(|a, b| b.1.cmp(&a.1));
    candidates
        .into_iter()
        .take(count)
        .map(|(name, _)| name)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_entities_rank_first() {
        let text = "We discussed the Acme Dashboard at length. \
                    The Acme Dashboard handles reporting. \
                    Then we talked about lunch.";
        let topics = extract_topics(text, 5);
        assert_eq!(topics[0], "acme dashboard");
    }

    #[test]
    fn topics_are_case_folded() {
        let text = "They ship Kubernetes clusters. We also run Kubernetes at home.";
        let topics = extract_topics(text, 5);
        assert!(topics.contains(&"kubernetes".to_string()));
        assert!(!topics.iter().any(|t| t.contains('K')));
    }

    #[test]
    fn frequent_content_words_become_topics() {
        let text = "The migration took months. The migration needed planning. \
                    A migration is never simple.";
        let topics = extract_topics(text, 3);
        assert_eq!(topics[0], "migration");
    }

    #[test]
    fn short_and_stop_words_are_excluded() {
        let text = "It was the day we ran and ran and ran.";
        let topics = extract_topics(text, 5);
        assert!(!topics.contains(&"the".to_string()));
        assert!(!topics.contains(&"ran".to_string()), "below length floor");
    }

    #[test]
    fn ties_keep_first_appearance_order() {
        let text = "They praised databases. They praised compilers.";
        let topics = extract_topics(text, 5);
        let db = topics.iter().position(|t| t == "databases");
        let cc = topics.iter().position(|t| t == "compilers");
        assert!(db < cc, "first-seen candidate should rank first on a tie");
    }

    #[test]
    fn count_limits_result_length() {
        let text = "alpha beta gamma delta epsilon zeta words everywhere \
                    talking about testing deployments migrations databases";
        let topics = extract_topics(text, 3);
        assert_eq!(topics.len(), 3);
    }

    #[test]
    fn empty_text_yields_no_topics() {
        assert!(extract_topics("", 5).is_empty());
        assert!(extract_topics("   ", 5).is_empty());
    }

    #[test]
    fn deterministic_across_runs() {
        let text = "Sarah Chen demoed the Acme Dashboard. The dashboard impressed everyone. \
                    Deployment questions followed.";
        let first = extract_topics(text, 5);
        for _ in 0..10 {
            assert_eq!(extract_topics(text, 5), first);
        }
    }
}
