//! Key-point extraction.
//!
//! Two strategies: parse the labeled "Key Points" section out of a structured
//! summary, or rank transcript sentences by lexical score.

use crate::analysis::sentence::rank_sentences;
use regex::Regex;
use std::sync::LazyLock;

/// Entity weight used when scoring transcript sentences for key points.
const KEY_POINT_ENTITY_WEIGHT: u32 = 2;

/// Matches a structured-summary section heading line: an optionally numbered
/// bold title, e.g. `1. **Key Points**:` or `**Follow-Up Topics**`.
static SECTION_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    // SAFETY: hardcoded pattern — always valid
    #[allow(clippy::expect_used)]
    let re = Regex::new(r"^\s*(?:\d+\.\s*)?\*\*([^*]+)\*\*:?").expect("hardcoded heading regex");
    re
});

/// Strips list markers from a section line: "- ", "* ", "• ", "1. ", "2) ".
static LIST_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    // SAFETY: hardcoded pattern — always valid
    #[allow(clippy::expect_used)]
    let re = Regex::new(r"^\s*(?:[-*•]|\d+[.)])\s+").expect("hardcoded list-marker regex");
    re
});

/// Parse the items listed under a structured summary's "Key Points" section.
///
/// Scans line by line: the section opens at a heading titled "Key Points"
/// (case-insensitive) and closes at the next heading. Items are returned in
/// source order with list markers stripped. Returns an empty vector when the
/// section is absent or empty, never an error.
pub fn structured_key_points(summary: &str) -> Vec<String> {
    let mut in_section = false;
    let mut items = Vec::new();

    for line in summary.lines() {
        if let Some(captures) = SECTION_HEADING.captures(line) {
            let title = captures.get(1).map_or("", |m| m.as_str()).trim();
            in_section = title.eq_ignore_ascii_case("key points");
            continue;
        }
        if in_section {
            let item = LIST_MARKER.replace(line, "");
            let item = item.trim();
            if !item.is_empty() {
                items.push(item.to_string());
            }
        }
    }

    items
}

/// Select key points directly from the transcript by sentence score.
pub fn scored_key_points(transcript: &str, count: usize) -> Vec<String> {
    rank_sentences(transcript, count, KEY_POINT_ENTITY_WEIGHT)
}
