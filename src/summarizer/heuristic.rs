//! Model-free extractive summarization.
//!
//! Two tiers live here: the heuristic summarizer used when no model is
//! loaded (positional sampling of first, middle, and last sentences), and
//! the minimal fallback used after a failed generation attempt (first three
//! sentences, no positional sampling).

/// Fixed notice returned when a transcript yields no sentence-like units.
pub const NO_MEANINGFUL_CONTENT: &str =
    "Unable to extract meaningful content for summarization.";

/// Maximum number of sentences in an extractive summary.
const MAX_SENTENCES: usize = 3;

/// Split text into trimmed, non-empty sentence-like units.
///
/// Units are delimited by sentence-terminal punctuation (`.`, `!`, `?`).
pub fn split_sentences(text: &str) -> Vec<&str> {
    text.split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Heuristic summary: first, middle, and last sentences.
///
/// The middle sentence (`sentences[len / 2]`) is included only when at least
/// three sentences exist, the last only when at least two exist. Duplicates
/// are removed while preserving selection order. Returns `None` when the
/// text contains no sentence-like units.
pub fn heuristic_summary(text: &str) -> Option<String> {
    let sentences = split_sentences(text);

    if sentences.is_empty() {
        return None;
    }

    let mut selected: Vec<&str> = vec![sentences[0]];

    if sentences.len() >= 3 {
        selected.push(sentences[sentences.len() / 2]);
    }
    if sentences.len() >= 2 {
        selected.push(sentences[sentences.len() - 1]);
    }

    Some(join_sentences(dedupe(selected)))
}

/// Minimal fallback summary: the first three sentences in order.
///
/// Used only after the generative tier was attempted and failed. Returns
/// `None` when the text contains no sentence-like units.
pub fn fallback_summary(text: &str) -> Option<String> {
    let sentences = split_sentences(text);

    if sentences.is_empty() {
        return None;
    }

    let selected: Vec<&str> = sentences.into_iter().take(MAX_SENTENCES).collect();
    Some(join_sentences(selected))
}

/// Remove duplicates while preserving order, capped at the sentence limit.
fn dedupe(sentences: Vec<&str>) -> Vec<&str> {
    let mut unique: Vec<&str> = Vec::with_capacity(MAX_SENTENCES);
    for s in sentences {
        if !unique.contains(&s) {
            unique.push(s);
        }
        if unique.len() == MAX_SENTENCES {
            break;
        }
    }
    unique
}

/// Join with ". " and guarantee terminal punctuation.
fn join_sentences(sentences: Vec<&str>) -> String {
    let mut summary = sentences.join(". ");
    if !summary.is_empty() && !summary.ends_with('.') {
        summary.push('.');
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_discards_empty_units() {
        assert_eq!(
            split_sentences("One. Two!  ... Three?"),
            vec!["One", "Two", "Three"]
        );
        assert!(split_sentences("").is_empty());
        assert!(split_sentences("!!! ... ???").is_empty());
    }

    #[test]
    fn test_heuristic_single_sentence() {
        // One sentence: no duplication from middle/last selection.
        assert_eq!(
            heuristic_summary("Only one sentence here."),
            Some("Only one sentence here.".to_string())
        );
    }

    #[test]
    fn test_heuristic_two_sentences() {
        assert_eq!(
            heuristic_summary("First. Second."),
            Some("First. Second.".to_string())
        );
    }

    #[test]
    fn test_heuristic_three_sentences() {
        // Three sentences: middle index is 1, so all three are selected.
        assert_eq!(
            heuristic_summary("Cats are mammals. They sleep a lot. They are popular pets."),
            Some("Cats are mammals. They sleep a lot. They are popular pets.".to_string())
        );
    }

    #[test]
    fn test_heuristic_five_sentences_selects_first_middle_last() {
        assert_eq!(
            heuristic_summary("s0. s1. s2. s3. s4."),
            Some("s0. s2. s4.".to_string())
        );
    }

    #[test]
    fn test_heuristic_dedupes_repeated_sentences() {
        assert_eq!(
            heuristic_summary("Same. Same. Same."),
            Some("Same.".to_string())
        );
    }

    #[test]
    fn test_heuristic_empty_input() {
        assert_eq!(heuristic_summary(""), None);
        assert_eq!(heuristic_summary("?!?!"), None);
    }

    #[test]
    fn test_heuristic_ends_with_period() {
        let summary = heuristic_summary("Does it work? It does! Great news.").unwrap();
        assert!(summary.ends_with('.'));
        assert!(summary.split(". ").count() <= 3);
    }

    #[test]
    fn test_fallback_takes_first_three() {
        assert_eq!(
            fallback_summary("s0. s1. s2. s3. s4."),
            Some("s0. s1. s2.".to_string())
        );
    }

    #[test]
    fn test_fallback_differs_from_heuristic_on_long_input() {
        let text = "s0. s1. s2. s3. s4.";
        assert_ne!(fallback_summary(text), heuristic_summary(text));
    }

    #[test]
    fn test_fallback_empty_input() {
        assert_eq!(fallback_summary("..."), None);
    }

    #[test]
    fn test_segments_are_substrings_of_input() {
        let text = "Alpha beta. Gamma delta! Epsilon zeta? Eta theta.";
        let summary = heuristic_summary(text).unwrap();
        for segment in summary.trim_end_matches('.').split(". ") {
            assert!(text.contains(segment), "segment '{}' not in input", segment);
        }
    }
}
