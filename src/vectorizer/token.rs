use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::vectorizer::stopwords::STOP_WORDS;

/// Tokens shorter than this are dropped. Single characters carry no
/// discriminative signal in this corpus.
const MIN_TOKEN_LEN: usize = 2;

/// Split `text` into vocabulary terms.
///
/// Lowercases, splits on non-alphanumeric boundaries, and drops tokens that
/// are too short or on the stop-word list. Deterministic for a given input.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|tok| !tok.is_empty())
        .map(|tok| tok.to_lowercase())
        .filter(|tok| tok.chars().count() >= MIN_TOKEN_LEN)
        .filter(|tok| STOP_WORDS.binary_search(&tok.as_str()).is_err())
        .collect()
}

/// Term occurrence counts for a single document.
///
/// Counts how often each vocabulary term occurs and the total number of
/// terms, the base data for TF (term frequency) calculation. Iteration
/// order is first-seen order.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct TermFrequency {
    term_count: IndexMap<String, u32>,
    total_term_count: u64,
}

impl TermFrequency {
    pub fn new() -> Self {
        TermFrequency {
            term_count: IndexMap::new(),
            total_term_count: 0,
        }
    }

    /// Tokenize `text` and count every surviving term.
    pub fn from_text(text: &str) -> Self {
        let mut freq = TermFrequency::new();
        for term in tokenize(text) {
            freq.add_term(&term);
        }
        freq
    }

    #[inline]
    pub fn add_term(&mut self, term: &str) -> &mut Self {
        let count = self.term_count.entry(term.to_string()).or_insert(0);
        *count += 1;
        self.total_term_count += 1;
        self
    }

    #[inline]
    pub fn add_terms<T>(&mut self, terms: &[T]) -> &mut Self
    where
        T: AsRef<str>,
    {
        for term in terms {
            self.add_term(term.as_ref());
        }
        self
    }

    /// Occurrence count of `term`, 0 if absent.
    pub fn term_count(&self, term: &str) -> u32 {
        self.term_count.get(term).copied().unwrap_or(0)
    }

    /// Total number of counted terms (with repetition).
    pub fn term_sum(&self) -> u64 {
        self.total_term_count
    }

    /// Number of unique terms.
    pub fn unique_term_count(&self) -> usize {
        self.term_count.len()
    }

    pub fn is_empty(&self) -> bool {
        self.term_count.is_empty()
    }

    /// Iterate `(term, count)` in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.term_count.iter().map(|(term, count)| (term.as_str(), *count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_lowercases_and_splits_on_non_alphanumeric() {
        let tokens = tokenize("Dream-sharing technology!");
        assert_eq!(tokens, vec!["dream", "sharing", "technology"]);
    }

    #[test]
    fn tokenize_drops_stop_words_and_short_tokens() {
        // "a" and "through" are stop words, "x" is below the length floor
        let tokens = tokenize("A thief steals secrets through x");
        assert_eq!(tokens, vec!["thief", "steals", "secrets"]);
    }

    #[test]
    fn tokenize_splits_pipe_delimited_tags() {
        let tokens = tokenize("Action|Sci-Fi");
        assert_eq!(tokens, vec!["action", "sci", "fi"]);
    }

    #[test]
    fn tokenize_empty_input_yields_no_terms() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("  |  !").is_empty());
    }

    #[test]
    fn term_frequency_counts_repetitions() {
        let mut freq = TermFrequency::new();
        freq.add_terms(&["wormhole", "space", "wormhole"]);
        assert_eq!(freq.term_count("wormhole"), 2);
        assert_eq!(freq.term_count("space"), 1);
        assert_eq!(freq.term_count("gotham"), 0);
        assert_eq!(freq.term_sum(), 3);
        assert_eq!(freq.unique_term_count(), 2);
    }

    #[test]
    fn term_frequency_iterates_in_first_seen_order() {
        let freq = TermFrequency::from_text("hacker discovers reality hacker");
        let terms: Vec<&str> = freq.iter().map(|(t, _)| t).collect();
        assert_eq!(terms, vec!["hacker", "discovers", "reality"]);
    }
}
