//! Per-call session state and the lazy suggestion enumerator.
//!
//! A [`ParseSession`] is created fresh for every parse call, owns the
//! tokenized input plus the per-position candidate lists, and is discarded
//! when the call returns. Nothing here is shared between calls.

use crate::lexicon::FoundWord;

/// Candidate found words produced for one token position by a single
/// provider hit. Insertion order across a position's matching results
/// reflects provider priority: the first-registered dictionary's hits
/// rank first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchingResult {
    results: Vec<FoundWord>,
}

impl MatchingResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_result(&mut self, found_word: FoundWord) {
        self.results.push(found_word);
    }

    pub fn results(&self) -> &[FoundWord] {
        &self.results
    }
}

/// Per-call parse state: the tokenized input, the matching results
/// collected so far for each token position, and a cursor advanced
/// token-by-token during candidate collection.
#[derive(Debug, Default)]
pub struct ParseSession {
    tokens: Vec<String>,
    positions: Vec<Vec<MatchingResult>>,
    cursor: usize,
}

impl ParseSession {
    pub fn new(tokens: Vec<String>) -> Self {
        let positions = vec![Vec::new(); tokens.len()];
        ParseSession {
            tokens,
            positions,
            cursor: 0,
        }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// The token under the cursor, or `None` once collection is done.
    pub fn current_token(&self) -> Option<&str> {
        self.tokens.get(self.cursor).map(String::as_str)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn advance(&mut self) {
        self.cursor += 1;
    }

    pub fn add_match(&mut self, position: usize, result: MatchingResult) {
        self.positions[position].push(result);
    }

    /// Number of matching results collected at `position` so far.
    pub fn match_count(&self, position: usize) -> usize {
        self.positions
            .get(position)
            .map(Vec::len)
            .unwrap_or(0)
    }

    /// Lazily enumerate every suggestion: one matching result picked per
    /// position, flattened into a found-word sequence.
    pub fn suggestions(&self) -> Suggestions<'_> {
        Suggestions::new(&self.positions)
    }
}

// ──────────────────────────────────────────────
// Suggestions
// ──────────────────────────────────────────────

/// One concrete pick across the per-position candidate lists: exactly one
/// found word per token position (providers contribute their hits as
/// single-entry matching results).
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    found_words: Vec<FoundWord>,
}

impl Suggestion {
    pub fn found_words(&self) -> &[FoundWord] {
        &self.found_words
    }

    pub fn into_found_words(self) -> Vec<FoundWord> {
        self.found_words
    }
}

/// Lazy cartesian-product enumerator over the per-position candidate
/// lists.
///
/// Iteration is row-major with position 0 varying slowest and the last
/// position fastest, so the first suggestion is every position's
/// first-registered hit. The full product is never materialized: the
/// iterator keeps one counter per position and produces suggestions one
/// at a time, single pass.
pub struct Suggestions<'a> {
    positions: &'a [Vec<MatchingResult>],
    counters: Vec<usize>,
    exhausted: bool,
}

impl<'a> Suggestions<'a> {
    fn new(positions: &'a [Vec<MatchingResult>]) -> Self {
        // An empty session, or any position with no candidates, has no
        // suggestions at all.
        let exhausted = positions.is_empty() || positions.iter().any(Vec::is_empty);
        Suggestions {
            positions,
            counters: vec![0; positions.len()],
            exhausted,
        }
    }
}

impl Iterator for Suggestions<'_> {
    type Item = Suggestion;

    fn next(&mut self) -> Option<Suggestion> {
        if self.exhausted {
            return None;
        }

        let mut found_words = Vec::with_capacity(self.positions.len());
        for (position, &pick) in self.positions.iter().zip(&self.counters) {
            found_words.extend_from_slice(position[pick].results());
        }

        // Advance the counter vector, last position fastest.
        let mut i = self.counters.len();
        loop {
            if i == 0 {
                self.exhausted = true;
                break;
            }
            i -= 1;
            self.counters[i] += 1;
            if self.counters[i] < self.positions[i].len() {
                break;
            }
            self.counters[i] = 0;
        }

        Some(Suggestion { found_words })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::Word;

    fn candidate(value: &str) -> MatchingResult {
        let mut result = MatchingResult::new();
        result.add_result(FoundWord::word(Word::new(value), 1.0, false));
        result
    }

    fn values(suggestion: &Suggestion) -> Vec<String> {
        suggestion
            .found_words()
            .iter()
            .map(|fw| match fw {
                FoundWord::Match { word, .. } => word.value().to_owned(),
                other => panic!("unexpected found word {:?}", other),
            })
            .collect()
    }

    #[test]
    fn empty_session_has_no_suggestions() {
        let session = ParseSession::new(Vec::new());
        assert_eq!(session.suggestions().count(), 0);
    }

    #[test]
    fn suggestion_count_is_the_product_of_candidate_counts() {
        let mut session = ParseSession::new(vec!["a".into(), "b".into(), "c".into()]);
        session.add_match(0, candidate("a1"));
        session.add_match(0, candidate("a2"));
        session.add_match(1, candidate("b1"));
        session.add_match(1, candidate("b2"));
        session.add_match(1, candidate("b3"));
        session.add_match(2, candidate("c1"));
        assert_eq!(session.suggestions().count(), 2 * 3);
    }

    #[test]
    fn last_position_varies_fastest() {
        let mut session = ParseSession::new(vec!["a".into(), "b".into()]);
        session.add_match(0, candidate("a1"));
        session.add_match(0, candidate("a2"));
        session.add_match(1, candidate("b1"));
        session.add_match(1, candidate("b2"));

        let all: Vec<Vec<String>> = session.suggestions().map(|s| values(&s)).collect();
        assert_eq!(
            all,
            vec![
                vec!["a1".to_owned(), "b1".to_owned()],
                vec!["a1".to_owned(), "b2".to_owned()],
                vec!["a2".to_owned(), "b1".to_owned()],
                vec!["a2".to_owned(), "b2".to_owned()],
            ]
        );
    }

    #[test]
    fn one_found_word_per_position() {
        let mut session = ParseSession::new(vec!["a".into(), "b".into()]);
        session.add_match(0, candidate("a1"));
        session.add_match(1, candidate("b1"));
        let suggestion = session.suggestions().next().unwrap();
        assert_eq!(suggestion.found_words().len(), session.tokens().len());
    }

    #[test]
    fn cursor_walks_the_tokens() {
        let mut session = ParseSession::new(vec!["a".into(), "b".into()]);
        assert_eq!(session.current_token(), Some("a"));
        session.advance();
        assert_eq!(session.cursor(), 1);
        assert_eq!(session.current_token(), Some("b"));
        session.advance();
        assert_eq!(session.current_token(), None);
    }
}
