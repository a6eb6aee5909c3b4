//! The parser façade.
//!
//! Orchestrates normalization, per-token candidate collection and the
//! phrase-matching engine. An [`InputParser`] is immutable after
//! construction (the persistent phrase index is built once) and safe to
//! share read-only across concurrently executing parse calls, provided its
//! providers are.

use crate::cancel::{check_cancelled, CancellationToken};
use crate::correction::Correction;
use crate::dictionary::Dictionary;
use crate::engine::PhraseEngine;
use crate::error::ParseError;
use crate::lexicon::FoundWord;
use crate::normalizer::Normalizer;
use crate::phrase_index::PhraseIndex;
use crate::session::{MatchingResult, ParseSession};
use crate::solution::RawSolution;

/// Semantic input parser over pluggable normalizers, dictionaries and
/// corrections.
///
/// Registration order is semantically significant everywhere: normalizers
/// run in order, dictionary hits rank in dictionary order, and corrections
/// fire in order once the dictionaries came up empty.
pub struct InputParser {
    normalizers: Vec<Box<dyn Normalizer>>,
    dictionaries: Vec<Box<dyn Dictionary>>,
    corrections: Vec<Box<dyn Correction>>,
    phrase_index: PhraseIndex,
}

impl InputParser {
    /// A parser over dictionaries alone.
    pub fn new(dictionaries: Vec<Box<dyn Dictionary>>) -> Self {
        Self::with_providers(Vec::new(), dictionaries, Vec::new())
    }

    /// A parser over dictionaries plus fallback corrections.
    pub fn with_corrections(
        dictionaries: Vec<Box<dyn Dictionary>>,
        corrections: Vec<Box<dyn Correction>>,
    ) -> Self {
        Self::with_providers(Vec::new(), dictionaries, corrections)
    }

    /// The full constructor: normalizers, dictionaries and corrections,
    /// each applied in registration order.
    pub fn with_providers(
        normalizers: Vec<Box<dyn Normalizer>>,
        dictionaries: Vec<Box<dyn Dictionary>>,
        corrections: Vec<Box<dyn Correction>>,
    ) -> Self {
        let phrase_index = PhraseIndex::build(&dictionaries);
        InputParser {
            normalizers,
            dictionaries,
            corrections,
            phrase_index,
        }
    }

    /// Normalize a sentence: run every registered normalizer in order,
    /// then collapse whitespace runs to single spaces and trim the ends.
    ///
    /// Idempotent for the whitespace collapse:
    /// `normalize(normalize(s)) == normalize(s)`.
    pub fn normalize(&self, sentence: &str) -> Result<String, ParseError> {
        self.normalize_with(sentence, &CancellationToken::new())
    }

    /// [`normalize`](Self::normalize) with a cancellation token, polled
    /// before each normalizer invocation.
    pub fn normalize_with(
        &self,
        sentence: &str,
        cancel: &CancellationToken,
    ) -> Result<String, ParseError> {
        let mut sentence = sentence.to_owned();
        for normalizer in &self.normalizers {
            check_cancelled(cancel, "normalizers")?;
            sentence = normalizer.normalize(&sentence);
        }
        Ok(collapse_whitespace(&sentence))
    }

    /// Parse a sentence into ranked candidate interpretations.
    ///
    /// Equivalent to [`parse_with`](Self::parse_with) with no temporary
    /// dictionaries and a fresh (never-cancelled) token.
    ///
    /// An input that normalizes to the empty string has no tokens and
    /// yields an empty solution list; every other input yields at least
    /// one solution, degrading to per-token [`FoundWord::Unknown`] entries
    /// when nothing matches.
    pub fn parse(&self, sentence: &str) -> Result<Vec<RawSolution>, ParseError> {
        self.parse_with(sentence, &[], &CancellationToken::new())
    }

    /// Parse with additional call-scoped dictionaries and a cancellation
    /// token.
    ///
    /// Temporary dictionaries are consulted before the persistent ones for
    /// every token; their phrases are indexed for this call only.
    pub fn parse_with(
        &self,
        sentence: &str,
        temporary_dictionaries: &[Box<dyn Dictionary>],
        cancel: &CancellationToken,
    ) -> Result<Vec<RawSolution>, ParseError> {
        let normalized = self.normalize_with(sentence, cancel)?;
        let tokens: Vec<String> = if normalized.is_empty() {
            // Zero tokens: the whole call yields an empty solution list.
            Vec::new()
        } else {
            normalized.split(' ').map(str::to_owned).collect()
        };

        let mut session = ParseSession::new(tokens);
        loop {
            let Some(token) = session.current_token().map(str::to_owned) else {
                break;
            };
            check_cancelled(cancel, "tokens")?;
            let position = session.cursor();

            collect_dictionaries(
                &mut session,
                position,
                &token,
                temporary_dictionaries,
                cancel,
            )?;
            collect_dictionaries(&mut session, position, &token, &self.dictionaries, cancel)?;
            self.collect_corrections(&mut session, position, &token, cancel)?;

            if session.match_count(position) == 0 {
                add_entries(&mut session, position, vec![FoundWord::unknown(&token)]);
            }
            session.advance();
        }

        let temporary_index = PhraseIndex::build(temporary_dictionaries);
        PhraseEngine::new(&self.phrase_index, &temporary_index).lookup_phrases(&session, cancel)
    }

    fn collect_corrections(
        &self,
        session: &mut ParseSession,
        position: usize,
        token: &str,
        cancel: &CancellationToken,
    ) -> Result<(), ParseError> {
        for correction in &self.corrections {
            check_cancelled(cancel, "corrections")?;
            if !correction.lookup_if_known() && session.match_count(position) != 0 {
                // Fallback-only correction and the token is already known.
                continue;
            }
            let corrected = correction.correct_word(token);
            if !corrected.is_empty() {
                add_entries(session, position, corrected);
            }
        }
        Ok(())
    }
}

fn collect_dictionaries(
    session: &mut ParseSession,
    position: usize,
    token: &str,
    dictionaries: &[Box<dyn Dictionary>],
    cancel: &CancellationToken,
) -> Result<(), ParseError> {
    for dictionary in dictionaries {
        check_cancelled(cancel, "dictionaries")?;
        let entries = dictionary.lookup_term(token);
        if !entries.is_empty() {
            add_entries(session, position, entries);
        }
    }
    Ok(())
}

/// Append each found word as its own matching result, preserving provider
/// priority order.
fn add_entries(session: &mut ParseSession, position: usize, found_words: Vec<FoundWord>) {
    for found_word in found_words {
        let mut result = MatchingResult::new();
        result.add_result(found_word);
        session.add_match(position, result);
    }
}

fn collapse_whitespace(sentence: &str) -> String {
    sentence.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_collapse_trims_and_merges() {
        assert_eq!(collapse_whitespace("  turn \t on  "), "turn on");
        assert_eq!(collapse_whitespace(""), "");
        assert_eq!(collapse_whitespace("   "), "");
    }
}
