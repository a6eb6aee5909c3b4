//! The two-pass phrase-matching engine.
//!
//! Consumes the suggestion sequence of a parse session and folds runs of
//! found words into phrase matches:
//!
//! 1. The full-match pass replaces a contiguous run of found words whose
//!    underlying words equal a candidate phrase's word sequence with a
//!    full-accuracy phrase match. Exact, complete phrases win outright.
//! 2. The partial-match pass reverses the containment: when the whole
//!    found-word sequence occurs inside a longer phrase, it folds into a
//!    half-accuracy phrase match.
//!
//! Candidate phrases are visited in index order (longest first), so longer
//! phrases beat shorter overlapping ones. Ambiguity is never collapsed
//! early: each examined suggestion contributes its own ranked solution,
//! deduplicated structurally.

use crate::cancel::{check_cancelled, CancellationToken};
use crate::error::ParseError;
use crate::lexicon::{FoundWord, Phrase, Word, FULL_MATCH_ACCURACY, PARTIAL_MATCH_ACCURACY};
use crate::phrase_index::PhraseIndex;
use crate::session::ParseSession;
use crate::solution::{MatchQuality, RawSolution};

/// Suggestions examined beyond the first; bounds work against
/// suggestion-space explosion when many providers fire per token.
pub const MAX_SUGGESTION_ITERATIONS: usize = 2;

pub(crate) struct PhraseEngine<'a> {
    persistent: &'a PhraseIndex,
    temporary: &'a PhraseIndex,
}

impl<'a> PhraseEngine<'a> {
    pub fn new(persistent: &'a PhraseIndex, temporary: &'a PhraseIndex) -> Self {
        PhraseEngine {
            persistent,
            temporary,
        }
    }

    /// Fold phrases over the session's suggestions and rank the outcomes.
    pub fn lookup_phrases(
        &self,
        session: &ParseSession,
        cancel: &CancellationToken,
    ) -> Result<Vec<RawSolution>, ParseError> {
        let mut solutions: Vec<RawSolution> = Vec::new();
        let mut iterations = 0usize;

        for suggestion in session.suggestions() {
            check_cancelled(cancel, "phrases")?;
            iterations += 1;

            let mut found_words = suggestion.into_found_words();
            let candidates = self.phrases_containing(&found_words);

            let mut quality: Option<MatchQuality> = None;
            let mut matching_completed = false;

            // Full-match pass: phrases no longer than the found-word list.
            for phrase in &candidates {
                check_cancelled(cancel, "phrases")?;
                if phrase.len() <= found_words.len() {
                    if let Some(folded) = fold_full_match(&found_words, phrase) {
                        found_words = folded;
                        quality = Some(MatchQuality::Fully);
                    }
                    if !any_fragments_left(&found_words) {
                        matching_completed = true;
                        break;
                    }
                }
            }

            // Every word accounted for by full phrase matches: terminal,
            // highest-priority outcome.
            if quality == Some(MatchQuality::Fully) && matching_completed {
                let solution = RawSolution::new(MatchQuality::Fully, found_words);
                insert_if_absent(&mut solutions, &solution, Some(0));
                return Ok(solutions);
            }

            // Partial-match pass: phrases longer than what is left.
            for phrase in &candidates {
                check_cancelled(cancel, "phrases")?;
                if phrase.len() > found_words.len() {
                    if let Some(folded) = fold_partial_match(&found_words, phrase) {
                        found_words = folded;
                        if quality.is_none() {
                            quality = Some(MatchQuality::Partly);
                        }
                    }
                    if !any_fragments_left(&found_words) {
                        matching_completed = true;
                        break;
                    }
                }
            }

            match quality {
                Some(quality) => {
                    let solution = RawSolution::new(quality, found_words);
                    let at = match quality {
                        MatchQuality::Fully => Some(0),
                        _ => None,
                    };
                    insert_if_absent(&mut solutions, &solution, at);
                    if matching_completed {
                        return Ok(solutions);
                    }
                }
                None if !found_words.is_empty() => {
                    if any_fragments_left(&found_words) {
                        // Leftover phrase fragments that never resolved.
                        let solution = RawSolution::new(MatchQuality::Nothing, found_words);
                        insert_if_absent(&mut solutions, &solution, None);
                    } else {
                        // Genuine standalone dictionary hits: ranked above
                        // every trailing Nothing entry.
                        let solution = RawSolution::new(MatchQuality::Partly, found_words);
                        if solutions.is_empty() {
                            solutions.push(solution);
                        } else {
                            let max_index = solutions.len() - 1;
                            for i in (0..=max_index).rev() {
                                if solutions[i].quality == MatchQuality::Nothing {
                                    if i == 0 {
                                        insert_if_absent(&mut solutions, &solution, Some(0));
                                    }
                                } else {
                                    insert_if_absent(&mut solutions, &solution, Some(i + 1));
                                }
                            }
                        }
                    }
                }
                None => {}
            }

            if iterations > MAX_SUGGESTION_ITERATIONS {
                break;
            }
        }

        Ok(solutions)
    }

    /// Every phrase registered under any found word of the suggestion that
    /// is not itself already a phrase match — persistent index first, then
    /// the call-scoped one; discovery order, deduplicated.
    fn phrases_containing(&self, found_words: &[FoundWord]) -> Vec<Phrase> {
        let mut phrases: Vec<Phrase> = Vec::new();
        for found_word in found_words {
            let key = match found_word {
                FoundWord::Match { word, .. } => word.clone(),
                FoundWord::Unknown { token } => Word::new(token.clone()),
                FoundWord::PhraseMatch { .. } => continue,
            };
            for index in [self.persistent, self.temporary] {
                for phrase in index.phrases_for(&key) {
                    if !phrases.contains(phrase) {
                        phrases.push(phrase.clone());
                    }
                }
            }
        }
        phrases
    }
}

/// Any still-unresolved phrase fragment among the found words?
fn any_fragments_left(found_words: &[FoundWord]) -> bool {
    found_words.iter().any(FoundWord::is_unresolved_fragment)
}

/// Search `found_words` for a contiguous run whose underlying words equal
/// the phrase's word sequence; on a hit, replace the run with a single
/// full-accuracy phrase match.
fn fold_full_match(found_words: &[FoundWord], phrase: &Phrase) -> Option<Vec<FoundWord>> {
    let words = phrase.words();
    if words.is_empty() || words.len() > found_words.len() {
        return None;
    }
    let start = (0..=found_words.len() - words.len()).find(|&start| {
        words
            .iter()
            .enumerate()
            .all(|(i, word)| found_words[start + i].matches_word(word))
    })?;

    let mut folded = Vec::with_capacity(found_words.len() + 1 - words.len());
    folded.extend_from_slice(&found_words[..start]);
    folded.push(FoundWord::phrase(phrase.clone(), FULL_MATCH_ACCURACY));
    folded.extend_from_slice(&found_words[start + words.len()..]);
    Some(folded)
}

/// Containment reversed: when the entire found-word sequence occurs
/// contiguously inside the (longer) phrase, fold it into a single
/// half-accuracy phrase match.
fn fold_partial_match(found_words: &[FoundWord], phrase: &Phrase) -> Option<Vec<FoundWord>> {
    let words = phrase.words();
    if found_words.is_empty() || found_words.len() >= words.len() {
        return None;
    }
    let contained = (0..=words.len() - found_words.len()).any(|start| {
        found_words
            .iter()
            .enumerate()
            .all(|(i, found_word)| found_word.matches_word(&words[start + i]))
    });
    if contained {
        Some(vec![FoundWord::phrase(
            phrase.clone(),
            PARTIAL_MATCH_ACCURACY,
        )])
    } else {
        None
    }
}

/// Insert unless an equal solution is already present. `at` of `None` (or
/// past the end) appends.
fn insert_if_absent(solutions: &mut Vec<RawSolution>, solution: &RawSolution, at: Option<usize>) {
    if solutions.iter().any(|existing| existing == solution) {
        return;
    }
    match at {
        Some(index) if index < solutions.len() => solutions.insert(index, solution.clone()),
        _ => solutions.push(solution.clone()),
    }
}
