//! Word-to-phrases lookup table.
//!
//! Built once per dictionary set: a persistent index at parser construction
//! and a per-call index for temporary dictionaries. Immutable afterwards and
//! safely shared read-only across concurrent parse calls.

use std::collections::HashMap;

use crate::dictionary::Dictionary;
use crate::lexicon::{Phrase, Word};

/// Maps each word to the phrases containing it.
///
/// Every bucket is ordered by descending phrase word count with an
/// ascending tie-break on the display value, so longest-match-first
/// resolution is deterministic across calls. A phrase whose word occurs in
/// it twice appears twice in that word's bucket; candidate gathering
/// deduplicates.
#[derive(Debug, Default)]
pub struct PhraseIndex {
    buckets: HashMap<Word, Vec<Phrase>>,
}

impl PhraseIndex {
    /// Build the index from every phrase of every dictionary.
    pub fn build(dictionaries: &[Box<dyn Dictionary>]) -> Self {
        let mut buckets: HashMap<Word, Vec<Phrase>> = HashMap::new();
        for dictionary in dictionaries {
            for phrase in dictionary.phrases() {
                for word in phrase.words() {
                    buckets
                        .entry(word.clone())
                        .or_default()
                        .push(phrase.clone());
                }
            }
        }
        for bucket in buckets.values_mut() {
            bucket.sort_by(|a, b| {
                b.len()
                    .cmp(&a.len())
                    .then_with(|| a.value().cmp(b.value()))
            });
        }
        PhraseIndex { buckets }
    }

    /// The phrases containing `word`, longest first.
    pub fn phrases_for(&self, word: &Word) -> &[Phrase] {
        self.buckets.get(word).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}
