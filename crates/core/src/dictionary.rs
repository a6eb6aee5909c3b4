//! Dictionary providers.
//!
//! A dictionary maps a single raw token to candidate [`FoundWord`]s and
//! exposes the multi-word phrases it defines. The parser consults every
//! registered dictionary for every token — no dictionary is authoritative,
//! and registration order is the ranking priority between their hits.

use serde::{Deserialize, Serialize};

use crate::lexicon::{FoundWord, Phrase, Word, FULL_MATCH_ACCURACY};

/// Provider mapping raw tokens to candidate found words.
///
/// Implementations must be safe for concurrent read-only use. The parser
/// does not defend against contract violations (e.g. returning a match for
/// a token it was not asked about); providers must uphold the contract.
pub trait Dictionary: Send + Sync {
    /// Candidate matches for a single input token. An empty result means
    /// this dictionary does not know the token.
    fn lookup_term(&self, token: &str) -> Vec<FoundWord>;

    /// Every multi-word phrase this dictionary defines. Used once per
    /// dictionary set to build the phrase index.
    fn phrases(&self) -> Vec<Phrase>;
}

// ──────────────────────────────────────────────
// WordDictionary
// ──────────────────────────────────────────────

/// In-memory dictionary over a fixed set of words and phrases.
///
/// `lookup_term` matches token text against word values exactly (normalize
/// upstream for case-insensitive behavior). A word that occurs in any of
/// the dictionary's phrases is flagged `part_of_phrase`, and phrase
/// constituent words are matchable on their own even when not registered
/// as standalone words.
#[derive(Debug, Clone, Default)]
pub struct WordDictionary {
    words: Vec<Word>,
    phrases: Vec<Phrase>,
}

impl WordDictionary {
    pub fn new(words: Vec<Word>, phrases: Vec<Phrase>) -> Self {
        WordDictionary { words, phrases }
    }

    /// Build from a deserialized lexicon definition file.
    pub fn from_definition(definition: LexiconDefinition) -> Self {
        let words = definition.words.into_iter().map(Word::new).collect();
        let phrases = definition
            .phrases
            .into_iter()
            .map(|p| {
                let words: Vec<Word> = p.words.into_iter().map(Word::new).collect();
                let value = match p.value {
                    Some(value) => value,
                    None => words
                        .iter()
                        .map(Word::value)
                        .collect::<Vec<_>>()
                        .join(" "),
                };
                Phrase::new(words, value)
            })
            .collect();
        WordDictionary { words, phrases }
    }

    /// Every word this dictionary knows, paired with its phrase-membership
    /// flag. Standalone words come first, then phrase constituents not
    /// already listed. Used to seed corrections.
    pub fn known_words(&self) -> Vec<(Word, bool)> {
        let mut known: Vec<(Word, bool)> = self
            .words
            .iter()
            .map(|w| (w.clone(), self.word_in_phrase(w)))
            .collect();
        for phrase in &self.phrases {
            for word in phrase.words() {
                if !known.iter().any(|(w, _)| w == word) {
                    known.push((word.clone(), true));
                }
            }
        }
        known
    }

    fn word_in_phrase(&self, word: &Word) -> bool {
        self.phrases.iter().any(|p| p.words().contains(word))
    }
}

impl Dictionary for WordDictionary {
    fn lookup_term(&self, token: &str) -> Vec<FoundWord> {
        let mut found = Vec::new();
        for word in &self.words {
            if word.value() == token {
                found.push(FoundWord::word(
                    word.clone(),
                    FULL_MATCH_ACCURACY,
                    self.word_in_phrase(word),
                ));
            }
        }
        for phrase in &self.phrases {
            for word in phrase.words() {
                if word.value() == token {
                    let hit = FoundWord::word(word.clone(), FULL_MATCH_ACCURACY, true);
                    if !found.contains(&hit) {
                        found.push(hit);
                    }
                }
            }
        }
        found
    }

    fn phrases(&self) -> Vec<Phrase> {
        self.phrases.clone()
    }
}

// ──────────────────────────────────────────────
// Lexicon definition files
// ──────────────────────────────────────────────

/// Serde model for a lexicon definition file:
///
/// ```json
/// {
///   "words": ["light", "heating"],
///   "phrases": [{"words": ["turn", "on"], "value": "switch on"}]
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LexiconDefinition {
    #[serde(default)]
    pub words: Vec<String>,
    #[serde(default)]
    pub phrases: Vec<PhraseDefinition>,
}

/// One phrase entry of a lexicon definition file. `value` defaults to the
/// words joined by spaces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhraseDefinition {
    pub words: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}
