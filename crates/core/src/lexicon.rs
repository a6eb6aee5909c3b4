//! Lexicon data model: words, phrases, and per-token match results.
//!
//! `Word` and `Phrase` values are owned by the dictionary that defined them
//! and outlive any single parse call; they are cheap to clone and are cloned
//! into the call-scoped `FoundWord` values the matching pipeline operates on.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Accuracy assigned to an exact dictionary hit or a full phrase match.
pub const FULL_MATCH_ACCURACY: f64 = 1.0;
/// Accuracy assigned to a phrase match produced by the partial-match pass.
pub const PARTIAL_MATCH_ACCURACY: f64 = 0.5;

/// Atomic lexical unit.
///
/// Identity is value equality over the normalized text plus the optional
/// sense tag, so two dictionaries defining `"light"` produce interchangeable
/// words, while `"light"`/`noun` and `"light"`/`verb` stay distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Word {
    value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sense: Option<String>,
}

impl Word {
    pub fn new(value: impl Into<String>) -> Self {
        Word {
            value: value.into(),
            sense: None,
        }
    }

    pub fn with_sense(value: impl Into<String>, sense: impl Into<String>) -> Self {
        Word {
            value: value.into(),
            sense: Some(sense.into()),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn sense(&self) -> Option<&str> {
        self.sense.as_deref()
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// Ordered sequence of words plus a display value.
///
/// Multiple phrases may share constituent words; the phrase index (not the
/// phrase itself) tracks that sharing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Phrase {
    words: Vec<Word>,
    value: String,
}

impl Phrase {
    pub fn new(words: Vec<Word>, value: impl Into<String>) -> Self {
        Phrase {
            words,
            value: value.into(),
        }
    }

    /// Build a phrase from plain word values; the display value is the
    /// values joined by single spaces.
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words: Vec<Word> = values.into_iter().map(Word::new).collect();
        let value = words
            .iter()
            .map(Word::value)
            .collect::<Vec<_>>()
            .join(" ");
        Phrase { words, value }
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Number of constituent words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for Phrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// Result of matching one input token (or a folded range of tokens)
/// against the lexicon.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FoundWord {
    /// A single dictionary word hit. `part_of_phrase` marks the word as a
    /// fragment of some phrase the engine has not (yet) resolved.
    Match {
        word: Word,
        accuracy: f64,
        part_of_phrase: bool,
    },
    /// A folded multi-word phrase hit. `resolved` marks it as final: a
    /// phrase match never takes part in further folding.
    PhraseMatch {
        phrase: Phrase,
        accuracy: f64,
        resolved: bool,
    },
    /// Verbatim input token no dictionary or correction could resolve.
    /// Synthetic fallback; never folds into a phrase.
    Unknown { token: String },
}

impl FoundWord {
    /// A plain word match.
    pub fn word(word: Word, accuracy: f64, part_of_phrase: bool) -> Self {
        FoundWord::Match {
            word,
            accuracy,
            part_of_phrase,
        }
    }

    /// A resolved phrase match with the given accuracy.
    pub fn phrase(phrase: Phrase, accuracy: f64) -> Self {
        FoundWord::PhraseMatch {
            phrase,
            accuracy,
            resolved: true,
        }
    }

    pub fn unknown(token: impl Into<String>) -> Self {
        FoundWord::Unknown {
            token: token.into(),
        }
    }

    /// Whether this entry is already a folded phrase.
    pub fn is_phrase(&self) -> bool {
        matches!(self, FoundWord::PhraseMatch { .. })
    }

    /// Whether this entry is a still-unresolved phrase fragment: a plain
    /// match flagged `part_of_phrase`, or an unresolved phrase match.
    pub fn is_unresolved_fragment(&self) -> bool {
        match self {
            FoundWord::Match { part_of_phrase, .. } => *part_of_phrase,
            FoundWord::PhraseMatch { resolved, .. } => !resolved,
            FoundWord::Unknown { .. } => false,
        }
    }

    /// Whether this entry's underlying word equals `word`. Phrase matches
    /// and unknowns never equal a dictionary word.
    pub fn matches_word(&self, word: &Word) -> bool {
        match self {
            FoundWord::Match { word: w, .. } => w == word,
            _ => false,
        }
    }

    pub fn accuracy(&self) -> Option<f64> {
        match self {
            FoundWord::Match { accuracy, .. } | FoundWord::PhraseMatch { accuracy, .. } => {
                Some(*accuracy)
            }
            FoundWord::Unknown { .. } => None,
        }
    }
}

impl fmt::Display for FoundWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FoundWord::Match { word, accuracy, .. } => write!(f, "{} ({})", word, accuracy),
            FoundWord::PhraseMatch {
                phrase, accuracy, ..
            } => write!(f, "\"{}\" ({})", phrase, accuracy),
            FoundWord::Unknown { token } => write!(f, "{}?", token),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_equality_is_value_plus_sense() {
        assert_eq!(Word::new("light"), Word::new("light"));
        assert_ne!(Word::new("light"), Word::with_sense("light", "noun"));
        assert_ne!(
            Word::with_sense("light", "noun"),
            Word::with_sense("light", "verb")
        );
    }

    #[test]
    fn phrase_from_values_joins_display_value() {
        let phrase = Phrase::from_values(["turn", "on"]);
        assert_eq!(phrase.value(), "turn on");
        assert_eq!(phrase.len(), 2);
        assert_eq!(phrase.words()[1], Word::new("on"));
    }

    #[test]
    fn unknown_is_never_a_fragment() {
        assert!(!FoundWord::unknown("zzz").is_unresolved_fragment());
        assert!(FoundWord::word(Word::new("on"), 1.0, true).is_unresolved_fragment());
        assert!(!FoundWord::phrase(Phrase::from_values(["turn", "on"]), 1.0)
            .is_unresolved_fragment());
    }

    #[test]
    fn matches_word_only_for_plain_matches() {
        let on = Word::new("on");
        assert!(FoundWord::word(on.clone(), 1.0, false).matches_word(&on));
        assert!(!FoundWord::unknown("on").matches_word(&on));
        assert!(!FoundWord::phrase(Phrase::from_values(["on"]), 1.0).matches_word(&on));
    }
}
