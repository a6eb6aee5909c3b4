//! Ranked candidate interpretations of a whole input.

use std::fmt;

use serde::Serialize;

use crate::lexicon::FoundWord;

/// How much of a suggestion the phrase engine accounted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchQuality {
    /// Every found word was folded into full phrase matches.
    Fully,
    /// Some words folded, or the leftovers are standalone dictionary hits.
    Partly,
    /// No folding occurred and the leftovers are unresolved phrase fragments.
    Nothing,
}

impl fmt::Display for MatchQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MatchQuality::Fully => "fully",
            MatchQuality::Partly => "partly",
            MatchQuality::Nothing => "nothing",
        };
        f.write_str(s)
    }
}

/// One ranked candidate interpretation: the found-word sequence after phrase
/// folding, tagged with the match quality.
///
/// Solutions are deduplicated by structural equality: same quality tag and
/// same found-word sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawSolution {
    pub quality: MatchQuality,
    pub found_words: Vec<FoundWord>,
}

impl RawSolution {
    pub fn new(quality: MatchQuality, found_words: Vec<FoundWord>) -> Self {
        RawSolution {
            quality,
            found_words,
        }
    }
}
