//! Input normalization providers.
//!
//! Normalizers run in registration order over the raw sentence before
//! tokenization; the parser then collapses whitespace runs and trims the
//! ends itself (see [`InputParser::normalize`](crate::InputParser)).

/// Transforms a raw sentence into a normalized form.
///
/// Implementations must be safe for concurrent read-only use; the parser
/// shares them across concurrently executing parse calls without
/// synchronization.
pub trait Normalizer: Send + Sync {
    fn normalize(&self, sentence: &str) -> String;
}

/// Case-folds the sentence to lowercase.
#[derive(Debug, Clone, Copy, Default)]
pub struct CaseNormalizer;

impl Normalizer for CaseNormalizer {
    fn normalize(&self, sentence: &str) -> String {
        sentence.to_lowercase()
    }
}

/// Replaces ASCII punctuation with spaces. The remnants are merged by the
/// parser's whitespace collapse, so `"turn, on!"` tokenizes like `"turn on"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PunctuationNormalizer;

impl Normalizer for PunctuationNormalizer {
    fn normalize(&self, sentence: &str) -> String {
        sentence
            .chars()
            .map(|c| if c.is_ascii_punctuation() { ' ' } else { c })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_normalizer_lowercases() {
        assert_eq!(CaseNormalizer.normalize("Turn ON the Light"), "turn on the light");
    }

    #[test]
    fn punctuation_becomes_spaces() {
        assert_eq!(PunctuationNormalizer.normalize("turn, on!"), "turn  on ");
    }

    #[test]
    fn non_ascii_text_passes_through() {
        assert_eq!(PunctuationNormalizer.normalize("schalte an"), "schalte an");
    }
}
