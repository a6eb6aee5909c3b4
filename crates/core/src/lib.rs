//! parlance-core: semantic input parser.
//!
//! Turns a raw user utterance into a ranked list of candidate
//! interpretations against pluggable dictionaries, multi-word phrase
//! definitions and fallback corrections.
//!
//! The pipeline: raw text -> normalize -> tokenize -> per-token candidate
//! collection (dictionaries, then corrections, then an `Unknown` fallback)
//! -> lazy suggestion enumeration -> two-pass phrase folding -> ranked
//! [`RawSolution`] list.
//!
//! # Public API
//!
//! Key types are re-exported at the crate root:
//!
//! - [`InputParser`] -- the parser façade ([`parse`](InputParser::parse),
//!   [`parse_with`](InputParser::parse_with),
//!   [`normalize`](InputParser::normalize))
//! - [`Normalizer`], [`Dictionary`], [`Correction`] -- the provider traits,
//!   with stock implementations [`CaseNormalizer`], [`PunctuationNormalizer`],
//!   [`WordDictionary`] and [`DistanceCorrection`]
//! - [`Word`], [`Phrase`], [`FoundWord`] -- the lexicon model
//! - [`RawSolution`], [`MatchQuality`] -- ranked parse outcomes
//! - [`CancellationToken`], [`ParseError`] -- cooperative cancellation
//!
//! Parsing is synchronous and call-scoped: a parser is immutable after
//! construction and may be shared read-only across threads.

pub mod cancel;
pub mod correction;
pub mod dictionary;
mod engine;
pub mod error;
pub mod lexicon;
pub mod normalizer;
pub mod parser;
pub mod phrase_index;
pub mod session;
pub mod solution;

// ── Convenience re-exports: key types ────────────────────────────────

pub use cancel::CancellationToken;
pub use correction::{damerau_levenshtein, Correction, DistanceCorrection};
pub use dictionary::{Dictionary, LexiconDefinition, PhraseDefinition, WordDictionary};
pub use engine::MAX_SUGGESTION_ITERATIONS;
pub use error::ParseError;
pub use lexicon::{FoundWord, Phrase, Word, FULL_MATCH_ACCURACY, PARTIAL_MATCH_ACCURACY};
pub use normalizer::{CaseNormalizer, Normalizer, PunctuationNormalizer};
pub use parser::InputParser;
pub use phrase_index::PhraseIndex;
pub use session::{MatchingResult, ParseSession, Suggestion, Suggestions};
pub use solution::{MatchQuality, RawSolution};
