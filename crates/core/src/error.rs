//! Parser error type.
//!
//! A token the lexicon cannot resolve is NOT an error: it surfaces in-band
//! as [`FoundWord::Unknown`](crate::lexicon::FoundWord) and ultimately as a
//! `Nothing`/`Partly` solution. The only failure a parse call itself can
//! produce is cooperative cancellation.

/// Errors returned by the parser's public operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The cooperative cancellation signal tripped at a checkpoint. The
    /// call is abandoned wholesale; callers wanting retry semantics must
    /// re-invoke the whole parse.
    #[error("parser was cancelled while processing {stage}")]
    Cancelled { stage: &'static str },
}
