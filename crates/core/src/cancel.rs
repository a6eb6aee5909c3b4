//! Cooperative cancellation.
//!
//! Parsing is synchronous; a caller that wants to abort an in-flight parse
//! hands the parser a token and trips it from another thread. The parser
//! polls the token at well-defined checkpoints (before each normalizer,
//! dictionary and correction lookup, before each token, and before each
//! suggestion and phrase-loop iteration) and fails the whole call with
//! [`ParseError::Cancelled`] — no partial result is ever returned.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::ParseError;

/// Shared cancellation flag. Cloning shares the underlying signal.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trip the signal. Every clone of this token observes it.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Checkpoint helper: fail with a cancellation error naming the stage the
/// parser was working on when the signal tripped.
pub(crate) fn check_cancelled(
    cancel: &CancellationToken,
    stage: &'static str,
) -> Result<(), ParseError> {
    if cancel.is_cancelled() {
        Err(ParseError::Cancelled { stage })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_flag() {
        let token = CancellationToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());
        token.cancel();
        assert!(clone.is_cancelled());
    }

    #[test]
    fn checkpoint_reports_stage() {
        let token = CancellationToken::new();
        assert!(check_cancelled(&token, "dictionaries").is_ok());
        token.cancel();
        let err = check_cancelled(&token, "dictionaries").unwrap_err();
        assert_eq!(
            err.to_string(),
            "parser was cancelled while processing dictionaries"
        );
    }
}
