//! Engine error type

use crate::core::{Signature, Word, WordError};
use thiserror::Error;

/// Errors surfaced by the engine
///
/// None of these are retried internally. A failed operation leaves the
/// session untouched, so a driver may correct its input and try again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Wrong length, or a symbol outside the three-valued domain
    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error(transparent)]
    InvalidWord(#[from] WordError),

    /// The guess was not part of the accepted vocabulary the table was built from
    #[error("'{0}' is not in the signature table")]
    UnknownGuess(Word),

    /// The word is not among the possible secrets
    #[error("'{0}' is not a possible secret")]
    UnknownSecret(Word),

    /// The signature never occurs for this guess against any possible secret
    #[error("signature {signature} never occurs for guess '{guess}'")]
    UnknownSignature { guess: Word, signature: Signature },

    /// The reported feedback history is inconsistent with every possible secret
    #[error("no candidates remain: the reported feedback is inconsistent")]
    NoRemainingCandidates,

    #[error("session is already complete")]
    SessionAlreadyComplete,

    /// Feedback was submitted before a guess was issued for the round
    #[error("no guess is awaiting feedback")]
    NoPendingGuess,

    #[error("expected feedback for {expected} board(s), got {actual}")]
    BoardCountMismatch { expected: usize, actual: usize },

    /// Hard mode rejected every accepted guess
    #[error("no accepted guess satisfies the hard-mode constraints")]
    NoAdmissibleGuess,

    #[error("the possible-secrets vocabulary is empty")]
    EmptyVocabulary,
}

/// Result alias for engine operations
pub type Result<T, E = Error> = std::result::Result<T, E>;
