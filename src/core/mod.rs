//! Core domain types
//!
//! Words and the feedback signatures they produce. Everything here is pure and
//! has no knowledge of tables, candidate sets or sessions.

mod signature;
mod word;

pub use signature::{Feedback, Signature, WIRE_DIGITS, signature};
pub use word::{ALPHABET_SIZE, WORD_LENGTH, Word, WordError};
