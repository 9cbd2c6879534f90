//! Vocabulary word representation
//!
//! A Word is a fixed-length run of lowercase ASCII letters stored inline, so it
//! is `Copy` and cheap to keep millions of in the signature table.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of letters in every word the engine handles
pub const WORD_LENGTH: usize = 5;

/// Size of the letter alphabet (`a`..=`z`)
pub const ALPHABET_SIZE: usize = 26;

/// A fixed-length puzzle word
///
/// Ordering is lexicographic, which is what the selector relies on for its
/// deterministic tie-break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Word([u8; WORD_LENGTH]);

/// Error type for invalid words
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WordError {
    #[error("word must be exactly {WORD_LENGTH} letters, got {0}")]
    InvalidLength(usize),
    #[error("word must contain only ASCII letters")]
    NonAscii,
    #[error("word contains invalid characters")]
    InvalidCharacters,
}

impl Word {
    /// Create a new Word from a string
    ///
    /// Input is normalized to lowercase.
    ///
    /// # Errors
    /// Returns `WordError` if the length is not [`WORD_LENGTH`] or the text
    /// contains anything other than ASCII letters.
    ///
    /// # Examples
    /// ```
    /// use wordle_engine::core::Word;
    ///
    /// let word = Word::new("CRANE").unwrap();
    /// assert_eq!(word.text(), "crane");
    ///
    /// assert!(Word::new("too long").is_err());
    /// assert!(Word::new("sh0rt").is_err());
    /// ```
    pub fn new(text: &str) -> Result<Self, WordError> {
        if !text.is_ascii() {
            return Err(WordError::NonAscii);
        }

        if text.len() != WORD_LENGTH {
            return Err(WordError::InvalidLength(text.len()));
        }

        let mut letters = [0u8; WORD_LENGTH];
        for (slot, byte) in letters.iter_mut().zip(text.bytes()) {
            let lower = byte.to_ascii_lowercase();
            if !lower.is_ascii_lowercase() {
                return Err(WordError::InvalidCharacters);
            }
            *slot = lower;
        }

        Ok(Self(letters))
    }

    /// Get the word as a string slice
    #[must_use]
    pub fn text(&self) -> &str {
        // Construction only admits ASCII lowercase bytes
        std::str::from_utf8(&self.0).unwrap_or_default()
    }

    /// Get the word as a byte array
    #[inline]
    #[must_use]
    pub const fn letters(&self) -> &[u8; WORD_LENGTH] {
        &self.0
    }

    /// Get the letter at a specific position
    ///
    /// # Panics
    /// Panics if `position >= WORD_LENGTH`
    #[inline]
    #[must_use]
    pub const fn letter_at(&self, position: usize) -> u8 {
        self.0[position]
    }

    /// Count occurrences of each letter, indexed by `letter - b'a'`
    #[must_use]
    pub fn letter_counts(&self) -> [u8; ALPHABET_SIZE] {
        let mut counts = [0u8; ALPHABET_SIZE];
        for &letter in &self.0 {
            counts[usize::from(letter - b'a')] += 1;
        }
        counts
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

impl FromStr for Word {
    type Err = WordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.trim())
    }
}
