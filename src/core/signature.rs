//! Feedback signatures
//!
//! A signature is the per-position result of checking a guess against a
//! secret. It is stored as a single base-3 number:
//! - 0 = Absent (letter not in the secret, or all copies already accounted for)
//! - 1 = Present (letter in the secret, wrong position)
//! - 2 = Correct (letter in the right position)
//!
//! Position `i` contributes `digit × 3^i`, so every signature fits in a `u8`
//! (0-242).
//!
//! Textual collaborators exchange signatures through the wire format defined
//! by [`WIRE_DIGITS`].

use super::word::{ALPHABET_SIZE, WORD_LENGTH, Word};
use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// Result for a single letter position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Feedback {
    /// Letter not in the secret (gray)
    Absent,
    /// Letter in the secret at another position (yellow)
    Present,
    /// Letter at exactly this position (green)
    Correct,
}

/// Digit-to-feedback table shared by every textual collaborator.
///
/// A wire signature is a string of exactly [`WORD_LENGTH`] of these digits.
/// Multi-board reports concatenate one wire signature per board, in board order.
pub const WIRE_DIGITS: [(char, Feedback); 3] = [
    ('1', Feedback::Absent),
    ('2', Feedback::Present),
    ('3', Feedback::Correct),
];

impl Feedback {
    const fn digit(self) -> u8 {
        match self {
            Self::Absent => 0,
            Self::Present => 1,
            Self::Correct => 2,
        }
    }

    const fn from_digit(digit: u8) -> Self {
        match digit {
            2 => Self::Correct,
            1 => Self::Present,
            _ => Self::Absent,
        }
    }

    /// Wire digit for this feedback
    #[must_use]
    pub fn wire_char(self) -> char {
        WIRE_DIGITS
            .iter()
            .find(|(_, feedback)| *feedback == self)
            .map_or('1', |(digit, _)| *digit)
    }

    /// Parse a single wire digit
    #[must_use]
    pub fn from_wire(c: char) -> Option<Self> {
        WIRE_DIGITS
            .iter()
            .find(|(digit, _)| *digit == c)
            .map(|(_, feedback)| *feedback)
    }

    /// Parse a wire digit or a symbolic mark (`G`, `Y`, `-`/`_`, or square emoji)
    #[must_use]
    pub fn from_symbol(c: char) -> Option<Self> {
        Self::from_wire(c).or(match c {
            'G' | 'g' | '🟩' => Some(Self::Correct),
            'Y' | 'y' | '🟨' => Some(Self::Present),
            '-' | '_' | '⬜' | '⬛' => Some(Self::Absent),
            _ => None,
        })
    }

    /// Square emoji for display
    #[must_use]
    pub const fn emoji(self) -> char {
        match self {
            Self::Correct => '🟩',
            Self::Present => '🟨',
            Self::Absent => '⬜',
        }
    }
}

/// Feedback signature for one guess against one secret
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Signature(u8);

impl Signature {
    /// All positions correct
    pub const ALL_CORRECT: Self = Self(242); // 2 + 2×3 + 2×9 + 2×27 + 2×81

    /// Number of distinct signatures (3^5)
    pub const COUNT: usize = 243;

    /// Compute the signature produced when `guess` is checked against `secret`
    ///
    /// # Algorithm
    /// 1. Exact-match pass: equal letters at equal positions are Correct and are
    ///    withheld from the secret's remaining letter pool.
    /// 2. Membership pass: every other guess letter consumes one remaining copy
    ///    from the pool if available (Present), otherwise it is Absent.
    ///
    /// The pool is what caps the non-Absent marks for a letter at the number of
    /// times it occurs in the secret.
    ///
    /// # Examples
    /// ```
    /// use wordle_engine::core::{Feedback, Signature, Word};
    ///
    /// let secret = Word::new("slate").unwrap();
    /// let guess = Word::new("crane").unwrap();
    /// let signature = Signature::compute(&secret, &guess);
    ///
    /// assert_eq!(signature.to_wire(), "11313");
    /// assert_eq!(signature.feedback()[2], Feedback::Correct);
    /// ```
    #[must_use]
    pub fn compute(secret: &Word, guess: &Word) -> Self {
        let mut marks = [Feedback::Absent; WORD_LENGTH];
        let mut pool = [0u8; ALPHABET_SIZE];

        for (i, (&g, &s)) in guess.letters().iter().zip(secret.letters()).enumerate() {
            if g == s {
                marks[i] = Feedback::Correct;
            } else {
                pool[usize::from(s - b'a')] += 1;
            }
        }

        for (mark, &g) in marks.iter_mut().zip(guess.letters()) {
            if *mark == Feedback::Correct {
                continue;
            }
            let remaining = &mut pool[usize::from(g - b'a')];
            if *remaining > 0 {
                *mark = Feedback::Present;
                *remaining -= 1;
            }
        }

        Self::from_feedback(marks)
    }

    /// Build a signature from explicit per-position feedback
    #[must_use]
    pub fn from_feedback(marks: [Feedback; WORD_LENGTH]) -> Self {
        let mut value = 0u8;
        let mut multiplier = 1u8;
        for mark in marks {
            value += mark.digit() * multiplier;
            multiplier = multiplier.saturating_mul(3);
        }
        Self(value)
    }

    /// Raw base-3 value (0-242)
    #[inline]
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Decode into per-position feedback
    #[must_use]
    pub fn feedback(self) -> [Feedback; WORD_LENGTH] {
        let mut marks = [Feedback::Absent; WORD_LENGTH];
        let mut value = self.0;
        for mark in &mut marks {
            *mark = Feedback::from_digit(value % 3);
            value /= 3;
        }
        marks
    }

    /// Check whether every position is Correct
    #[inline]
    #[must_use]
    pub const fn is_all_correct(self) -> bool {
        self.0 == Self::ALL_CORRECT.0
    }

    /// Parse a wire signature such as `"11313"`
    ///
    /// # Errors
    /// Returns [`Error::InvalidSignature`] on wrong length or any digit outside
    /// [`WIRE_DIGITS`].
    pub fn from_wire(text: &str) -> Result<Self, Error> {
        Self::parse_with(text, Feedback::from_wire)
    }

    /// Render as a wire signature
    #[must_use]
    pub fn to_wire(self) -> String {
        self.feedback().iter().map(|mark| mark.wire_char()).collect()
    }

    /// Split a concatenated multi-board wire report into one signature per board
    ///
    /// # Errors
    /// Returns [`Error::InvalidSignature`] if the report is not exactly
    /// `boards × WORD_LENGTH` valid wire digits.
    ///
    /// # Examples
    /// ```
    /// use wordle_engine::core::Signature;
    ///
    /// let boards = Signature::parse_boards("3333311112", 2).unwrap();
    /// assert!(boards[0].is_all_correct());
    /// assert_eq!(boards[1].to_wire(), "11112");
    /// ```
    pub fn parse_boards(text: &str, boards: usize) -> Result<Vec<Self>, Error> {
        let chars: Vec<char> = text.trim().chars().collect();
        if chars.len() != boards * WORD_LENGTH {
            return Err(Error::InvalidSignature(format!(
                "expected {} digits for {boards} board(s), got {}",
                boards * WORD_LENGTH,
                chars.len()
            )));
        }

        chars
            .chunks(WORD_LENGTH)
            .map(|chunk| Self::from_wire(&chunk.iter().collect::<String>()))
            .collect()
    }

    /// Render as square emoji
    #[must_use]
    pub fn to_emoji(self) -> String {
        self.feedback().iter().map(|mark| mark.emoji()).collect()
    }

    fn parse_with(text: &str, parse: impl Fn(char) -> Option<Feedback>) -> Result<Self, Error> {
        let chars: Vec<char> = text.trim().chars().collect();
        if chars.len() != WORD_LENGTH {
            return Err(Error::InvalidSignature(format!(
                "expected {WORD_LENGTH} symbols, got {}",
                chars.len()
            )));
        }

        let mut marks = [Feedback::Absent; WORD_LENGTH];
        for (mark, c) in marks.iter_mut().zip(chars) {
            *mark = parse(c)
                .ok_or_else(|| Error::InvalidSignature(format!("unknown symbol '{c}'")))?;
        }
        Ok(Self::from_feedback(marks))
    }
}

/// Compute the signature `guess` receives when the hidden word is `secret`
#[must_use]
pub fn signature(secret: &Word, guess: &Word) -> Signature {
    Signature::compute(secret, guess)
}

impl FromStr for Signature {
    type Err = Error;

    /// Accepts wire digits or symbolic marks, e.g. `"32113"` or `"GY--G"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with(s, Feedback::from_symbol)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_wire())
    }
}
