//! Guess-selection policies
//!
//! A policy decides which accepted guesses are eligible and how many boards
//! share the guess stream. Scoring itself is the same for every policy: the sum
//! of per-board expected bits over boards not yet solved.

use crate::core::{Feedback, Signature, WORD_LENGTH, Word};

/// Constraint carried into the next round in hard mode
///
/// Every letter revealed Correct must stay at its position, and every letter
/// revealed Present must appear somewhere in the next guess.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HardModeRule {
    fixed: [Option<u8>; WORD_LENGTH],
    required: Vec<u8>,
}

impl HardModeRule {
    /// Derive the constraint from one round's guess and feedback
    #[must_use]
    pub fn from_round(guess: &Word, signature: Signature) -> Self {
        let mut fixed = [None; WORD_LENGTH];
        let mut required = Vec::new();

        for (i, (mark, &letter)) in signature.feedback().iter().zip(guess.letters()).enumerate() {
            match mark {
                Feedback::Correct => fixed[i] = Some(letter),
                Feedback::Present => required.push(letter),
                Feedback::Absent => {}
            }
        }

        Self { fixed, required }
    }

    /// Check whether `word` reuses every revealed letter
    ///
    /// Each letter occurrence of `word` can satisfy at most one requirement, so a
    /// Present letter is not satisfied by a position already pinned as Correct.
    #[must_use]
    pub fn admits(&self, word: &Word) -> bool {
        let mut used = [false; WORD_LENGTH];

        for (i, fixed) in self.fixed.iter().enumerate() {
            if let Some(letter) = fixed {
                if word.letter_at(i) != *letter {
                    return false;
                }
                used[i] = true;
            }
        }

        self.required.iter().all(|&letter| {
            match (0..WORD_LENGTH).find(|&i| !used[i] && word.letter_at(i) == letter) {
                Some(i) => {
                    used[i] = true;
                    true
                }
                None => false,
            }
        })
    }

    /// True when the previous round revealed nothing
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.fixed.iter().all(Option::is_none) && self.required.is_empty()
    }
}

/// How a session picks guesses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessPolicy {
    /// Any accepted guess, one board
    Standard,
    /// One board; guesses must satisfy the rule from the previous round
    HardMode(Option<HardModeRule>),
    /// N independent boards sharing one guess stream
    MultiBoard(usize),
}

impl GuessPolicy {
    /// Hard mode before any round has been played
    #[must_use]
    pub const fn hard() -> Self {
        Self::HardMode(None)
    }

    /// Number of boards this policy tracks
    #[must_use]
    pub const fn boards(&self) -> usize {
        match self {
            Self::MultiBoard(boards) => *boards,
            Self::Standard | Self::HardMode(_) => 1,
        }
    }

    /// Whether `guess` may be played next
    #[must_use]
    pub fn admits(&self, guess: &Word) -> bool {
        match self {
            Self::HardMode(Some(rule)) => rule.is_unconstrained() || rule.admits(guess),
            _ => true,
        }
    }

    /// Record a committed round
    pub fn observe(&mut self, guess: &Word, signatures: &[Signature]) {
        if let (Self::HardMode(rule), [signature]) = (self, signatures) {
            *rule = Some(HardModeRule::from_round(guess, *signature));
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::HardMode(_) => "hard",
            Self::MultiBoard(_) => "multi-board",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str) -> Word {
        Word::new(text).unwrap()
    }

    fn rule(guess: &str, secret: &str) -> HardModeRule {
        let guess = word(guess);
        HardModeRule::from_round(&guess, Signature::compute(&word(secret), &guess))
    }

    #[test]
    fn correct_letter_must_stay_in_place() {
        // TRACE against TOAST: T correct at 0, A correct at 2
        let rule = rule("trace", "toast");
        assert!(rule.admits(&word("toast")));
        assert!(rule.admits(&word("tramp")));
        assert!(!rule.admits(&word("stamp")));
        assert!(!rule.admits(&word("treat")));
    }

    #[test]
    fn correct_letter_at_position_two() {
        // OPTIC against ATTIC: T correct at 2 (also I, C)
        let rule = rule("optic", "attic");
        assert!(rule.admits(&word("attic")));
        assert!(!rule.admits(&word("toxic")));
    }

    #[test]
    fn present_letter_may_move() {
        // SLATE against STEAL: S correct, L/A/T/E present
        let rule = rule("slate", "steal");
        assert!(rule.admits(&word("steal")));
        assert!(rule.admits(&word("stale")));
        assert!(!rule.admits(&word("steak")));
    }

    #[test]
    fn present_letter_needs_its_own_occurrence() {
        // SPEED against ABIDE: E present once, D present
        let rule = rule("speed", "abide");
        assert!(rule.admits(&word("abide")));
        assert!(rule.admits(&word("dense")));
        assert!(!rule.admits(&word("doubt")));
    }

    #[test]
    fn absent_only_round_is_unconstrained() {
        let rule = rule("fuzzy", "crane");
        assert!(rule.is_unconstrained());
        assert!(rule.admits(&word("abcde")));
    }

    #[test]
    fn policy_admits_only_after_observation() {
        let mut policy = GuessPolicy::hard();
        let trace = word("trace");
        assert!(policy.admits(&word("stamp")));

        policy.observe(&trace, &[Signature::compute(&word("toast"), &trace)]);
        assert!(!policy.admits(&word("stamp")));
        assert!(policy.admits(&word("tramp")));
    }

    #[test]
    fn standard_and_multi_ignore_observations() {
        let trace = word("trace");
        let signature = Signature::compute(&word("toast"), &trace);

        let mut standard = GuessPolicy::Standard;
        standard.observe(&trace, &[signature]);
        assert!(standard.admits(&word("stamp")));

        let mut multi = GuessPolicy::MultiBoard(2);
        multi.observe(&trace, &[signature, signature]);
        assert!(multi.admits(&word("stamp")));
        assert_eq!(multi.boards(), 2);
    }
}
