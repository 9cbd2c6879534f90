//! Driver protocol
//!
//! The session never presents a guess or waits for feedback itself. A [`Driver`]
//! does both: a terminal prompt, a test harness, or anything else that can turn
//! a guess into a signature. [`drive`] runs the round protocol to completion.

use super::{RoundOutcome, Session, Solution};
use crate::core::{Signature, Word};
use crate::error::{Error, Result};

/// Collaborator that presents guesses and resolves their feedback
pub trait Driver {
    type Error: From<Error>;

    /// Show the guess for `step`
    ///
    /// # Errors
    /// Implementation-defined.
    fn present(&mut self, guess: &Word, step: usize) -> Result<(), Self::Error>;

    /// Feedback for `guess`, one signature per board
    ///
    /// `None` abandons the puzzle.
    ///
    /// # Errors
    /// Implementation-defined.
    fn feedback(&mut self, guess: &Word, boards: usize) -> Result<Option<Vec<Signature>>, Self::Error>;

    /// Decide whether to ask again after the session rejected a report
    ///
    /// Returning `false` ends [`drive`] with the error.
    fn rejected(&mut self, _error: &Error) -> bool {
        false
    }

    /// Called once with the final answers
    ///
    /// # Errors
    /// Implementation-defined.
    fn finished(&mut self, _solution: &Solution) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Run `session` until it is solved or the driver gives up
///
/// Returns `Ok(None)` if the driver abandoned the puzzle.
///
/// # Errors
/// Any error from the driver, or a session error the driver declined to retry.
pub fn drive<D: Driver>(session: &mut Session<'_>, driver: &mut D) -> Result<Option<Solution>, D::Error> {
    loop {
        let guess = session.next_guess()?;
        driver.present(&guess, session.steps())?;

        loop {
            let Some(signatures) = driver.feedback(&guess, session.board_count())? else {
                return Ok(None);
            };

            match session.submit_boards(&signatures) {
                Ok(RoundOutcome::Continue) => break,
                Ok(RoundOutcome::Solved(solution)) => {
                    driver.finished(&solution)?;
                    return Ok(Some(solution));
                }
                Err(error) if driver.rejected(&error) => {}
                Err(error) => return Err(error.into()),
            }
        }
    }
}

/// Driver that knows the secrets and computes feedback itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OracleDriver {
    secrets: Vec<Word>,
    guesses: Vec<Word>,
}

impl OracleDriver {
    /// One secret per board, in board order
    #[must_use]
    pub const fn new(secrets: Vec<Word>) -> Self {
        Self {
            secrets,
            guesses: Vec::new(),
        }
    }

    #[must_use]
    pub fn single(secret: Word) -> Self {
        Self::new(vec![secret])
    }

    /// Every guess presented so far
    #[must_use]
    pub fn guesses(&self) -> &[Word] {
        &self.guesses
    }
}

impl Driver for OracleDriver {
    type Error = Error;

    fn present(&mut self, guess: &Word, _step: usize) -> Result<()> {
        self.guesses.push(*guess);
        Ok(())
    }

    fn feedback(&mut self, guess: &Word, boards: usize) -> Result<Option<Vec<Signature>>> {
        if boards != self.secrets.len() {
            return Err(Error::BoardCountMismatch {
                expected: boards,
                actual: self.secrets.len(),
            });
        }

        Ok(Some(
            self.secrets
                .iter()
                .map(|secret| Signature::compute(secret, guess))
                .collect(),
        ))
    }
}
