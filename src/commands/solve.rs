//! Word solving command
//!
//! Plays a session against known secrets and records the solution path.

use crate::core::{Signature, Word};
use crate::error::{Error, Result};
use crate::session::{RoundOutcome, Session, Solution};
use crate::solver::{GuessPolicy, SelectorConfig};
use crate::table::SignatureTable;

/// Configuration for solving known secrets
#[derive(Debug, Clone)]
pub struct SolveConfig {
    /// One secret per board
    pub secrets: Vec<Word>,
    pub policy: GuessPolicy,
    pub selector: SelectorConfig,
    /// Stop after this many rounds without a solution
    pub max_rounds: usize,
}

impl SolveConfig {
    #[must_use]
    pub fn new(secrets: Vec<Word>, policy: GuessPolicy) -> Self {
        Self {
            secrets,
            policy,
            selector: SelectorConfig::default(),
            max_rounds: 32,
        }
    }
}

/// Result of solving known secrets
#[derive(Debug, Clone)]
pub struct SolveResult {
    pub secrets: Vec<Word>,
    pub guesses: Vec<GuessStep>,
    /// `None` if the round limit was reached first
    pub solution: Option<Solution>,
}

impl SolveResult {
    #[must_use]
    pub const fn success(&self) -> bool {
        self.solution.is_some()
    }
}

/// A single round of the solution path
#[derive(Debug, Clone)]
pub struct GuessStep {
    pub word: Word,
    pub signatures: Vec<Signature>,
    /// Candidates on unsolved boards before and after the round
    pub candidates_before: usize,
    pub candidates_after: usize,
    pub bits: f64,
    pub terminal: bool,
}

/// Solve the configured secrets against `table`
///
/// # Errors
///
/// - [`Error::BoardCountMismatch`] if the number of secrets does not match the policy
/// - [`Error::UnknownSecret`] if a secret is not a possible secret of the table
/// - any session error
pub fn solve_word(table: &SignatureTable, config: SolveConfig) -> Result<SolveResult> {
    if config.secrets.len() != config.policy.boards() {
        return Err(Error::BoardCountMismatch {
            expected: config.policy.boards(),
            actual: config.secrets.len(),
        });
    }
    if let Some(unknown) = config
        .secrets
        .iter()
        .find(|secret| table.secrets().binary_search(secret).is_err())
    {
        return Err(Error::UnknownSecret(*unknown));
    }

    let mut session = Session::with_config(table, config.policy, config.selector)?;
    let mut guesses = Vec::new();

    for _ in 0..config.max_rounds {
        let candidates_before = session.remaining_candidates();
        let word = session.next_guess()?;
        let (bits, terminal) = session
            .last_selection()
            .map_or((0.0, false), |selection| (selection.bits, selection.terminal));

        let signatures: Vec<Signature> = config
            .secrets
            .iter()
            .map(|secret| Signature::compute(secret, &word))
            .collect();
        let outcome = session.submit_boards(&signatures)?;

        guesses.push(GuessStep {
            word,
            signatures,
            candidates_before,
            candidates_after: session.remaining_candidates(),
            bits,
            terminal,
        });

        if let RoundOutcome::Solved(solution) = outcome {
            return Ok(SolveResult {
                secrets: config.secrets,
                guesses,
                solution: Some(solution),
            });
        }
    }

    Ok(SolveResult {
        secrets: config.secrets,
        guesses,
        solution: None,
    })
}
