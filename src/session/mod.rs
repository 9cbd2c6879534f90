//! Puzzle session
//!
//! A state machine driven by two calls per round: [`Session::next_guess`] emits
//! a guess, [`Session::submit_boards`] (or [`Session::submit_feedback`] for a
//! single board) hands back its feedback. The session owns one candidate set per
//! board and borrows the shared, read-only signature table.
//!
//! Every transition computes its result before committing anything, so a
//! rejected submission leaves the round open for a corrected report.

pub mod driver;

use crate::core::{Signature, Word};
use crate::error::{Error, Result};
use crate::solver::{CandidateSet, GuessPolicy, Selection, SelectorConfig, select_best_guess};
use crate::table::SignatureTable;
use log::{debug, info};

/// Observable position in the round protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingGuess,
    AwaitingFeedback,
    Solved,
}

/// Result of a committed round
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundOutcome {
    Continue,
    Solved(Solution),
}

/// Final answers of a solved session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// One answer per board, in board order
    pub answers: Vec<Word>,
    /// Rounds played plus any extra guesses
    pub steps: usize,
    /// Words the driver must still enter on boards finished by elimination
    pub extra_guesses: Vec<Word>,
}

impl Solution {
    /// Answer of the first board
    #[must_use]
    pub fn answer(&self) -> Option<Word> {
        self.answers.first().copied()
    }
}

/// A committed round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    pub guess: Word,
    /// Feedback per board, in board order
    pub signatures: Vec<Signature>,
}

#[derive(Debug, Clone)]
struct Board {
    candidates: CandidateSet,
    answer: Option<Word>,
}

#[derive(Debug, Clone)]
struct Pending {
    guess: Word,
    /// Boards other than the guessed one, with the answer elimination assigns them
    forced: Vec<(usize, Word)>,
}

#[derive(Debug, Clone)]
enum State {
    AwaitingGuess,
    AwaitingFeedback(Pending),
    Solved,
}

/// One puzzle, solved round by round
///
/// # Examples
/// ```
/// use wordle_engine::core::{Signature, Word};
/// use wordle_engine::session::{RoundOutcome, Session};
/// use wordle_engine::table::SignatureTable;
///
/// let words: Vec<Word> = ["crane", "slate", "trace", "crate"]
///     .iter()
///     .map(|w| Word::new(w).unwrap())
///     .collect();
/// let table = SignatureTable::build(&words, &words);
/// let secret = Word::new("crate").unwrap();
///
/// let mut session = Session::standard(&table).unwrap();
/// let outcome = loop {
///     let guess = session.next_guess().unwrap();
///     match session.submit_feedback(Signature::compute(&secret, &guess)).unwrap() {
///         RoundOutcome::Continue => {}
///         RoundOutcome::Solved(solution) => break solution,
///     }
/// };
/// assert_eq!(outcome.answer(), Some(secret));
/// assert_eq!(outcome.steps, 2);
/// ```
#[derive(Debug, Clone)]
pub struct Session<'a> {
    table: &'a SignatureTable,
    policy: GuessPolicy,
    config: SelectorConfig,
    boards: Vec<Board>,
    steps: usize,
    extra_guesses: Vec<Word>,
    history: Vec<Round>,
    last_selection: Option<Selection>,
    state: State,
}

impl<'a> Session<'a> {
    /// Start a session with the default selector configuration
    ///
    /// # Errors
    /// - [`Error::EmptyVocabulary`] if the table has no possible secrets
    /// - [`Error::BoardCountMismatch`] for a multi-board policy with zero boards
    pub fn new(table: &'a SignatureTable, policy: GuessPolicy) -> Result<Self> {
        Self::with_config(table, policy, SelectorConfig::default())
    }

    /// # Errors
    /// Same as [`new`](Self::new).
    pub fn with_config(table: &'a SignatureTable, policy: GuessPolicy, config: SelectorConfig) -> Result<Self> {
        let count = policy.boards();
        if count == 0 {
            return Err(Error::BoardCountMismatch {
                expected: 1,
                actual: 0,
            });
        }
        if table.secrets().is_empty() {
            return Err(Error::EmptyVocabulary);
        }

        let boards = (0..count)
            .map(|_| Board {
                candidates: CandidateSet::from_table(table),
                answer: None,
            })
            .collect();

        Ok(Self {
            table,
            policy,
            config,
            boards,
            steps: 0,
            extra_guesses: Vec::new(),
            history: Vec::new(),
            last_selection: None,
            state: State::AwaitingGuess,
        })
    }

    /// # Errors
    /// Same as [`new`](Self::new).
    pub fn standard(table: &'a SignatureTable) -> Result<Self> {
        Self::new(table, GuessPolicy::Standard)
    }

    /// # Errors
    /// Same as [`new`](Self::new).
    pub fn hard(table: &'a SignatureTable) -> Result<Self> {
        Self::new(table, GuessPolicy::hard())
    }

    /// # Errors
    /// Same as [`new`](Self::new).
    pub fn multi(table: &'a SignatureTable, boards: usize) -> Result<Self> {
        Self::new(table, GuessPolicy::MultiBoard(boards))
    }

    /// Guess for the current round
    ///
    /// Repeated calls before feedback is submitted return the same word without
    /// advancing the step counter.
    ///
    /// When nothing is left to discriminate, the guess is the answer of the first
    /// unsolved board and every other unsolved board is assigned its smallest
    /// remaining candidate (see [`forced_answers`](Self::forced_answers)).
    ///
    /// # Errors
    /// - [`Error::SessionAlreadyComplete`] once solved
    /// - [`Error::NoAdmissibleGuess`] if hard mode rejects every accepted guess
    /// - lookup errors from the signature table
    pub fn next_guess(&mut self) -> Result<Word> {
        match &self.state {
            State::Solved => return Err(Error::SessionAlreadyComplete),
            State::AwaitingFeedback(pending) => return Ok(pending.guess),
            State::AwaitingGuess => {}
        }

        let open: Vec<usize> = self.open_boards().collect();
        let sets: Vec<&CandidateSet> = open.iter().map(|&i| &self.boards[i].candidates).collect();
        let selection = select_best_guess(self.table, &sets, &self.policy, &self.config)?;

        let forced = if selection.terminal {
            open.iter()
                .skip(1)
                .map(|&i| {
                    self.boards[i]
                        .candidates
                        .first()
                        .map(|word| (i, word))
                        .ok_or(Error::NoRemainingCandidates)
                })
                .collect::<Result<Vec<_>>>()?
        } else {
            Vec::new()
        };

        self.steps += 1;
        debug!(
            "step {}: guessing {} ({:.3} bits){}",
            self.steps,
            selection.word,
            selection.bits,
            if selection.terminal { ", terminal" } else { "" }
        );

        self.last_selection = Some(selection);
        self.state = State::AwaitingFeedback(Pending {
            guess: selection.word,
            forced,
        });
        Ok(selection.word)
    }

    /// Submit feedback for a single-board session
    ///
    /// # Errors
    /// See [`submit_boards`](Self::submit_boards).
    pub fn submit_feedback(&mut self, signature: Signature) -> Result<RoundOutcome> {
        self.submit_boards(&[signature])
    }

    /// Submit one signature per board, in board order
    ///
    /// Signatures for boards already solved are ignored. A board reporting
    /// all-correct is solved by the guess without consulting the table, even
    /// when the guess was never one of its candidates. In a round where elimination assigned
    /// answers, a board whose candidates collapse to its assigned word is solved
    /// by that word and the word is recorded as an extra guess.
    ///
    /// # Errors
    /// - [`Error::SessionAlreadyComplete`] once solved
    /// - [`Error::NoPendingGuess`] before [`next_guess`](Self::next_guess)
    /// - [`Error::BoardCountMismatch`] if the number of signatures is wrong
    /// - [`Error::UnknownSignature`] for a signature the guess cannot produce
    /// - [`Error::NoRemainingCandidates`] for feedback inconsistent with earlier rounds
    ///
    /// On error nothing is committed and the same round can be submitted again.
    pub fn submit_boards(&mut self, signatures: &[Signature]) -> Result<RoundOutcome> {
        let pending = match &self.state {
            State::Solved => return Err(Error::SessionAlreadyComplete),
            State::AwaitingGuess => return Err(Error::NoPendingGuess),
            State::AwaitingFeedback(pending) => pending.clone(),
        };

        if signatures.len() != self.boards.len() {
            return Err(Error::BoardCountMismatch {
                expected: self.boards.len(),
                actual: signatures.len(),
            });
        }

        let mut boards = self.boards.clone();
        let mut extras = Vec::new();

        for (index, (board, &signature)) in boards.iter_mut().zip(signatures).enumerate() {
            if board.answer.is_some() {
                continue;
            }

            if signature.is_all_correct() {
                board.candidates = CandidateSet::new([pending.guess]);
                board.answer = Some(pending.guess);
                continue;
            }

            board.candidates = board.candidates.reduced(&pending.guess, signature, self.table)?;

            if let Some(&(_, forced)) = pending.forced.iter().find(|(i, _)| *i == index)
                && board.candidates.len() == 1
                && board.candidates.contains(&forced)
            {
                board.answer = Some(forced);
                extras.push(forced);
            }
        }

        self.boards = boards;
        self.steps += extras.len();
        self.extra_guesses.extend(extras);
        self.policy.observe(&pending.guess, signatures);
        self.history.push(Round {
            guess: pending.guess,
            signatures: signatures.to_vec(),
        });

        debug!(
            "after {}: {} candidate(s) remain",
            pending.guess,
            self.remaining_candidates()
        );

        let answers: Option<Vec<Word>> = self.boards.iter().map(|board| board.answer).collect();
        if let Some(answers) = answers {
            self.state = State::Solved;
            info!("solved in {} step(s): {answers:?}", self.steps);
            return Ok(RoundOutcome::Solved(Solution {
                answers,
                steps: self.steps,
                extra_guesses: self.extra_guesses.clone(),
            }));
        }

        self.state = State::AwaitingGuess;
        Ok(RoundOutcome::Continue)
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        match self.state {
            State::AwaitingGuess => Phase::AwaitingGuess,
            State::AwaitingFeedback(_) => Phase::AwaitingFeedback,
            State::Solved => Phase::Solved,
        }
    }

    #[must_use]
    pub const fn is_solved(&self) -> bool {
        matches!(self.state, State::Solved)
    }

    /// Guesses issued so far, counting extra guesses from elimination
    #[must_use]
    pub const fn steps(&self) -> usize {
        self.steps
    }

    #[must_use]
    pub fn board_count(&self) -> usize {
        self.boards.len()
    }

    /// Candidate set of `board`, or `None` if out of range
    #[must_use]
    pub fn candidates(&self, board: usize) -> Option<&CandidateSet> {
        self.boards.get(board).map(|board| &board.candidates)
    }

    /// Answer of `board` once it is solved
    #[must_use]
    pub fn answer(&self, board: usize) -> Option<Word> {
        self.boards.get(board).and_then(|board| board.answer)
    }

    /// Total candidates across unsolved boards
    #[must_use]
    pub fn remaining_candidates(&self) -> usize {
        self.open_boards().map(|i| self.boards[i].candidates.len()).sum()
    }

    /// Guess awaiting feedback, if any
    #[must_use]
    pub fn pending_guess(&self) -> Option<Word> {
        match &self.state {
            State::AwaitingFeedback(pending) => Some(pending.guess),
            _ => None,
        }
    }

    /// Answers elimination assigned to other boards in the pending round
    #[must_use]
    pub fn forced_answers(&self) -> &[(usize, Word)] {
        match &self.state {
            State::AwaitingFeedback(pending) => &pending.forced,
            _ => &[],
        }
    }

    #[must_use]
    pub fn extra_guesses(&self) -> &[Word] {
        &self.extra_guesses
    }

    #[must_use]
    pub fn history(&self) -> &[Round] {
        &self.history
    }

    /// Scoring of the most recently issued guess
    #[must_use]
    pub const fn last_selection(&self) -> Option<&Selection> {
        self.last_selection.as_ref()
    }

    #[must_use]
    pub const fn policy(&self) -> &GuessPolicy {
        &self.policy
    }

    #[must_use]
    pub const fn table(&self) -> &'a SignatureTable {
        self.table
    }

    fn open_boards(&self) -> impl Iterator<Item = usize> + '_ {
        self.boards
            .iter()
            .enumerate()
            .filter(|(_, board)| board.answer.is_none())
            .map(|(i, _)| i)
    }
}
