//! Entropy-maximizing guess selection
//!
//! Scans the whole accepted vocabulary (a guess outside the candidate space may
//! still split it better), scores each admissible guess by the summed expected
//! bits over the boards still in play, and takes the argmax.

use super::candidates::CandidateSet;
use super::entropy::expected_bits;
use super::policy::GuessPolicy;
use crate::core::Word;
use crate::error::{Error, Result};
use crate::table::SignatureTable;
use log::debug;
use rayon::prelude::*;
use std::cmp::Ordering;

/// Tunables for [`select_best_guess`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectorConfig {
    /// Among near-equal scores, favour a guess that could itself be the answer
    pub prefer_candidates: bool,
    /// Added to the score (never to the bits) of a guess that is still a candidate
    pub candidate_bonus: f64,
    /// Scores within this distance of the maximum count as tied
    pub tie_epsilon: f64,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            prefer_candidates: true,
            candidate_bonus: 0.0,
            tie_epsilon: 1e-9,
        }
    }
}

/// A scored guess
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection {
    pub word: Word,
    /// Expected information gain summed over the boards in play
    pub bits: f64,
    /// `bits` plus the candidate bonus, if any
    pub score: f64,
    /// Still a candidate on at least one board in play
    pub is_candidate: bool,
    /// Nothing left to discriminate; `word` is announced as the answer
    pub terminal: bool,
}

/// Pick the next guess for the given boards
///
/// `boards` holds the candidate sets of every board not yet solved.
///
/// Tie-break among scores within `tie_epsilon` of the best: a current candidate
/// first (when `prefer_candidates`), then the lexicographically smallest word.
/// When even the best guess yields no information, the smallest candidate of the
/// first board is returned with `terminal` set.
///
/// # Errors
/// - [`Error::NoRemainingCandidates`] if `boards` is empty or the first board is empty
/// - [`Error::NoAdmissibleGuess`] if the policy rejects every accepted guess
///
/// # Examples
/// ```
/// use wordle_engine::core::Word;
/// use wordle_engine::solver::{CandidateSet, GuessPolicy, SelectorConfig, select_best_guess};
/// use wordle_engine::table::SignatureTable;
///
/// let words: Vec<Word> = ["crane", "slate", "trace", "crate"]
///     .iter()
///     .map(|w| Word::new(w).unwrap())
///     .collect();
/// let table = SignatureTable::build(&words, &words);
/// let candidates = CandidateSet::from_table(&table);
///
/// let best = select_best_guess(
///     &table,
///     &[&candidates],
///     &GuessPolicy::Standard,
///     &SelectorConfig::default(),
/// )
/// .unwrap();
/// assert_eq!(best.word.text(), "crane"); // every word splits the four; smallest wins
/// assert!((best.bits - 2.0).abs() < 1e-9);
/// ```
pub fn select_best_guess(
    table: &SignatureTable,
    boards: &[&CandidateSet],
    policy: &GuessPolicy,
    config: &SelectorConfig,
) -> Result<Selection> {
    let primary = boards.first().ok_or(Error::NoRemainingCandidates)?;
    let scored = score_admissible(table, boards, policy, config)?;

    let max_bits = scored.iter().map(|s| s.bits).fold(f64::NEG_INFINITY, f64::max);
    if max_bits <= config.tie_epsilon {
        let word = primary.first().ok_or(Error::NoRemainingCandidates)?;
        debug!("no guess discriminates further; announcing {word}");
        return Ok(Selection {
            word,
            bits: 0.0,
            score: 0.0,
            is_candidate: true,
            terminal: true,
        });
    }

    let max_score = scored.iter().map(|s| s.score).fold(f64::NEG_INFINITY, f64::max);
    let best = scored
        .into_iter()
        .filter(|s| max_score - s.score <= config.tie_epsilon)
        .min_by(|a, b| tie_order(a, b, config))
        .ok_or(Error::NoAdmissibleGuess)?;

    debug!(
        "selected {} ({:.4} bits, candidate: {}) over {} board(s)",
        best.word,
        best.bits,
        best.is_candidate,
        boards.len()
    );

    Ok(best)
}

/// Every admissible guess, best first
///
/// Ordering is score descending, then the same tie-break as
/// [`select_best_guess`]. Never reports a selection as terminal.
///
/// # Errors
/// Same as [`select_best_guess`].
pub fn rank_guesses(
    table: &SignatureTable,
    boards: &[&CandidateSet],
    policy: &GuessPolicy,
    config: &SelectorConfig,
) -> Result<Vec<Selection>> {
    if boards.is_empty() {
        return Err(Error::NoRemainingCandidates);
    }

    let mut scored = score_admissible(table, boards, policy, config)?;
    scored.par_sort_unstable_by(|a, b| b.score.total_cmp(&a.score).then_with(|| tie_order(a, b, config)));
    Ok(scored)
}

fn score_admissible(
    table: &SignatureTable,
    boards: &[&CandidateSet],
    policy: &GuessPolicy,
    config: &SelectorConfig,
) -> Result<Vec<Selection>> {
    let scored = table
        .guesses()
        .par_iter()
        .filter(|guess| policy.admits(guess))
        .map(|guess| score_guess(table, guess, boards, config))
        .collect::<Result<Vec<_>>>()?;

    if scored.is_empty() {
        return Err(Error::NoAdmissibleGuess);
    }
    Ok(scored)
}

fn score_guess(
    table: &SignatureTable,
    guess: &Word,
    boards: &[&CandidateSet],
    config: &SelectorConfig,
) -> Result<Selection> {
    let mut bits = 0.0;
    for board in boards {
        bits += expected_bits(table, guess, board)?;
    }

    let is_candidate = boards.iter().any(|board| board.contains(guess));
    let score = if is_candidate { bits + config.candidate_bonus } else { bits };

    Ok(Selection {
        word: *guess,
        bits,
        score,
        is_candidate,
        terminal: false,
    })
}

/// Candidates before non-candidates (if preferred), then alphabetical
fn tie_order(a: &Selection, b: &Selection, config: &SelectorConfig) -> Ordering {
    let membership = if config.prefer_candidates {
        b.is_candidate.cmp(&a.is_candidate)
    } else {
        Ordering::Equal
    };
    membership.then_with(|| a.word.cmp(&b.word))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Signature;
    use crate::solver::policy::HardModeRule;
    use crate::wordlists::loader::words_from_slice;

    fn word(text: &str) -> Word {
        Word::new(text).unwrap()
    }

    fn fixture() -> SignatureTable {
        let words = words_from_slice(&["crane", "slate", "trace", "crate"]);
        SignatureTable::build(&words, &words)
    }

    fn select(table: &SignatureTable, boards: &[&CandidateSet], policy: &GuessPolicy) -> Result<Selection> {
        select_best_guess(table, boards, policy, &SelectorConfig::default())
    }

    #[test]
    fn picks_smallest_among_perfect_splitters() {
        let table = fixture();
        let candidates = CandidateSet::from_table(&table);

        let best = select(&table, &[&candidates], &GuessPolicy::Standard).unwrap();
        assert_eq!(best.word, word("crane"));
        assert!(best.is_candidate);
        assert!(!best.terminal);
    }

    #[test]
    fn prefers_candidate_on_tie() {
        // CBBBB and CRATE both split {crate, grate} in two; CBBBB sorts first
        let secrets = words_from_slice(&["crate", "grate"]);
        let guesses = words_from_slice(&["cbbbb", "crate", "grate"]);
        let table = SignatureTable::build(&secrets, &guesses);
        let candidates = CandidateSet::from_table(&table);

        let preferred = select(&table, &[&candidates], &GuessPolicy::Standard).unwrap();
        assert_eq!(preferred.word, word("crate"));

        let config = SelectorConfig {
            prefer_candidates: false,
            ..SelectorConfig::default()
        };
        let plain = select_best_guess(&table, &[&candidates], &GuessPolicy::Standard, &config).unwrap();
        assert_eq!(plain.word, word("cbbbb"));
        assert!(!plain.is_candidate);
    }

    #[test]
    fn candidate_bonus_changes_score_not_bits() {
        let table = fixture();
        let candidates = CandidateSet::from_table(&table);
        let config = SelectorConfig {
            candidate_bonus: 0.5,
            ..SelectorConfig::default()
        };

        let best = select_best_guess(&table, &[&candidates], &GuessPolicy::Standard, &config).unwrap();
        assert!((best.bits - 2.0).abs() < 1e-9);
        assert!((best.score - 2.5).abs() < 1e-9);
    }

    #[test]
    fn single_candidate_is_terminal() {
        let table = fixture();
        let candidates: CandidateSet = [word("slate")].into_iter().collect();

        let best = select(&table, &[&candidates], &GuessPolicy::Standard).unwrap();
        assert_eq!(best.word, word("slate"));
        assert!(best.terminal);
        assert!(best.bits.abs() < f64::EPSILON);
    }

    #[test]
    fn hard_mode_excludes_inconsistent_guesses() {
        let table = fixture();
        let candidates = CandidateSet::from_table(&table);
        // SLATE against CRATE pins A, T, E to positions 2..5
        let slate = word("slate");
        let rule = HardModeRule::from_round(&slate, Signature::compute(&word("crate"), &slate));
        let policy = GuessPolicy::HardMode(Some(rule));

        let best = select(&table, &[&candidates], &policy).unwrap();
        assert_eq!(best.word, word("crate"));

        let ranked = rank_guesses(&table, &[&candidates], &policy, &SelectorConfig::default()).unwrap();
        let words: Vec<Word> = ranked.iter().map(|s| s.word).collect();
        assert_eq!(words, vec![word("crate"), word("slate")]);
    }

    #[test]
    fn hard_mode_with_nothing_admissible() {
        let table = fixture();
        let candidates = CandidateSet::from_table(&table);
        let zebra = word("zebra");
        let policy = GuessPolicy::HardMode(Some(HardModeRule::from_round(&zebra, Signature::ALL_CORRECT)));

        assert_eq!(
            select(&table, &[&candidates], &policy),
            Err(Error::NoAdmissibleGuess)
        );
    }

    #[test]
    fn multi_board_sums_bits() {
        let table = fixture();
        let left: CandidateSet = words_from_slice(&["crane", "slate"]).into_iter().collect();
        let right: CandidateSet = words_from_slice(&["trace", "crate"]).into_iter().collect();

        let best = select(&table, &[&left, &right], &GuessPolicy::MultiBoard(2)).unwrap();
        assert!((best.bits - 2.0).abs() < 1e-9);
        assert!(!best.terminal);
    }

    #[test]
    fn multi_board_singletons_are_terminal() {
        let words = words_from_slice(&["abide", "adult", "crane"]);
        let table = SignatureTable::build(&words, &words);
        let left: CandidateSet = [word("abide")].into_iter().collect();
        let right: CandidateSet = [word("adult")].into_iter().collect();

        let best = select(&table, &[&left, &right], &GuessPolicy::MultiBoard(2)).unwrap();
        assert!(best.terminal);
        assert_eq!(best.word, word("abide"));
    }

    #[test]
    fn no_boards_is_an_error() {
        let table = fixture();
        assert_eq!(
            select(&table, &[], &GuessPolicy::Standard),
            Err(Error::NoRemainingCandidates)
        );
    }

    #[test]
    fn ranking_is_sorted_by_score() {
        let table = fixture();
        let candidates: CandidateSet = words_from_slice(&["trace", "crate"]).into_iter().collect();

        let ranked = rank_guesses(&table, &[&candidates], &GuessPolicy::Standard, &SelectorConfig::default()).unwrap();
        assert_eq!(ranked.len(), 4);
        assert!(ranked.windows(2).all(|pair| pair[0].score >= pair[1].score));
    }
}
