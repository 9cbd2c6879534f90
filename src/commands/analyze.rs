//! Word analysis command
//!
//! Scores a single guess against the full secret vocabulary.

use crate::core::Word;
use crate::error::Result;
use crate::solver::entropy::{GuessMetrics, calculate_metrics};
use crate::solver::{CandidateSet, GuessPolicy, Selection, SelectorConfig, rank_guesses};
use crate::table::SignatureTable;

/// Result of analyzing a word
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub word: Word,
    pub metrics: GuessMetrics,
    /// `2^bits`: the factor by which the guess is expected to shrink the candidates
    pub expected_reduction: f64,
    pub total_candidates: usize,
    pub is_secret: bool,
    /// 1-based position among all opening guesses
    pub rank: usize,
    /// Best opening guesses, best first
    pub best: Vec<Selection>,
}

/// Analyze `word` as an opening guess
///
/// # Errors
///
/// - [`Error::InvalidWord`](crate::Error::InvalidWord) if `word` is not a valid word
/// - [`Error::UnknownGuess`](crate::Error::UnknownGuess) if it is not an accepted guess
pub fn analyze_word(table: &SignatureTable, word: &str, top: usize) -> Result<AnalysisResult> {
    let word: Word = word.parse()?;
    let candidates = CandidateSet::from_table(table);
    let metrics = calculate_metrics(table, &word, &candidates)?;

    let ranking = rank_guesses(
        table,
        &[&candidates],
        &GuessPolicy::Standard,
        &SelectorConfig::default(),
    )?;
    let rank = ranking
        .iter()
        .position(|selection| selection.word == word)
        .map_or(ranking.len(), |index| index + 1);

    Ok(AnalysisResult {
        word,
        metrics,
        expected_reduction: metrics.entropy.exp2(),
        total_candidates: candidates.len(),
        is_secret: candidates.contains(&word),
        rank,
        best: ranking.into_iter().take(top).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::wordlists::loader::words_from_slice;

    fn table() -> SignatureTable {
        let secrets = words_from_slice(&["crane", "slate", "trace", "crate"]);
        let guesses = words_from_slice(&["crane", "slate", "trace", "crate", "zzzzz"]);
        SignatureTable::build(&secrets, &guesses)
    }

    #[test]
    fn analyze_valid_word() {
        let result = analyze_word(&table(), "crane", 3).unwrap();

        assert_eq!(result.word.text(), "crane");
        assert!((result.metrics.entropy - 2.0).abs() < 1e-9);
        assert!((result.expected_reduction - 4.0).abs() < 1e-9);
        assert_eq!(result.total_candidates, 4);
        assert!(result.is_secret);
        assert_eq!(result.rank, 1);
        assert_eq!(result.best.len(), 3);
    }

    #[test]
    fn analyze_useless_guess_ranks_last() {
        let result = analyze_word(&table(), "ZZZZZ", 10).unwrap();

        assert!(result.metrics.entropy.abs() < 1e-9);
        assert_eq!(result.metrics.max_partition, 4);
        assert!(!result.is_secret);
        assert_eq!(result.rank, 5);
        assert_eq!(result.best.len(), 5);
    }

    #[test]
    fn analyze_unknown_word() {
        let result = analyze_word(&table(), "audio", 3);
        assert!(matches!(result, Err(Error::UnknownGuess(_))));
    }

    #[test]
    fn analyze_invalid_word() {
        let result = analyze_word(&table(), "toolong", 3);
        assert!(matches!(result, Err(Error::InvalidWord(_))));
    }
}
