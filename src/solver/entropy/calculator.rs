//! Shannon entropy of the signature distribution a guess induces
//!
//! Given a guess and a candidate set, computes the expected information gain
//! from the precomputed signature table.

use crate::core::Word;
use crate::error::Result;
use crate::solver::CandidateSet;
use crate::table::SignatureTable;

/// Comprehensive metrics for evaluating a guess
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuessMetrics {
    /// Shannon entropy (expected information gain in bits)
    pub entropy: f64,
    /// Expected number of remaining candidates after this guess
    pub expected_remaining: f64,
    /// Maximum partition size (worst-case remaining candidates)
    pub max_partition: usize,
}

/// Expected bits of information from guessing `guess` against `candidates`
///
/// # Formula
/// bits = Σ p(s) × −log₂ p(s), over signatures s with p(s) > 0,
/// where p(s) = |C ∩ table.candidates_for(guess, s)| / |C|.
///
/// An empty candidate set yields 0.0.
///
/// # Errors
/// Returns [`Error::UnknownGuess`](crate::Error::UnknownGuess) if `guess` is not in the table.
///
/// # Examples
/// ```
/// use wordle_engine::core::Word;
/// use wordle_engine::solver::CandidateSet;
/// use wordle_engine::solver::entropy::expected_bits;
/// use wordle_engine::table::SignatureTable;
///
/// let words: Vec<Word> = ["slate", "irate"].iter().map(|w| Word::new(w).unwrap()).collect();
/// let table = SignatureTable::build(&words, &words);
/// let candidates = CandidateSet::from_table(&table);
///
/// let bits = expected_bits(&table, &words[0], &candidates).unwrap();
/// assert!((bits - 1.0).abs() < 1e-9); // a perfect binary split
/// ```
pub fn expected_bits(table: &SignatureTable, guess: &Word, candidates: &CandidateSet) -> Result<f64> {
    let partition = table.signatures_for(guess)?;

    if candidates.is_empty() {
        return Ok(0.0);
    }

    Ok(partition
        .values()
        .map(|group| candidates.fraction_matching(group))
        .filter(|&p| p > 0.0)
        .map(|p| -p * p.log2())
        .sum())
}

/// Calculate Shannon entropy from a distribution of outcome counts
///
/// H = −Σ p × log₂ p
///
/// # Properties
/// - Returns 0.0 for a certain outcome (one count holds everything)
/// - Maximized for a uniform distribution
/// - Always in range [0, log₂(n)] for n non-zero counts
#[must_use]
pub fn shannon_entropy(counts: &[usize]) -> f64 {
    let total = counts.iter().sum::<usize>() as f64;

    if total == 0.0 {
        return 0.0;
    }

    counts
        .iter()
        .filter(|&&count| count > 0)
        .map(|&count| {
            let p = count as f64 / total;
            -p * p.log2()
        })
        .sum()
}

/// Calculate entropy, expected remaining candidates and worst case for a guess
///
/// # Errors
/// Returns [`Error::UnknownGuess`](crate::Error::UnknownGuess) if `guess` is not in the table.
pub fn calculate_metrics(
    table: &SignatureTable,
    guess: &Word,
    candidates: &CandidateSet,
) -> Result<GuessMetrics> {
    let counts: Vec<usize> = table
        .signatures_for(guess)?
        .values()
        .map(|group| candidates.count_matching(group))
        .filter(|&count| count > 0)
        .collect();

    let total = candidates.len() as f64;
    let expected_remaining = if total > 0.0 {
        counts.iter().map(|&count| (count * count) as f64).sum::<f64>() / total
    } else {
        0.0
    };

    Ok(GuessMetrics {
        entropy: shannon_entropy(&counts),
        expected_remaining,
        max_partition: counts.iter().copied().max().unwrap_or(0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Signature;
    use crate::wordlists::loader::words_from_slice;
    use rustc_hash::FxHashMap;

    fn word(text: &str) -> Word {
        Word::new(text).unwrap()
    }

    #[test]
    fn shannon_entropy_uniform_distribution() {
        // 4 outcomes, each equally likely = log2(4) = 2 bits
        assert!((shannon_entropy(&[1, 1, 1, 1]) - 2.0).abs() < 0.001);
    }

    #[test]
    fn shannon_entropy_certain_outcome() {
        assert!(shannon_entropy(&[10]).abs() < 0.001);
    }

    #[test]
    fn shannon_entropy_skewed_distribution() {
        assert!(shannon_entropy(&[25, 25, 25, 25]) > shannon_entropy(&[97, 1, 1, 1]));
    }

    #[test]
    fn shannon_entropy_bounds() {
        let entropy = shannon_entropy(&[10, 20, 30]);
        assert!(entropy >= 0.0);
        assert!(entropy <= 3f64.log2());
    }

    #[test]
    fn shannon_entropy_empty() {
        assert!(shannon_entropy(&[]).abs() < f64::EPSILON);
        assert!(shannon_entropy(&[0, 0]).abs() < f64::EPSILON);
    }

    #[test]
    fn expected_bits_matches_direct_grouping() {
        let secrets = words_from_slice(&["slate", "irate", "trace", "raise", "crate", "grate"]);
        let guesses = words_from_slice(&["crane", "slate", "audio", "zzzzz"]);
        let table = SignatureTable::build(&secrets, &guesses);
        let candidates: CandidateSet = words_from_slice(&["slate", "irate", "trace", "raise"])
            .into_iter()
            .collect();

        for guess in &guesses {
            let mut groups: FxHashMap<Signature, usize> = FxHashMap::default();
            for secret in candidates.iter() {
                *groups.entry(Signature::compute(secret, guess)).or_insert(0) += 1;
            }
            let counts: Vec<usize> = groups.into_values().collect();

            let bits = expected_bits(&table, guess, &candidates).unwrap();
            assert!((bits - shannon_entropy(&counts)).abs() < 1e-9, "guess {guess}");
        }
    }

    #[test]
    fn expected_bits_all_same_signature_is_zero() {
        let words = words_from_slice(&["aaaaa", "bbbbb", "ccccc", "zzzzz"]);
        let table = SignatureTable::build(&words[..3], &words);
        let candidates = CandidateSet::from_table(&table);

        // ZZZZZ is all-absent against every candidate
        let bits = expected_bits(&table, &word("zzzzz"), &candidates).unwrap();
        assert!(bits.abs() < 1e-9);
    }

    #[test]
    fn expected_bits_single_candidate_is_zero() {
        let words = words_from_slice(&["crane", "slate", "trace"]);
        let table = SignatureTable::build(&words, &words);
        let candidates: CandidateSet = [word("slate")].into_iter().collect();

        for guess in &words {
            assert!(expected_bits(&table, guess, &candidates).unwrap().abs() < 1e-9);
        }
    }

    #[test]
    fn expected_bits_unknown_guess() {
        let words = words_from_slice(&["crane", "slate"]);
        let table = SignatureTable::build(&words, &words);
        let candidates = CandidateSet::from_table(&table);
        assert!(expected_bits(&table, &word("audio"), &candidates).is_err());
    }

    #[test]
    fn metrics_for_perfect_split() {
        let words = words_from_slice(&["crane", "slate", "trace", "crate"]);
        let table = SignatureTable::build(&words, &words);
        let candidates = CandidateSet::from_table(&table);

        let metrics = calculate_metrics(&table, &word("crane"), &candidates).unwrap();
        assert!((metrics.entropy - 2.0).abs() < 1e-9);
        assert!((metrics.expected_remaining - 1.0).abs() < 1e-9);
        assert_eq!(metrics.max_partition, 1);
    }
}
