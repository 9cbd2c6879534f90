//! Candidate set
//!
//! The words still possible as the secret for one board. It only ever shrinks.

use crate::core::{Signature, Word};
use crate::error::{Error, Result};
use crate::table::SignatureTable;
use rustc_hash::FxHashSet;

/// Live belief set for one board
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CandidateSet {
    words: FxHashSet<Word>,
}

impl CandidateSet {
    #[must_use]
    pub fn new(words: impl IntoIterator<Item = Word>) -> Self {
        Self {
            words: words.into_iter().collect(),
        }
    }

    /// Start from every possible secret the table knows about
    #[must_use]
    pub fn from_table(table: &SignatureTable) -> Self {
        Self::new(table.secrets().iter().copied())
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, word: &Word) -> bool {
        self.words.contains(word)
    }

    /// Iterate in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = &Word> {
        self.words.iter()
    }

    /// Lexicographically smallest remaining word
    #[must_use]
    pub fn first(&self) -> Option<Word> {
        self.words.iter().min().copied()
    }

    /// Remaining words in sorted order
    #[must_use]
    pub fn to_sorted_vec(&self) -> Vec<Word> {
        let mut words: Vec<Word> = self.words.iter().copied().collect();
        words.sort_unstable();
        words
    }

    /// Intersect with the secrets consistent with `signature` for `guess`
    ///
    /// On error the set is left unchanged.
    ///
    /// # Errors
    /// - [`Error::UnknownGuess`] / [`Error::UnknownSignature`] from the table lookup
    /// - [`Error::NoRemainingCandidates`] if nothing survives the intersection
    pub fn reduce(&mut self, guess: &Word, signature: Signature, table: &SignatureTable) -> Result<()> {
        *self = self.reduced(guess, signature, table)?;
        Ok(())
    }

    /// The set [`reduce`](Self::reduce) would produce, without committing it
    ///
    /// # Errors
    /// Same as [`reduce`](Self::reduce).
    pub fn reduced(&self, guess: &Word, signature: Signature, table: &SignatureTable) -> Result<Self> {
        let consistent = table.candidates_for(guess, signature)?;
        let words: FxHashSet<Word> = consistent
            .iter()
            .filter(|word| self.words.contains(word))
            .copied()
            .collect();

        if words.is_empty() {
            return Err(Error::NoRemainingCandidates);
        }

        Ok(Self { words })
    }

    /// Number of candidates that also appear in `subset`
    #[must_use]
    pub fn count_matching(&self, subset: &[Word]) -> usize {
        subset.iter().filter(|word| self.words.contains(word)).count()
    }

    /// `|self ∩ subset| / |self|`
    ///
    /// The set must not be empty.
    #[must_use]
    pub fn fraction_matching(&self, subset: &[Word]) -> f64 {
        debug_assert!(!self.is_empty(), "fraction of an empty candidate set");
        self.count_matching(subset) as f64 / self.len() as f64
    }
}

impl FromIterator<Word> for CandidateSet {
    fn from_iter<I: IntoIterator<Item = Word>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wordlists::loader::words_from_slice;

    fn setup() -> (SignatureTable, CandidateSet) {
        let words = words_from_slice(&["crane", "slate", "trace", "crate", "irate", "grate"]);
        let table = SignatureTable::build(&words, &words);
        let candidates = CandidateSet::from_table(&table);
        (table, candidates)
    }

    fn word(text: &str) -> Word {
        Word::new(text).unwrap()
    }

    #[test]
    fn starts_with_every_secret() {
        let (table, candidates) = setup();
        assert_eq!(candidates.len(), table.secrets().len());
        assert_eq!(candidates.to_sorted_vec(), table.secrets());
    }

    #[test]
    fn reduce_keeps_true_secret_and_never_grows() {
        let (table, mut candidates) = setup();
        let secret = word("grate");

        for guess in ["crane", "slate", "irate"] {
            let guess = word(guess);
            let before = candidates.len();
            candidates
                .reduce(&guess, Signature::compute(&secret, &guess), &table)
                .unwrap();
            assert!(candidates.len() <= before);
            assert!(candidates.contains(&secret));
        }
    }

    #[test]
    fn reduce_with_inconsistent_feedback_fails_without_change() {
        let (table, mut candidates) = setup();
        let crane = word("crane");
        candidates
            .reduce(&crane, Signature::compute(&word("crate"), &crane), &table)
            .unwrap();
        assert_eq!(candidates.to_sorted_vec(), vec![word("crate")]);

        // CRATE is the only candidate, yet IRATE is reported as the answer
        let irate = word("irate");
        let before = candidates.clone();
        let result = candidates.reduce(&irate, Signature::ALL_CORRECT, &table);
        assert_eq!(result, Err(Error::NoRemainingCandidates));
        assert_eq!(candidates, before);
    }

    #[test]
    fn reduce_propagates_unknown_guess() {
        let (table, mut candidates) = setup();
        let audio = word("audio");
        assert_eq!(
            candidates.reduce(&audio, Signature::ALL_CORRECT, &table),
            Err(Error::UnknownGuess(audio))
        );
    }

    #[test]
    fn fraction_matching_counts_intersection() {
        let candidates: CandidateSet = words_from_slice(&["crane", "slate", "trace", "crate"])
            .into_iter()
            .collect();
        let subset = words_from_slice(&["crane", "crate", "grate"]);

        assert_eq!(candidates.count_matching(&subset), 2);
        assert!((candidates.fraction_matching(&subset) - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn first_is_lexicographically_smallest() {
        let candidates: CandidateSet = words_from_slice(&["trace", "crate", "slate"])
            .into_iter()
            .collect();
        assert_eq!(candidates.first(), Some(word("crate")));
        assert_eq!(CandidateSet::default().first(), None);
    }
}
