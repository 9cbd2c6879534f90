//! Signature table
//!
//! Precomputed lookup: guess → signature → possible secrets producing that
//! signature. Building it is the dominant cost of the whole engine
//! (|guesses| × |secrets| signature computations), which is why it is built once,
//! shared read-only between sessions, and cached through [`cache`].

pub mod cache;

use crate::core::{Signature, Word};
use crate::error::{Error, Result};
use cache::CacheKey;
use indicatif::ProgressBar;
use log::info;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::time::Instant;

/// Secrets grouped by the signature they produce against one guess
///
/// Each group is sorted. For a fixed guess the groups are disjoint and together
/// hold every possible secret exactly once.
pub type Partition = FxHashMap<Signature, Vec<Word>>;

/// Guess → signature → secrets lookup table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureTable {
    secrets: Vec<Word>,
    guesses: Vec<Word>,
    partitions: FxHashMap<Word, Partition>,
}

impl SignatureTable {
    /// Build the table for every accepted guess against every possible secret
    ///
    /// Input order and duplicates do not matter: both vocabularies are sorted
    /// and deduplicated first. Every possible secret is also an accepted guess,
    /// so secrets missing from `guesses` are added to it.
    ///
    /// # Examples
    /// ```
    /// use wordle_engine::core::{Signature, Word};
    /// use wordle_engine::table::SignatureTable;
    ///
    /// let words: Vec<Word> = ["crane", "slate", "trace", "crate"]
    ///     .iter()
    ///     .map(|w| Word::new(w).unwrap())
    ///     .collect();
    /// let table = SignatureTable::build(&words, &words);
    ///
    /// let crane = Word::new("crane").unwrap();
    /// let crate_ = Word::new("crate").unwrap();
    /// let signature = Signature::compute(&crate_, &crane);
    /// assert_eq!(table.candidates_for(&crane, signature).unwrap(), &[crate_]);
    /// ```
    #[must_use]
    pub fn build(secrets: &[Word], guesses: &[Word]) -> Self {
        Self::build_with_progress(secrets, guesses, &ProgressBar::hidden())
    }

    /// Build the table, advancing `progress` once per processed guess
    ///
    /// Guesses are processed in parallel; each worker only reads the shared
    /// vocabularies and produces its own partition.
    #[must_use]
    pub fn build_with_progress(secrets: &[Word], guesses: &[Word], progress: &ProgressBar) -> Self {
        let secrets = normalize(secrets);
        let guesses = accepted_guesses(&secrets, guesses);
        let start = Instant::now();

        progress.set_length(guesses.len() as u64);

        let partitions: FxHashMap<Word, Partition> = guesses
            .par_iter()
            .map(|&guess| {
                let partition = partition_secrets(&guess, &secrets);
                progress.inc(1);
                (guess, partition)
            })
            .collect();

        info!(
            "built signature table: {} guesses × {} secrets in {:.2}s",
            guesses.len(),
            secrets.len(),
            start.elapsed().as_secs_f64()
        );

        Self {
            secrets,
            guesses,
            partitions,
        }
    }

    /// Assemble a table from already-validated parts
    pub(crate) fn from_parts(
        secrets: Vec<Word>,
        guesses: Vec<Word>,
        partitions: FxHashMap<Word, Partition>,
    ) -> Self {
        Self {
            secrets,
            guesses,
            partitions,
        }
    }

    /// All signatures `guess` can produce, with the secrets behind each
    ///
    /// # Errors
    /// Returns [`Error::UnknownGuess`] if `guess` was not in the accepted vocabulary.
    pub fn signatures_for(&self, guess: &Word) -> Result<&Partition> {
        self.partitions
            .get(guess)
            .ok_or(Error::UnknownGuess(*guess))
    }

    /// Secrets that produce exactly `signature` against `guess`
    ///
    /// # Errors
    /// Returns [`Error::UnknownGuess`] for a guess outside the accepted vocabulary
    /// and [`Error::UnknownSignature`] for a signature no possible secret yields.
    pub fn candidates_for(&self, guess: &Word, signature: Signature) -> Result<&[Word]> {
        self.signatures_for(guess)?
            .get(&signature)
            .map(Vec::as_slice)
            .ok_or(Error::UnknownSignature {
                guess: *guess,
                signature,
            })
    }

    /// Possible secrets, sorted
    #[must_use]
    pub fn secrets(&self) -> &[Word] {
        &self.secrets
    }

    /// Accepted guesses, sorted
    #[must_use]
    pub fn guesses(&self) -> &[Word] {
        &self.guesses
    }

    #[must_use]
    pub fn contains_guess(&self, guess: &Word) -> bool {
        self.partitions.contains_key(guess)
    }

    /// Total number of (guess, signature) groups
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.partitions.values().map(FxHashMap::len).sum()
    }

    /// Content-derived key identifying the vocabularies this table was built from
    #[must_use]
    pub fn key(&self) -> CacheKey {
        CacheKey::for_vocabularies(&self.secrets, &self.guesses)
    }

    pub(crate) fn partitions(&self) -> &FxHashMap<Word, Partition> {
        &self.partitions
    }
}

/// Group every secret by the signature it produces against `guess`
fn partition_secrets(guess: &Word, secrets: &[Word]) -> Partition {
    let mut groups = Partition::default();
    for secret in secrets {
        groups
            .entry(Signature::compute(secret, guess))
            .or_default()
            .push(*secret);
    }
    groups
}

/// Sort and deduplicate a vocabulary
pub(crate) fn normalize(words: &[Word]) -> Vec<Word> {
    let mut words = words.to_vec();
    words.sort_unstable();
    words.dedup();
    words
}

/// Accepted guesses with every possible secret folded in, sorted and unique
pub(crate) fn accepted_guesses(secrets: &[Word], guesses: &[Word]) -> Vec<Word> {
    let mut words = guesses.to_vec();
    words.extend_from_slice(secrets);
    normalize(&words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wordlists::loader::words_from_slice;

    fn sample_table() -> SignatureTable {
        let secrets = words_from_slice(&["crane", "slate", "trace", "crate", "irate", "grate"]);
        let guesses = words_from_slice(&["crane", "slate", "trace", "crate", "irate", "grate", "zzzzz"]);
        SignatureTable::build(&secrets, &guesses)
    }

    #[test]
    fn partition_law_holds_for_every_guess() {
        let table = sample_table();
        for guess in table.guesses() {
            let total: usize = table
                .signatures_for(guess)
                .unwrap()
                .values()
                .map(Vec::len)
                .sum();
            assert_eq!(total, table.secrets().len(), "guess {guess}");
        }
    }

    #[test]
    fn partitions_are_disjoint() {
        let table = sample_table();
        for guess in table.guesses() {
            let mut seen: Vec<Word> = table
                .signatures_for(guess)
                .unwrap()
                .values()
                .flatten()
                .copied()
                .collect();
            seen.sort_unstable();
            assert_eq!(seen, table.secrets());
        }
    }

    #[test]
    fn groups_match_computed_signatures() {
        let table = sample_table();
        for guess in table.guesses() {
            for (signature, secrets) in table.signatures_for(guess).unwrap() {
                for secret in secrets {
                    assert_eq!(Signature::compute(secret, guess), *signature);
                }
            }
        }
    }

    #[test]
    fn guess_outside_secrets_is_allowed() {
        let table = sample_table();
        let zzzzz = Word::new("zzzzz").unwrap();
        let groups = table.signatures_for(&zzzzz).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[&Signature::from_wire("11111").unwrap()].len(), 6);
    }

    #[test]
    fn secrets_are_folded_into_guesses() {
        let secrets = words_from_slice(&["crane", "slate"]);
        let guesses = words_from_slice(&["crane", "aaaaa"]);
        let table = SignatureTable::build(&secrets, &guesses);

        let slate = Word::new("slate").unwrap();
        assert!(table.contains_guess(&slate));
        assert_eq!(table.guesses().len(), 3);
        assert_eq!(table.candidates_for(&slate, Signature::ALL_CORRECT).unwrap(), &[slate]);
        assert_eq!(table.key(), CacheKey::for_vocabularies(&secrets, &guesses));
    }

    #[test]
    fn unknown_guess_is_reported() {
        let table = sample_table();
        let unknown = Word::new("audio").unwrap();
        assert_eq!(
            table.signatures_for(&unknown),
            Err(Error::UnknownGuess(unknown))
        );
    }

    #[test]
    fn unknown_signature_is_reported() {
        let table = sample_table();
        let crane = Word::new("crane").unwrap();
        // No sample secret is an anagram of CRANE with every letter displaced
        let impossible = Signature::from_wire("22222").unwrap();
        assert!(matches!(
            table.candidates_for(&crane, impossible),
            Err(Error::UnknownSignature { .. })
        ));
    }

    #[test]
    fn build_ignores_order_and_duplicates() {
        let forward = words_from_slice(&["crane", "slate", "trace", "crate"]);
        let mut shuffled = forward.clone();
        shuffled.reverse();
        shuffled.push(forward[0]);

        let a = SignatureTable::build(&forward, &forward);
        let b = SignatureTable::build(&shuffled, &shuffled);

        assert_eq!(a, b);
        assert_eq!(a.key(), b.key());
    }

    #[test]
    fn group_count_counts_signature_groups() {
        let words = words_from_slice(&["crane", "slate"]);
        let table = SignatureTable::build(&words, &words);
        // Each guess splits {crane, slate} into two distinct signatures
        assert_eq!(table.group_count(), 4);
    }
}
