//! Vocabulary source
//!
//! Possible secrets and accepted guesses, loaded from word-list files.

pub mod loader;

use crate::core::Word;
use crate::error::{Error, Result};
use crate::table::SignatureTable;
use crate::table::cache::{CacheError, TableCache, load_or_build_with_progress};
use indicatif::ProgressBar;
use log::warn;
use rustc_hash::FxHashSet;

pub use loader::{load_from_file, words_from_slice};

/// The two word lists a signature table is built from
///
/// Both lists are sorted and deduplicated. Every possible secret is also an
/// accepted guess, so a remaining candidate can always be played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    secrets: Vec<Word>,
    guesses: Vec<Word>,
}

impl Vocabulary {
    /// Combine a secrets list with an optional accepted-guess list
    ///
    /// Without `guesses`, the secrets double as the accepted list.
    ///
    /// # Errors
    /// Returns [`Error::EmptyVocabulary`] if `secrets` is empty.
    ///
    /// # Examples
    /// ```
    /// use wordle_engine::wordlists::{Vocabulary, words_from_slice};
    ///
    /// let secrets = words_from_slice(&["slate", "crane"]);
    /// let guesses = words_from_slice(&["audio", "crane"]);
    /// let vocabulary = Vocabulary::new(secrets, Some(guesses)).unwrap();
    ///
    /// // SLATE was missing from the accepted list and has been added
    /// assert_eq!(vocabulary.guesses().len(), 3);
    /// ```
    pub fn new(secrets: Vec<Word>, guesses: Option<Vec<Word>>) -> Result<Self> {
        let mut secrets = secrets;
        secrets.sort_unstable();
        secrets.dedup();

        if secrets.is_empty() {
            return Err(Error::EmptyVocabulary);
        }

        let mut guesses = match guesses {
            Some(guesses) => {
                let accepted: FxHashSet<Word> = guesses.iter().copied().collect();
                let missing: Vec<Word> = secrets.iter().filter(|s| !accepted.contains(s)).copied().collect();
                if let Some(first) = missing.first() {
                    warn!(
                        "{} possible secret(s) missing from the accepted guesses were added (first: {first})",
                        missing.len()
                    );
                }
                guesses.into_iter().chain(missing).collect()
            }
            None => secrets.clone(),
        };
        guesses.sort_unstable();
        guesses.dedup();

        Ok(Self { secrets, guesses })
    }

    #[must_use]
    pub fn secrets(&self) -> &[Word] {
        &self.secrets
    }

    #[must_use]
    pub fn guesses(&self) -> &[Word] {
        &self.guesses
    }

    /// Build the signature table without caching
    #[must_use]
    pub fn build_table(&self) -> SignatureTable {
        SignatureTable::build(&self.secrets, &self.guesses)
    }

    /// Fetch the table from `cache`, building and storing it on a miss
    ///
    /// # Errors
    /// See [`load_or_build`](crate::table::cache::load_or_build).
    pub fn load_table(&self, cache: &dyn TableCache, progress: &ProgressBar) -> Result<SignatureTable, CacheError> {
        load_or_build_with_progress(cache, &self.secrets, &self.guesses, progress)
    }
}
