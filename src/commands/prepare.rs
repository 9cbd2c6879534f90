//! Table preparation
//!
//! Loads the signature table through the configured cache, building and
//! persisting it on a miss. Every other command starts here.

use crate::table::SignatureTable;
use crate::table::cache::{CacheError, CacheKey, DirectoryCache, NoCache, TableCache};
use crate::wordlists::Vocabulary;
use indicatif::ProgressBar;
use std::path::PathBuf;

/// Size and cache location of a prepared table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSummary {
    pub secrets: usize,
    pub guesses: usize,
    pub groups: usize,
    pub key: CacheKey,
    /// Cache file, if a directory cache is in use
    pub location: Option<PathBuf>,
}

impl TableSummary {
    #[must_use]
    pub fn new(table: &SignatureTable, cache: Option<&DirectoryCache>) -> Self {
        let key = table.key();
        Self {
            secrets: table.secrets().len(),
            guesses: table.guesses().len(),
            groups: table.group_count(),
            key,
            location: cache.map(|cache| cache.path_for(key)),
        }
    }
}

/// Load or build the table for `vocabulary`
///
/// Without a directory cache the table is always built.
///
/// # Errors
/// Returns `CacheError` if the cache entry is unreadable or cannot be written.
pub fn prepare_table(
    vocabulary: &Vocabulary,
    cache: Option<&DirectoryCache>,
    progress: &ProgressBar,
) -> Result<(SignatureTable, TableSummary), CacheError> {
    let backend: &dyn TableCache = match cache {
        Some(cache) => cache,
        None => &NoCache,
    };

    let table = vocabulary.load_table(backend, progress)?;
    let summary = TableSummary::new(&table, cache);
    Ok((table, summary))
}
