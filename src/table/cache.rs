//! Signature table persistence
//!
//! The table is cached under a key derived from the two vocabularies it was
//! built from, so a cache entry can never be served for different word lists.

use super::{Partition, SignatureTable, accepted_guesses, normalize};
use crate::core::{Signature, Word};
use crate::error::Error;
use indicatif::ProgressBar;
use log::{debug, info};
use rustc_hash::{FxHashMap, FxHashSet, FxHasher};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::{self, File};
use std::hash::{Hash, Hasher};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use thiserror::Error;

/// Bumped whenever the snapshot layout changes
const FORMAT_VERSION: u32 = 1;

/// Content-derived identifier for a (secrets, guesses) vocabulary pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(u64);

impl CacheKey {
    /// Digest both vocabularies, independent of input order and duplicates
    ///
    /// Secrets count as accepted guesses whether or not `guesses` lists them.
    #[must_use]
    pub fn for_vocabularies(secrets: &[Word], guesses: &[Word]) -> Self {
        let mut hasher = FxHasher::default();
        let secrets = normalize(secrets);
        let guesses = accepted_guesses(&secrets, guesses);
        for list in [secrets, guesses] {
            list.len().hash(&mut hasher);
            for word in &list {
                word.letters().hash(&mut hasher);
            }
        }
        Self(hasher.finish())
    }

    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Errors from loading or storing a cached table
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cache serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("corrupt cache entry: {0}")]
    Corrupt(String),

    #[error(transparent)]
    Engine(#[from] Error),
}

/// Storage backend for built signature tables
pub trait TableCache {
    /// Return the table stored under `key`, if any
    ///
    /// # Errors
    /// Returns `CacheError` if an entry exists but cannot be read back.
    fn load(&self, key: CacheKey) -> Result<Option<SignatureTable>, CacheError>;

    /// Store `table` under `key`
    ///
    /// # Errors
    /// Returns `CacheError` if the backend fails to persist the table.
    fn store(&self, key: CacheKey, table: &SignatureTable) -> Result<(), CacheError>;
}

/// Cache that never holds anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCache;

impl TableCache for NoCache {
    fn load(&self, _key: CacheKey) -> Result<Option<SignatureTable>, CacheError> {
        Ok(None)
    }

    fn store(&self, _key: CacheKey, _table: &SignatureTable) -> Result<(), CacheError> {
        Ok(())
    }
}

/// JSON files in a directory, one per key
#[derive(Debug, Clone)]
pub struct DirectoryCache {
    dir: PathBuf,
}

impl DirectoryCache {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `<user cache dir>/wordle_engine`, if the platform has one
    #[must_use]
    pub fn default_location() -> Option<Self> {
        dirs::cache_dir().map(|dir| Self::new(dir.join("wordle_engine")))
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File that holds the table for `key`
    #[must_use]
    pub fn path_for(&self, key: CacheKey) -> PathBuf {
        self.dir.join(format!("signature-table-{key}.json"))
    }
}

impl TableCache for DirectoryCache {
    fn load(&self, key: CacheKey) -> Result<Option<SignatureTable>, CacheError> {
        let path = self.path_for(key);
        if !path.is_file() {
            debug!("no cached table at {}", path.display());
            return Ok(None);
        }

        let snapshot: TableSnapshot = serde_json::from_reader(BufReader::new(File::open(&path)?))?;
        let table = snapshot.into_table()?;

        if table.key() != key {
            return Err(CacheError::Corrupt(format!(
                "{} holds vocabularies with key {}",
                path.display(),
                table.key()
            )));
        }

        info!("loaded signature table from {}", path.display());
        Ok(Some(table))
    }

    fn store(&self, key: CacheKey, table: &SignatureTable) -> Result<(), CacheError> {
        fs::create_dir_all(&self.dir)?;

        let path = self.path_for(key);
        let partial = path.with_extension("json.partial");

        let mut writer = BufWriter::new(File::create(&partial)?);
        serde_json::to_writer(&mut writer, &TableSnapshot::from_table(table))?;
        writer.flush()?;
        drop(writer);
        fs::rename(&partial, &path)?;

        info!("stored signature table at {}", path.display());
        Ok(())
    }
}

/// In-process cache shared by reference
#[derive(Debug, Default)]
pub struct MemoryCache {
    tables: Mutex<FxHashMap<CacheKey, SignatureTable>>,
}

impl MemoryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored tables
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TableCache for MemoryCache {
    fn load(&self, key: CacheKey) -> Result<Option<SignatureTable>, CacheError> {
        Ok(self
            .tables
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .cloned())
    }

    fn store(&self, key: CacheKey, table: &SignatureTable) -> Result<(), CacheError> {
        self.tables
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, table.clone());
        Ok(())
    }
}

/// Return the cached table for these vocabularies, building and storing it on a miss
///
/// # Errors
/// Returns `CacheError` if the cache holds an unreadable entry or fails to store
/// the freshly built table.
pub fn load_or_build(
    cache: &dyn TableCache,
    secrets: &[Word],
    guesses: &[Word],
) -> Result<SignatureTable, CacheError> {
    load_or_build_with_progress(cache, secrets, guesses, &ProgressBar::hidden())
}

/// [`load_or_build`] reporting build progress on `progress`
///
/// # Errors
/// See [`load_or_build`].
pub fn load_or_build_with_progress(
    cache: &dyn TableCache,
    secrets: &[Word],
    guesses: &[Word],
    progress: &ProgressBar,
) -> Result<SignatureTable, CacheError> {
    let key = CacheKey::for_vocabularies(secrets, guesses);

    if let Some(table) = cache.load(key)? {
        debug!("signature table cache hit for key {key}");
        return Ok(table);
    }

    info!("signature table cache miss for key {key}, building");
    let table = SignatureTable::build_with_progress(secrets, guesses, progress);
    cache.store(key, &table)?;
    Ok(table)
}

/// Serialized form of a table
///
/// Guesses appear in sorted order, groups sorted by wire signature, and secrets
/// as indices into the sorted secret list, so the same vocabularies always
/// produce the same bytes.
#[derive(Debug, Serialize, Deserialize)]
struct TableSnapshot {
    format: u32,
    secrets: Vec<String>,
    guesses: Vec<String>,
    partitions: Vec<GuessEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GuessEntry {
    guess: String,
    groups: Vec<SignatureGroup>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SignatureGroup {
    signature: String,
    secrets: Vec<u32>,
}

impl TableSnapshot {
    fn from_table(table: &SignatureTable) -> Self {
        let index: FxHashMap<Word, u32> = table
            .secrets()
            .iter()
            .enumerate()
            .map(|(i, word)| (*word, i as u32))
            .collect();

        let partitions = table
            .guesses()
            .iter()
            .filter_map(|guess| table.partitions().get(guess).map(|p| (guess, p)))
            .map(|(guess, partition)| {
                let mut groups: Vec<SignatureGroup> = partition
                    .iter()
                    .map(|(signature, secrets)| SignatureGroup {
                        signature: signature.to_wire(),
                        secrets: secrets.iter().filter_map(|w| index.get(w).copied()).collect(),
                    })
                    .collect();
                groups.sort_by(|a, b| a.signature.cmp(&b.signature));

                GuessEntry {
                    guess: guess.to_string(),
                    groups,
                }
            })
            .collect();

        Self {
            format: FORMAT_VERSION,
            secrets: table.secrets().iter().map(ToString::to_string).collect(),
            guesses: table.guesses().iter().map(ToString::to_string).collect(),
            partitions,
        }
    }

    fn into_table(self) -> Result<SignatureTable, CacheError> {
        if self.format != FORMAT_VERSION {
            return Err(CacheError::Corrupt(format!(
                "format version {} (expected {FORMAT_VERSION})",
                self.format
            )));
        }

        let secrets = parse_vocabulary(&self.secrets, "secrets")?;
        let guesses = parse_vocabulary(&self.guesses, "guesses")?;

        if let Some(missing) = secrets.iter().find(|s| guesses.binary_search(s).is_err()) {
            return Err(CacheError::Corrupt(format!("secret '{missing}' is not an accepted guess")));
        }

        if self.partitions.len() != guesses.len() {
            return Err(CacheError::Corrupt(format!(
                "{} partitions for {} guesses",
                self.partitions.len(),
                guesses.len()
            )));
        }

        let mut partitions = FxHashMap::default();
        for entry in self.partitions {
            let guess = Word::new(&entry.guess).map_err(Error::from)?;
            if guesses.binary_search(&guess).is_err() {
                return Err(CacheError::Corrupt(format!("partition for unlisted guess '{guess}'")));
            }

            let mut partition = Partition::default();
            let mut covered: FxHashSet<u32> = FxHashSet::default();
            for group in entry.groups {
                let signature = Signature::from_wire(&group.signature)?;
                let members = group
                    .secrets
                    .iter()
                    .map(|&i| {
                        let secret = secrets.get(i as usize).copied().ok_or_else(|| {
                            CacheError::Corrupt(format!("secret index {i} out of range"))
                        })?;
                        if !covered.insert(i) {
                            return Err(CacheError::Corrupt(format!(
                                "secret '{secret}' appears twice for guess '{guess}'"
                            )));
                        }
                        Ok(secret)
                    })
                    .collect::<Result<Vec<_>, _>>()?;

                if partition.insert(signature, members).is_some() {
                    return Err(CacheError::Corrupt(format!(
                        "signature {signature} listed twice for guess '{guess}'"
                    )));
                }
            }

            if covered.len() != secrets.len() {
                return Err(CacheError::Corrupt(format!(
                    "partition for '{guess}' covers {} of {} secrets",
                    covered.len(),
                    secrets.len()
                )));
            }
            if partitions.insert(guess, partition).is_some() {
                return Err(CacheError::Corrupt(format!("guess '{guess}' has two partitions")));
            }
        }

        Ok(SignatureTable::from_parts(secrets, guesses, partitions))
    }
}

/// Parse a stored vocabulary, which must already be sorted and duplicate-free
fn parse_vocabulary(words: &[String], label: &str) -> Result<Vec<Word>, CacheError> {
    let parsed = words
        .iter()
        .map(|w| Word::new(w))
        .collect::<Result<Vec<_>, _>>()
        .map_err(Error::from)?;

    if parsed != normalize(&parsed) {
        return Err(CacheError::Corrupt(format!("{label} are not sorted and unique")));
    }
    Ok(parsed)
}
