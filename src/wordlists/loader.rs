//! Word list loading utilities
//!
//! One word per line; blank lines and entries that are not valid words are skipped.

use crate::core::Word;
use log::debug;
use std::fs;
use std::io;
use std::path::Path;

/// Load words from a file
///
/// Returns a vector of valid Word instances, skipping any invalid entries.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read or opened.
///
/// # Examples
/// ```no_run
/// use wordle_engine::wordlists::loader::load_from_file;
///
/// let words = load_from_file("answers.txt").unwrap();
/// println!("Loaded {} words", words.len());
/// ```
pub fn load_from_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<Word>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let words = parse_lines(&content);

    debug!("loaded {} words from {}", words.len(), path.display());
    Ok(words)
}

/// Parse newline-separated words, skipping blanks and invalid entries
#[must_use]
pub fn parse_lines(content: &str) -> Vec<Word> {
    content
        .lines()
        .filter_map(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                None
            } else {
                Word::new(trimmed).ok()
            }
        })
        .collect()
}

/// Convert a string slice to a Word vector
///
/// # Examples
/// ```
/// use wordle_engine::wordlists::loader::words_from_slice;
///
/// let words = words_from_slice(&["crane", "slate", "toolong"]);
/// assert_eq!(words.len(), 2);
/// ```
#[must_use]
pub fn words_from_slice(slice: &[&str]) -> Vec<Word> {
    slice.iter().filter_map(|&s| Word::new(s).ok()).collect()
}
