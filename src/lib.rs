//! Wordle Engine
//!
//! An adaptive guessing engine for Wordle-family puzzles: it picks each guess by
//! maximizing expected information over the remaining candidates, using a
//! precomputed guess → signature → secrets table.
//!
//! # Quick Start
//!
//! ```rust
//! use wordle_engine::core::{Signature, Word};
//! use wordle_engine::session::{RoundOutcome, Session};
//! use wordle_engine::wordlists::{Vocabulary, words_from_slice};
//!
//! let vocabulary = Vocabulary::new(words_from_slice(&["crane", "slate", "trace", "crate"]), None).unwrap();
//! let table = vocabulary.build_table();
//! let secret = Word::new("trace").unwrap();
//!
//! let mut session = Session::standard(&table).unwrap();
//! loop {
//!     let guess = session.next_guess().unwrap();
//!     let feedback = Signature::compute(&secret, &guess);
//!     if let RoundOutcome::Solved(solution) = session.submit_feedback(feedback).unwrap() {
//!         assert_eq!(solution.answer(), Some(secret));
//!         break;
//!     }
//! }
//! ```

// Core domain types
pub mod core;

// Engine errors
pub mod error;

// Signature table and its cache
pub mod table;

// Candidate tracking and guess selection
pub mod solver;

// Round protocol
pub mod session;

// Word lists
pub mod wordlists;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

pub use error::{Error, Result};
