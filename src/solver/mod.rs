//! Candidate tracking and guess selection
//!
//! [`CandidateSet`] is the belief state for one board, [`entropy`] scores a guess
//! against it, and [`select_best_guess`] picks the argmax under a [`GuessPolicy`].

pub mod candidates;
pub mod entropy;
pub mod policy;
pub mod selector;

pub use candidates::CandidateSet;
pub use policy::{GuessPolicy, HardModeRule};
pub use selector::{Selection, SelectorConfig, rank_guesses, select_best_guess};
