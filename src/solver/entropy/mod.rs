//! Information-theoretic scoring
//!
//! Shannon entropy of the signature distribution a guess induces over a
//! candidate set. This is the foundation of the guess selector.

mod calculator;

pub use calculator::{GuessMetrics, calculate_metrics, expected_bits, shannon_entropy};
