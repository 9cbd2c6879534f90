//! Command implementations

pub mod analyze;
pub mod benchmark;
pub mod play;
pub mod prepare;
pub mod solve;

pub use analyze::{AnalysisResult, analyze_word};
pub use benchmark::{BenchmarkConfig, BenchmarkResult, run_benchmark};
pub use play::{PlayError, TerminalDriver, run_play};
pub use prepare::{TableSummary, prepare_table};
pub use solve::{SolveConfig, SolveResult, solve_word};
