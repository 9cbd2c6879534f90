//! Benchmark command
//!
//! Solves every possible secret (or a seeded sample of them) against one shared
//! table and summarizes the step counts. Puzzles run in parallel; each has its
//! own session.

use crate::core::Word;
use crate::error::Result;
use crate::session::Session;
use crate::session::driver::{OracleDriver, drive};
use crate::solver::{GuessPolicy, SelectorConfig};
use crate::table::SignatureTable;
use indicatif::ProgressBar;
use log::info;
use rand::SeedableRng;
use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Puzzles needing more steps than this count as failures
pub const GUESS_LIMIT: usize = 6;

/// Which puzzles to run and how to solve them
#[derive(Debug, Clone)]
pub struct BenchmarkConfig {
    pub policy: GuessPolicy,
    pub selector: SelectorConfig,
    /// Keep at most this many secrets
    pub limit: Option<usize>,
    /// Draw this many secrets at random instead of taking them all
    pub sample: Option<usize>,
    pub seed: u64,
}

impl BenchmarkConfig {
    #[must_use]
    pub fn new(policy: GuessPolicy) -> Self {
        Self {
            policy,
            selector: SelectorConfig::default(),
            limit: None,
            sample: None,
            seed: 0,
        }
    }
}

/// Outcome of one puzzle
#[derive(Debug, Clone, Serialize)]
pub struct PuzzleResult {
    pub secrets: Vec<String>,
    /// Every word entered, extra guesses included
    pub guesses: Vec<String>,
    pub steps: usize,
    pub success: bool,
}

/// Result of a benchmark run
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkResult {
    pub policy: String,
    pub total_puzzles: usize,
    pub solved: usize,
    pub failed: usize,
    /// Average over solved puzzles
    pub average_steps: f64,
    pub min_steps: usize,
    pub max_steps: usize,
    /// Steps → number of puzzles, failures included
    pub distribution: BTreeMap<usize, usize>,
    pub first_guesses: BTreeMap<String, usize>,
    #[serde(rename = "duration_secs", serialize_with = "serialize_secs")]
    pub duration: Duration,
    pub puzzles_per_second: f64,
    pub puzzles: Vec<PuzzleResult>,
}

impl BenchmarkResult {
    /// Puzzles with the most steps, worst first
    #[must_use]
    pub fn worst(&self, count: usize) -> Vec<&PuzzleResult> {
        let mut puzzles: Vec<&PuzzleResult> = self.puzzles.iter().collect();
        puzzles.sort_by_key(|puzzle| std::cmp::Reverse(puzzle.steps));
        puzzles.truncate(count);
        puzzles
    }
}

fn serialize_secs<S: serde::Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64())
}

/// Secrets to benchmark, sorted
///
/// With `sample`, the same seed always yields the same secrets.
#[must_use]
pub fn select_targets(secrets: &[Word], config: &BenchmarkConfig) -> Vec<Word> {
    let mut targets: Vec<Word> = match config.sample {
        Some(count) => {
            let mut rng = StdRng::seed_from_u64(config.seed);
            secrets.choose_multiple(&mut rng, count).copied().collect()
        }
        None => secrets.to_vec(),
    };
    targets.sort_unstable();

    if let Some(limit) = config.limit {
        targets.truncate(limit);
    }
    targets
}

/// Run the benchmark, advancing `progress` once per puzzle
///
/// Multi-board policies group consecutive targets into puzzles of one secret
/// per board; leftover targets are skipped.
///
/// # Errors
///
/// Returns the first session error any puzzle hits.
pub fn run_benchmark(
    table: &SignatureTable,
    config: &BenchmarkConfig,
    progress: &ProgressBar,
) -> Result<BenchmarkResult> {
    let targets = select_targets(table.secrets(), config);
    let puzzles: Vec<&[Word]> = targets.chunks_exact(config.policy.boards().max(1)).collect();

    info!(
        "benchmarking {} puzzle(s) with the {} policy",
        puzzles.len(),
        config.policy.name()
    );
    progress.set_length(puzzles.len() as u64);

    let start = Instant::now();
    let results = puzzles
        .par_iter()
        .map(|secrets| {
            let result = solve_puzzle(table, secrets, config);
            progress.inc(1);
            result
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(summarize(config.policy.name(), results, start.elapsed()))
}

fn solve_puzzle(table: &SignatureTable, secrets: &[Word], config: &BenchmarkConfig) -> Result<PuzzleResult> {
    let mut session = Session::with_config(table, config.policy.clone(), config.selector)?;
    let mut driver = OracleDriver::new(secrets.to_vec());
    let solution = drive(&mut session, &mut driver)?;

    let extras = solution.as_ref().map_or(&[][..], |solution| solution.extra_guesses.as_slice());
    let steps = solution.as_ref().map_or(session.steps(), |solution| solution.steps);

    Ok(PuzzleResult {
        secrets: secrets.iter().map(ToString::to_string).collect(),
        guesses: driver
            .guesses()
            .iter()
            .chain(extras)
            .map(ToString::to_string)
            .collect(),
        steps,
        success: solution.is_some() && steps <= GUESS_LIMIT,
    })
}

fn summarize(policy: &str, puzzles: Vec<PuzzleResult>, duration: Duration) -> BenchmarkResult {
    let mut distribution = BTreeMap::new();
    let mut first_guesses = BTreeMap::new();
    for puzzle in &puzzles {
        *distribution.entry(puzzle.steps).or_insert(0) += 1;
        if let Some(first) = puzzle.guesses.first() {
            *first_guesses.entry(first.clone()).or_insert(0) += 1;
        }
    }

    let solved: Vec<usize> = puzzles.iter().filter(|p| p.success).map(|p| p.steps).collect();
    let average_steps = if solved.is_empty() {
        0.0
    } else {
        solved.iter().sum::<usize>() as f64 / solved.len() as f64
    };

    let secs = duration.as_secs_f64();
    let total_puzzles = puzzles.len();

    BenchmarkResult {
        policy: policy.to_string(),
        total_puzzles,
        solved: solved.len(),
        failed: total_puzzles - solved.len(),
        average_steps,
        min_steps: puzzles.iter().map(|p| p.steps).min().unwrap_or(0),
        max_steps: puzzles.iter().map(|p| p.steps).max().unwrap_or(0),
        distribution,
        first_guesses,
        duration,
        puzzles_per_second: if secs > 0.0 { total_puzzles as f64 / secs } else { 0.0 },
        puzzles,
    }
}
