//! Wordle Engine - CLI
//!
//! Entropy-maximizing guesser for Wordle-family puzzles, with standard, hard and
//! multi-board modes.

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use log::LevelFilter;
use std::fs;
use std::io;
use std::path::PathBuf;
use wordle_engine::{
    commands::{
        BenchmarkConfig, SolveConfig, analyze_word, prepare_table, run_benchmark, run_play,
        solve_word,
    },
    core::Word,
    output::{
        print_analysis_result, print_benchmark_result, print_solve_result, print_table_summary,
    },
    session::Session,
    solver::{GuessPolicy, SelectorConfig},
    table::cache::DirectoryCache,
    wordlists::{Vocabulary, load_from_file},
};

#[derive(Parser)]
#[command(
    name = "wordle_engine",
    about = "Adaptive Wordle-family solver driven by expected information gain",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Possible secrets, one word per line (required)
    #[arg(short, long, global = true)]
    answers: Option<PathBuf>,

    /// Accepted guesses, one word per line (defaults to the answers)
    #[arg(short, long, global = true)]
    guesses: Option<PathBuf>,

    /// Directory for cached signature tables
    #[arg(long, global = true)]
    cache_dir: Option<PathBuf>,

    /// Always rebuild the signature table and never store it
    #[arg(long, global = true)]
    no_cache: bool,

    /// Guess policy
    #[arg(short, long, global = true, value_enum, default_value_t = Mode::Standard)]
    mode: Mode,

    /// Number of boards in multi mode
    #[arg(short, long, global = true, default_value_t = 2)]
    boards: usize,

    /// Do not favour guesses that could be the answer when scores tie
    #[arg(long, global = true)]
    no_candidate_preference: bool,

    /// Score bonus (bits) for guesses that are still candidates
    #[arg(long, global = true, default_value_t = 0.0)]
    candidate_bonus: f64,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    Standard,
    Hard,
    Multi,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive mode: suggests guesses and reads back the feedback (default)
    Play,

    /// Solve known secrets (one per board)
    Solve {
        /// The secrets to solve
        #[arg(required = true)]
        secrets: Vec<String>,

        /// Show candidate counts and bits per step
        #[arg(short, long)]
        details: bool,
    },

    /// Analyze a word as an opening guess
    Analyze {
        /// Word to analyze
        word: String,

        /// Number of best opening guesses to list
        #[arg(short, long, default_value = "10")]
        top: usize,
    },

    /// Solve every possible secret and report statistics
    Benchmark {
        /// Test at most this many secrets
        #[arg(short, long)]
        limit: Option<usize>,

        /// Test a random sample of this many secrets
        #[arg(short, long)]
        sample: Option<usize>,

        /// Seed for --sample
        #[arg(long, default_value = "0")]
        seed: u64,

        /// Write a JSON report to this path
        #[arg(short, long)]
        report: Option<PathBuf>,
    },

    /// Build (or load) the signature table and store it in the cache
    Prepare,
}

impl Cli {
    fn policy(&self) -> GuessPolicy {
        match self.mode {
            Mode::Standard => GuessPolicy::Standard,
            Mode::Hard => GuessPolicy::hard(),
            Mode::Multi => GuessPolicy::MultiBoard(self.boards),
        }
    }

    fn selector(&self) -> SelectorConfig {
        SelectorConfig {
            prefer_candidates: !self.no_candidate_preference,
            candidate_bonus: self.candidate_bonus,
            ..SelectorConfig::default()
        }
    }

    fn cache(&self) -> Option<DirectoryCache> {
        if self.no_cache {
            return None;
        }
        self.cache_dir
            .clone()
            .map(DirectoryCache::new)
            .or_else(DirectoryCache::default_location)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let vocabulary = load_vocabulary(&cli)?;
    let cache = cli.cache();

    let progress = progress_bar("building signature table")?;
    let (table, summary) = prepare_table(&vocabulary, cache.as_ref(), &progress)
        .context("failed to prepare the signature table")?;
    progress.finish_and_clear();

    let policy = cli.policy();
    let selector = cli.selector();

    match cli.command.unwrap_or(Commands::Play) {
        Commands::Play => {
            let mut session = Session::with_config(&table, policy, selector)?;
            if run_play(&mut session, io::stdin().lock(), io::stdout())?.is_none() {
                println!("\n👋 Thanks for playing!\n");
            }
        }
        Commands::Solve { secrets, details } => {
            let secrets = secrets
                .iter()
                .map(|secret| secret.parse::<Word>())
                .collect::<Result<Vec<_>, _>>()
                .context("invalid secret")?;
            let mut config = SolveConfig::new(secrets, policy);
            config.selector = selector;

            let result = solve_word(&table, config)?;
            print_solve_result(&result, details);
        }
        Commands::Analyze { word, top } => {
            let result = analyze_word(&table, &word, top)?;
            print_analysis_result(&result);
        }
        Commands::Benchmark {
            limit,
            sample,
            seed,
            report,
        } => {
            let config = BenchmarkConfig {
                policy,
                selector,
                limit,
                sample,
                seed,
            };

            let progress = progress_bar("solving")?;
            let result = run_benchmark(&table, &config, &progress)?;
            progress.finish_and_clear();
            print_benchmark_result(&result);

            if let Some(path) = report {
                let json = serde_json::to_string_pretty(&result)?;
                fs::write(&path, json)
                    .with_context(|| format!("failed to write report to {}", path.display()))?;
                println!("\nReport written to {}", path.display());
            }
        }
        Commands::Prepare => print_table_summary(&summary),
    }

    Ok(())
}

/// Default level `warn`, raised by each `-v`; `RUST_LOG` overrides both
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn load_vocabulary(cli: &Cli) -> Result<Vocabulary> {
    let Some(answers) = &cli.answers else {
        bail!("--answers <path> is required: a file with one possible secret per line");
    };

    let secrets = load_from_file(answers)
        .with_context(|| format!("failed to read answers from {}", answers.display()))?;
    let guesses = cli
        .guesses
        .as_ref()
        .map(|path| {
            load_from_file(path)
                .with_context(|| format!("failed to read guesses from {}", path.display()))
        })
        .transpose()?;

    Ok(Vocabulary::new(secrets, guesses)?)
}

fn progress_bar(message: &'static str) -> Result<ProgressBar> {
    let progress = ProgressBar::new(0);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} {msg} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%)")?
            .progress_chars("█▓▒░"),
    );
    progress.set_message(message);
    Ok(progress)
}
