//! Display functions for command results

use super::formatters::{colored_guess, create_progress_bar, entropy_bar, signatures_to_emoji, word_list};
use crate::commands::{AnalysisResult, BenchmarkResult, SolveResult, TableSummary};
use crate::commands::benchmark::GUESS_LIMIT;
use colored::Colorize;

/// Print the result of solving known secrets
pub fn print_solve_result(result: &SolveResult, verbose: bool) {
    let secrets: Vec<String> = result.secrets.iter().map(|w| w.text().to_uppercase()).collect();

    println!("\n{}", "─".repeat(60).cyan());
    println!("Solving: {}", secrets.join(" + ").bright_yellow().bold());
    println!("{}", "─".repeat(60).cyan());

    for (i, step) in result.guesses.iter().enumerate() {
        let tiles = match step.signatures.as_slice() {
            [signature] => colored_guess(&step.word, *signature),
            signatures => format!("{} {}", step.word.text().to_uppercase(), signatures_to_emoji(signatures)),
        };
        println!("\nTurn {}: {tiles}", i + 1);

        if verbose {
            println!(
                "  Candidates: {} → {}",
                step.candidates_before, step.candidates_after
            );
            if step.terminal {
                println!("  Announced as the answer");
            } else {
                println!("  Expected:   {:.3} bits", step.bits);
                if step.candidates_after > 0 {
                    let ratio = step.candidates_before as f64 / step.candidates_after as f64;
                    println!("  Actual:     {:.3} bits ({ratio:.1}x reduction)", ratio.log2());
                }
            }
        }
    }

    println!();
    match &result.solution {
        Some(solution) => {
            if !solution.extra_guesses.is_empty() {
                println!(
                    "Extra guesses: {}",
                    word_list(&solution.extra_guesses, 8).bright_white().bold()
                );
            }
            println!(
                "{}",
                format!("✅ Solved in {} steps!", solution.steps).green().bold()
            );
        }
        None => println!(
            "{}",
            format!("❌ Not solved after {} rounds", result.guesses.len())
                .red()
                .bold()
        ),
    }
}

/// Print the result of word analysis
pub fn print_analysis_result(result: &AnalysisResult) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(
        " {} {} ",
        "ENTROPY ANALYSIS:".bright_cyan().bold(),
        result.word.text().to_uppercase().bright_yellow().bold()
    );
    println!("{}", "═".repeat(60).cyan());

    let bar = entropy_bar(result.metrics.entropy, result.total_candidates, 30);

    println!("\n📊 Against {} possible secrets:", result.total_candidates);
    println!(
        "   Entropy:     [{}] {}",
        bar.green(),
        format!("{:.3} bits", result.metrics.entropy).bright_yellow()
    );
    println!("   Info gain:   {:.1}x reduction", result.expected_reduction);
    println!(
        "   Expected:    {:.1} candidates remain",
        result.metrics.expected_remaining
    );
    println!("   Worst case:  {} candidates", result.metrics.max_partition);
    println!(
        "   Rank:        #{}{}",
        result.rank,
        if result.is_secret { " (possible secret)" } else { "" }
    );

    if !result.best.is_empty() {
        println!("\n🏆 {}", "Best opening guesses:".bright_cyan().bold());
        for (i, selection) in result.best.iter().enumerate() {
            println!(
                "   {:2}. {} {:.3} bits",
                i + 1,
                selection.word.text().to_uppercase(),
                selection.bits
            );
        }
    }
}

/// Print the result of a benchmark
pub fn print_benchmark_result(result: &BenchmarkResult) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "BENCHMARK RESULTS".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    println!("\n📊 {}", "Performance:".bright_cyan().bold());
    println!("   Policy:           {}", result.policy);
    println!("   Puzzles tested:   {}", result.total_puzzles);
    println!("   Solved:           {}", format!("{}", result.solved).green());
    if result.failed > 0 {
        println!(
            "   Failed (>{GUESS_LIMIT}):     {}",
            format!("{}", result.failed).red()
        );
    }
    println!(
        "   Average steps:    {}",
        format!("{:.3}", result.average_steps).bright_yellow().bold()
    );
    println!(
        "   Best case:        {}",
        format!("{}", result.min_steps).green()
    );
    println!(
        "   Worst case:       {}",
        format!("{}", result.max_steps).yellow()
    );
    println!("   Time taken:       {:.2}s", result.duration.as_secs_f64());
    println!("   Puzzles/second:   {:.1}", result.puzzles_per_second);

    if !result.first_guesses.is_empty() {
        let openers: Vec<String> = result
            .first_guesses
            .iter()
            .map(|(word, count)| format!("{} ×{count}", word.to_uppercase()))
            .collect();
        println!("   First guesses:    {}", openers.join(", "));
    }

    println!("\n📈 {}", "Distribution:".bright_cyan().bold());
    for (&steps, &count) in &result.distribution {
        let pct = count as f64 / result.total_puzzles as f64 * 100.0;
        let bar = create_progress_bar(pct, 100.0, 40);
        let bar = if steps > GUESS_LIMIT { bar.red() } else { bar.green() };
        println!("   {steps:2}: {bar} {count:4} ({pct:5.1}%)");
    }

    let worst: Vec<String> = result
        .worst(5)
        .iter()
        .filter(|puzzle| puzzle.steps >= GUESS_LIMIT - 1)
        .map(|puzzle| format!("{} ({})", puzzle.secrets.join("+").to_uppercase(), puzzle.steps))
        .collect();
    if !worst.is_empty() {
        println!("\n⚠️  {}", "Hardest puzzles:".bright_cyan().bold());
        println!("   {}", worst.join(", "));
    }
}

/// Print the size and cache key of a prepared table
pub fn print_table_summary(summary: &TableSummary) {
    println!("\n{}", "─".repeat(60).cyan());
    println!(" {} ", "SIGNATURE TABLE".bright_cyan().bold());
    println!("{}", "─".repeat(60).cyan());
    println!("   Possible secrets: {}", summary.secrets);
    println!("   Accepted guesses: {}", summary.guesses);
    println!("   Signature groups: {}", summary.groups);
    println!("   Cache key:        {}", summary.key.to_string().bright_yellow());
    match &summary.location {
        Some(path) => println!("   Stored at:        {}", path.display()),
        None => println!("   Stored at:        {}", "(not cached)".bright_black()),
    }
}
