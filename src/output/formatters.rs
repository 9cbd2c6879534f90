//! Formatting utilities for terminal output

use crate::core::{Feedback, Signature, Word};
use colored::{ColoredString, Colorize};

/// Render each letter of `word` on the tile color `signature` gives it
#[must_use]
pub fn colored_guess(word: &Word, signature: Signature) -> String {
    word.text()
        .to_uppercase()
        .chars()
        .zip(signature.feedback())
        .map(|(letter, mark)| tile(letter, mark).to_string())
        .collect()
}

fn tile(letter: char, mark: Feedback) -> ColoredString {
    let text = format!(" {letter} ");
    match mark {
        Feedback::Correct => text.black().on_green().bold(),
        Feedback::Present => text.black().on_yellow().bold(),
        Feedback::Absent => text.white().on_bright_black(),
    }
}

/// Emoji squares for one signature per board, separated by spaces
#[must_use]
pub fn signatures_to_emoji(signatures: &[Signature]) -> String {
    signatures
        .iter()
        .map(|signature| signature.to_emoji())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Comma-separated uppercase words, at most `limit` shown
#[must_use]
pub fn word_list(words: &[Word], limit: usize) -> String {
    let shown: Vec<String> = words.iter().take(limit).map(|w| w.text().to_uppercase()).collect();
    if words.len() > limit {
        format!("{}, … (+{})", shown.join(", "), words.len() - limit)
    } else {
        shown.join(", ")
    }
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    // Cast is safe: values are clamped to [0, width]
    let filled = if max > 0.0 {
        ((value / max) * width as f64).max(0.0) as usize
    } else {
        0
    };
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Bits as a bar scaled to the most a guess could yield over `candidates`
#[must_use]
pub fn entropy_bar(bits: f64, candidates: usize, width: usize) -> String {
    let max_bits = (candidates.max(1) as f64).log2().min((Signature::COUNT as f64).log2());
    create_progress_bar(bits, max_bits, width)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str) -> Word {
        Word::new(text).unwrap()
    }

    #[test]
    fn colored_guess_keeps_letters() {
        colored::control::set_override(false);
        let guess = word("crane");
        let rendered = colored_guess(&guess, Signature::compute(&word("crate"), &guess));
        assert_eq!(rendered, " C  R  A  N  E ");
    }

    #[test]
    fn emoji_per_board() {
        let rendered = signatures_to_emoji(&[Signature::ALL_CORRECT, Signature::from_wire("11112").unwrap()]);
        assert_eq!(rendered, "🟩🟩🟩🟩🟩 ⬜⬜⬜⬜🟨");
    }

    #[test]
    fn word_list_truncates() {
        let words = vec![word("crane"), word("slate"), word("trace")];
        assert_eq!(word_list(&words, 5), "CRANE, SLATE, TRACE");
        assert_eq!(word_list(&words, 2), "CRANE, SLATE, … (+1)");
    }

    #[test]
    fn progress_bar_empty() {
        let bar = create_progress_bar(0.0, 100.0, 10);
        assert_eq!(bar, "░░░░░░░░░░");
    }

    #[test]
    fn progress_bar_full() {
        let bar = create_progress_bar(100.0, 100.0, 10);
        assert_eq!(bar, "██████████");
    }

    #[test]
    fn progress_bar_half() {
        let bar = create_progress_bar(50.0, 100.0, 10);
        assert_eq!(bar, "█████░░░░░");
    }

    #[test]
    fn entropy_bar_full_for_perfect_split() {
        assert_eq!(entropy_bar(2.0, 4, 4), "████");
        assert_eq!(entropy_bar(0.0, 1, 4), "░░░░");
    }
}
