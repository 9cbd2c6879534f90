//! Interactive terminal mode
//!
//! A [`Driver`] that prints each guess and reads the feedback typed back by a
//! person playing the real puzzle.

use crate::core::{Signature, Word};
use crate::error::{Error, Result};
use crate::session::driver::{Driver, drive};
use crate::session::{Session, Solution};
use colored::Colorize;
use log::warn;
use std::io::{self, BufRead, Write};
use thiserror::Error;

/// Errors that end an interactive game
#[derive(Debug, Error)]
pub enum PlayError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Engine(#[from] Error),
}

/// Reads feedback lines from `input`, writes prompts to `output`
pub struct TerminalDriver<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalDriver<R, W> {
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Print `text` and read one trimmed line; `None` at end of input
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{text}: ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn banner(&mut self, boards: usize) -> io::Result<()> {
        writeln!(self.output, "\n{}", "═".repeat(60).cyan())?;
        writeln!(
            self.output,
            " {} ",
            "WORDLE ENGINE - INTERACTIVE MODE".bright_cyan().bold()
        )?;
        writeln!(self.output, "{}", "═".repeat(60).cyan())?;
        writeln!(self.output, "\nAfter each guess, enter the feedback:")?;
        writeln!(self.output, "  - 3 or G for correct position")?;
        writeln!(self.output, "  - 2 or Y for wrong position")?;
        writeln!(self.output, "  - 1 or - for not in word")?;
        if boards > 1 {
            writeln!(
                self.output,
                "  One group of five per board ({boards} boards), separated by spaces or run together"
            )?;
        }
        writeln!(self.output, "  'win' if every board is solved, 'quit' to stop\n")
    }
}

impl<R: BufRead, W: Write> Driver for TerminalDriver<R, W> {
    type Error = PlayError;

    fn present(&mut self, guess: &Word, step: usize) -> Result<(), PlayError> {
        writeln!(self.output, "{}", "─".repeat(60))?;
        writeln!(
            self.output,
            "Step {step}: {}",
            guess.text().to_uppercase().bright_white().bold()
        )?;
        Ok(())
    }

    fn feedback(&mut self, _guess: &Word, boards: usize) -> Result<Option<Vec<Signature>>, PlayError> {
        loop {
            let Some(line) = self.prompt("Feedback")? else {
                return Ok(None);
            };

            match line.to_lowercase().as_str() {
                "quit" | "q" | "exit" => return Ok(None),
                "win" | "correct" | "solved" => return Ok(Some(vec![Signature::ALL_CORRECT; boards])),
                _ => match parse_report(&line, boards) {
                    Ok(signatures) => return Ok(Some(signatures)),
                    Err(error) => writeln!(self.output, "❌ {error}")?,
                },
            }
        }
    }

    fn rejected(&mut self, error: &Error) -> bool {
        let retry = matches!(
            error,
            Error::InvalidSignature(_)
                | Error::UnknownSignature { .. }
                | Error::NoRemainingCandidates
                | Error::BoardCountMismatch { .. }
        );
        let hint = if retry { " (re-enter the feedback for this guess)" } else { "" };
        if let Err(io_error) = writeln!(self.output, "❌ {error}{hint}") {
            warn!("could not report rejected feedback: {io_error}");
        }
        retry
    }

    fn finished(&mut self, solution: &Solution) -> Result<(), PlayError> {
        for extra in &solution.extra_guesses {
            writeln!(
                self.output,
                "Then enter: {}",
                extra.text().to_uppercase().bright_white().bold()
            )?;
        }

        let answers: Vec<String> = solution.answers.iter().map(|w| w.text().to_uppercase()).collect();
        writeln!(self.output, "\n{}", "═".repeat(60).bright_cyan())?;
        writeln!(
            self.output,
            "  {} {}",
            "🎉 Solved:".bright_green().bold(),
            answers.join(", ").bright_yellow().bold()
        )?;
        writeln!(
            self.output,
            "  in {} {}",
            solution.steps.to_string().bright_cyan().bold(),
            if solution.steps == 1 { "step" } else { "steps" }
        )?;
        writeln!(self.output, "{}\n", "═".repeat(60).bright_cyan())?;
        Ok(())
    }
}

/// Parse a typed report: one signature per board
///
/// A single board accepts wire digits or symbolic marks. Several boards accept
/// whitespace-separated groups in either form, or one run of wire digits.
///
/// # Errors
/// Returns [`Error::InvalidSignature`] if the text does not describe `boards` signatures.
pub fn parse_report(text: &str, boards: usize) -> Result<Vec<Signature>> {
    let groups: Vec<&str> = text.split_whitespace().collect();

    if boards == 1 {
        return text.parse().map(|signature| vec![signature]);
    }
    if groups.len() == boards {
        return groups.iter().map(|group| group.parse()).collect();
    }
    Signature::parse_boards(text, boards)
}

/// Play one interactive game on `session`
///
/// Returns `None` if the player quit before the puzzle was solved.
///
/// # Errors
/// Terminal I/O failures, or a session error the player cannot correct.
pub fn run_play<R: BufRead, W: Write>(
    session: &mut Session<'_>,
    input: R,
    output: W,
) -> Result<Option<Solution>, PlayError> {
    let mut driver = TerminalDriver::new(input, output);
    driver.banner(session.board_count())?;
    drive(session, &mut driver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{GuessPolicy, SelectorConfig};
    use crate::table::SignatureTable;
    use crate::wordlists::loader::words_from_slice;
    use std::io::Cursor;

    fn word(text: &str) -> Word {
        Word::new(text).unwrap()
    }

    fn fixture() -> SignatureTable {
        let words = words_from_slice(&["crane", "slate", "trace", "crate"]);
        SignatureTable::build(&words, &words)
    }

    fn play(session: &mut Session<'_>, input: &str) -> (Option<Solution>, String) {
        let mut driver = TerminalDriver::new(Cursor::new(input.as_bytes()), Vec::new());
        let solution = drive(session, &mut driver).unwrap();
        (solution, String::from_utf8(driver.into_output()).unwrap())
    }

    #[test]
    fn plays_to_the_answer_after_a_typo() {
        let table = fixture();
        let mut session = Session::standard(&table).unwrap();

        let (solution, output) = play(&mut session, "33313\nxx\n33333\n");
        let solution = solution.unwrap();
        assert_eq!(solution.answer(), Some(word("crate")));
        assert_eq!(solution.steps, 2);
        assert!(output.contains("invalid signature"));
    }

    #[test]
    fn symbolic_feedback_is_accepted() {
        let table = fixture();
        let mut session = Session::standard(&table).unwrap();

        let (solution, _) = play(&mut session, "GGG-G\nwin\n");
        assert_eq!(solution.unwrap().answer(), Some(word("crate")));
    }

    #[test]
    fn inconsistent_feedback_can_be_corrected() {
        let table = fixture();
        let mut session = Session::standard(&table).unwrap();

        // CRATE against TRACE is reported on the second guess, then corrected
        let (solution, output) = play(&mut session, "33313\n23323\n33333\n");
        assert_eq!(solution.unwrap().steps, 2);
        assert!(output.contains("re-enter"));
    }

    #[test]
    fn end_of_input_abandons_the_game() {
        let table = fixture();
        let mut session = Session::standard(&table).unwrap();

        let (solution, _) = play(&mut session, "33313\n");
        assert_eq!(solution, None);
        assert_eq!(session.steps(), 2);
    }

    #[test]
    fn multi_board_reports() {
        let table = fixture();
        let mut session = Session::multi(&table, 2).unwrap();

        let (solution, _) = play(&mut session, "33333 11313\n1111133333\n");
        assert_eq!(solution.unwrap().answers, vec![word("crane"), word("slate")]);
    }

    #[test]
    fn win_accepts_a_guess_outside_the_candidates() {
        let secrets = words_from_slice(&["crate", "grate"]);
        let guesses = words_from_slice(&["cbbbb", "crate", "grate"]);
        let table = SignatureTable::build(&secrets, &guesses);
        let config = SelectorConfig {
            prefer_candidates: false,
            ..SelectorConfig::default()
        };
        let mut session = Session::with_config(&table, GuessPolicy::Standard, config).unwrap();

        let (solution, output) = play(&mut session, "win\n");
        assert_eq!(solution.unwrap().answer(), Some(word("cbbbb")));
        assert!(!output.contains("re-enter"));
    }

    struct BrokenTerminal;

    impl Write for BrokenTerminal {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("terminal closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn rejection_survives_a_broken_terminal() {
        let mut driver = TerminalDriver::new(Cursor::new(&b""[..]), BrokenTerminal);
        assert!(driver.rejected(&Error::NoRemainingCandidates));
        assert!(!driver.rejected(&Error::SessionAlreadyComplete));
    }

    #[test]
    fn parse_report_forms() {
        assert_eq!(parse_report("GY-13", 1).unwrap().len(), 1);
        assert_eq!(parse_report("GGGGG 11111", 2).unwrap()[0], Signature::ALL_CORRECT);
        assert_eq!(parse_report("3333311111", 2).unwrap()[1], Signature::from_wire("11111").unwrap());
        assert!(parse_report("33333", 2).is_err());
    }

    #[test]
    fn run_play_prints_banner() {
        let table = fixture();
        let mut session = Session::standard(&table).unwrap();
        let mut output = Vec::new();

        let solution = run_play(&mut session, Cursor::new("win\n".as_bytes()), &mut output).unwrap();
        assert_eq!(solution.unwrap().answer(), Some(word("crane")));
        assert!(String::from_utf8(output).unwrap().contains("INTERACTIVE MODE"));
    }
}
