//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Formatting of status lines and release previews
//! - `diff` - Rendering differences between published and expected releases
//! - This module - Interactive prompts and user input handling

use std::io::{self, BufRead, Stderr, StdinLock, Write};

use crate::error::{ReleaseSyncError, Result};

pub mod diff;
pub mod formatter;

pub use diff::{write_inline_diff, write_unified_diff};
pub use formatter::{
    banner, display_error, write_boundary_warning, write_error, write_release_preview, write_status,
    write_success, write_token_instructions,
};

/// Message shown when a yes/no answer is not recognized
pub const UNKNOWN_ANSWER: &str = "Unknown answer, please type \"yes\" or \"no\"";

/// Operator interaction needed by the sync loop
pub trait Prompter {
    /// Ask until the operator answers exactly `y`, `yes`, `n` or `no`.
    ///
    /// # Returns
    /// * `Ok(true)` - For `y` or `yes`
    /// * `Ok(false)` - For `n` or `no`
    /// * `Err` - If input is closed before a valid answer
    fn ask_yes_no(&mut self, question: &str) -> Result<bool>;

    /// Ask for a single line of free text, returned trimmed
    fn ask_line(&mut self, question: &str) -> Result<String>;

    /// Where previews, diffs and status lines are written
    fn output(&mut self) -> &mut dyn Write;
}

/// Line-based prompter over any reader/writer pair.
///
/// [Terminal::stdio] reads stdin and writes to stderr, keeping stdout free.
pub struct Terminal<R, W> {
    input: R,
    output: W,
}

impl Terminal<StdinLock<'static>, Stderr> {
    pub fn stdio() -> Self {
        Terminal::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Terminal { input, output }
    }

    /// Consume the terminal, returning everything written to it
    pub fn into_output(self) -> W {
        self.output
    }

    fn read_answer(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ReleaseSyncError::prompt("input closed while waiting for an answer"));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

impl<R: BufRead, W: Write> Prompter for Terminal<R, W> {
    fn ask_yes_no(&mut self, question: &str) -> Result<bool> {
        loop {
            match self.read_answer(question)?.as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => writeln!(self.output, "{}", UNKNOWN_ANSWER)?,
            }
        }
    }

    fn ask_line(&mut self, question: &str) -> Result<String> {
        Ok(self.read_answer(question)?.trim().to_string())
    }

    fn output(&mut self) -> &mut dyn Write {
        &mut self.output
    }
}
