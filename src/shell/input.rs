//! Prompt helpers for the interactive shell.
//!
//! All prompts re-ask on invalid input and fail with
//! [`Error::InputClosed`](crate::error::Error::InputClosed) once the input
//! stream runs dry, which the main loop treats as a request to exit.

use std::io::{BufRead, Write};

use crate::error::{Error, Result};

use super::Shell;

impl<R: BufRead, W: Write> Shell<'_, R, W> {
    /// Read one trimmed line, or fail if the stream has ended.
    pub(super) fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        let read = self.input.read_line(&mut line)?;
        if read == 0 {
            return Err(Error::InputClosed);
        }
        Ok(line.trim().to_string())
    }

    /// Show a message and read the reply.
    pub(super) fn prompt(&mut self, message: &str) -> Result<String> {
        writeln!(self.out, "{message}")?;
        write!(self.out, "> ")?;
        self.out.flush()?;
        self.read_line()
    }

    /// Print a complaint the way the menus always have.
    pub(super) fn complain(&mut self, message: &str) -> Result<()> {
        writeln!(self.out, "!! {message}")?;
        Ok(())
    }

    /// Prompt until the reply is a non-empty line.
    pub(super) fn prompt_nonempty(&mut self, message: &str) -> Result<String> {
        loop {
            let reply = self.prompt(message)?;
            if reply.is_empty() {
                self.complain("please enter something")?;
            } else {
                return Ok(reply);
            }
        }
    }

    /// Prompt until the reply parses as a number in `min..=max`.
    pub(super) fn prompt_number(&mut self, message: &str, min: u32, max: u32) -> Result<u32> {
        loop {
            let reply = self.prompt(message)?;
            match reply.parse::<u32>() {
                Ok(value) if (min..=max).contains(&value) => return Ok(value),
                _ => self.complain(&format!("choose a number from {min} to {max}"))?,
            }
        }
    }

    /// Prompt until the reply is one of the given keys (case-insensitive).
    /// Returns the matched key in its listed case.
    pub(super) fn prompt_key(&mut self, message: &str, keys: &[char]) -> Result<char> {
        loop {
            let reply = self.prompt(message)?;
            let mut chars = reply.chars();
            let choice = (chars.next(), chars.next());
            if let (Some(c), None) = choice {
                if let Some(key) = keys.iter().find(|k| k.eq_ignore_ascii_case(&c)) {
                    return Ok(*key);
                }
            }
            let listing: String = keys
                .iter()
                .map(char::to_string)
                .collect::<Vec<_>>()
                .join(" / ");
            self.complain(&format!("choose one of: {listing}"))?;
        }
    }
}
