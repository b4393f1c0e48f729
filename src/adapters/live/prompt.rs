//! Line-oriented terminal prompts over any reader/writer pair.

use std::io::{BufRead, Write};
use std::sync::{Mutex, MutexGuard};

use crate::ports::prompt::{PromptError, Prompter};

/// Prompter that reads answers line by line and writes questions as text.
///
/// The live binary wires this to stdin/stdout; tests feed it a
/// [`std::io::Cursor`] and capture the output buffer.
pub struct TerminalPrompter<R, W> {
    io: Mutex<Io<R, W>>,
}

struct Io<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead + Send, W: Write + Send> TerminalPrompter<R, W> {
    /// Creates a prompter reading from `reader` and writing to `writer`.
    pub fn new(reader: R, writer: W) -> Self {
        Self { io: Mutex::new(Io { reader, writer }) }
    }

    fn lock(&self) -> MutexGuard<'_, Io<R, W>> {
        self.io.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl<R: BufRead, W: Write> Io<R, W> {
    /// Reads one line, failing with [`PromptError::Closed`] at end-of-file.
    fn read_answer(&mut self) -> Result<String, PromptError> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(PromptError::Closed);
        }
        Ok(line.trim().to_string())
    }
}

impl<R: BufRead + Send, W: Write + Send> Prompter for TerminalPrompter<R, W> {
    fn input(&self, message: &str, default: Option<&str>) -> Result<String, PromptError> {
        let mut io = self.lock();
        match default {
            Some(default) if !default.is_empty() => write!(io.writer, "? {message} ({default}) ")?,
            _ => write!(io.writer, "? {message} ")?,
        }
        io.writer.flush()?;

        let answer = io.read_answer()?;
        match default {
            Some(default) if answer.is_empty() => Ok(default.to_string()),
            _ => Ok(answer),
        }
    }

    fn select(&self, message: &str, choices: &[String]) -> Result<usize, PromptError> {
        if choices.is_empty() {
            return Err(PromptError::NoChoices(message.to_string()));
        }

        let mut io = self.lock();
        writeln!(io.writer, "? {message}")?;
        for (i, choice) in choices.iter().enumerate() {
            writeln!(io.writer, "  {}) {choice}", i + 1)?;
        }

        loop {
            write!(io.writer, "> ")?;
            io.writer.flush()?;

            let answer = io.read_answer()?;
            match answer.parse::<usize>() {
                Ok(n) if (1..=choices.len()).contains(&n) => return Ok(n - 1),
                _ => writeln!(io.writer, "Please enter a number between 1 and {}.", choices.len())?,
            }
        }
    }

    fn say(&self, text: &str) -> Result<(), PromptError> {
        let mut io = self.lock();
        writeln!(io.writer, "{text}")?;
        io.writer.flush()?;
        Ok(())
    }
}
