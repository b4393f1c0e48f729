//! Prompt port for the operator's interactive terminal.

use thiserror::Error;

/// Failure while talking to the operator.
#[derive(Debug, Error)]
pub enum PromptError {
    /// Reading input or writing output failed.
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
    /// Input reached end-of-file before an answer was given.
    #[error("input closed before an answer was given")]
    Closed,
    /// A selection was requested from an empty list.
    #[error("nothing to choose from for {0:?}")]
    NoChoices(String),
}

/// Asks the operator questions and shows progress messages.
///
/// Every workflow step that needs a human goes through this trait, so the
/// orchestrator can be driven from scripted input in tests.
pub trait Prompter: Send + Sync {
    /// Asks a free-text question. An empty answer yields `default` when one
    /// is given.
    ///
    /// # Errors
    ///
    /// Returns an error on I/O failure or when input is closed.
    fn input(&self, message: &str, default: Option<&str>) -> Result<String, PromptError>;

    /// Presents a numbered list and returns the zero-based index picked.
    ///
    /// # Errors
    ///
    /// Returns an error on I/O failure, closed input, or an empty list.
    fn select(&self, message: &str, choices: &[String]) -> Result<usize, PromptError>;

    /// Shows a line of text to the operator.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    fn say(&self, text: &str) -> Result<(), PromptError>;

    /// Asks a Yes/No question.
    ///
    /// # Errors
    ///
    /// Returns an error on I/O failure or when input is closed.
    fn confirm(&self, message: &str) -> Result<bool, PromptError> {
        let choices = ["Yes".to_string(), "No".to_string()];
        Ok(self.select(message, &choices)? == 0)
    }
}
