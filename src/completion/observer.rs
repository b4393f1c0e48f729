//! Attempt observers: progress reporting hooks for the retry loop.

use std::io::Write;
use std::sync::Mutex;
use std::time::Duration;

use crate::ports::llm::{CompletionError, CompletionRequest, CompletionResponse};

/// Receives a callback at every attempt boundary of a chat completion.
///
/// Attempts are numbered from zero. All methods default to no-ops so an
/// observer only implements what it displays.
pub trait AttemptObserver: Send + Sync {
    /// An attempt is about to be sent.
    fn on_attempt_start(&self, _attempt: u32, _request: &CompletionRequest) {}

    /// The attempt produced a response; no further attempts follow.
    fn on_success(&self, _attempt: u32, _response: &CompletionResponse) {}

    /// The attempt failed.
    fn on_failure(&self, _attempt: u32, _error: &CompletionError) {}

    /// A retry was scheduled after `backoff`.
    fn on_retry(&self, _next_attempt: u32, _max_retries: u32, _backoff: Duration) {}
}

/// Observer that reports nothing.
pub struct SilentObserver;

impl AttemptObserver for SilentObserver {}

/// Writes spinner-style progress lines for the operator.
///
/// With `transcript` enabled, the outgoing messages and the model's reply
/// are echoed as well.
pub struct ConsoleObserver<W> {
    writer: Mutex<W>,
    transcript: bool,
}

impl<W: Write + Send> ConsoleObserver<W> {
    /// Creates an observer writing to `writer`.
    pub fn new(writer: W) -> Self {
        Self { writer: Mutex::new(writer), transcript: false }
    }

    /// Enables or disables echoing of messages and replies.
    #[must_use]
    pub fn with_transcript(mut self, transcript: bool) -> Self {
        self.transcript = transcript;
        self
    }

    fn emit(&self, render: impl FnOnce(&mut W) -> std::io::Result<()>) {
        let mut writer = self.writer.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        // Progress output is best effort.
        let _ = render(&mut writer).and_then(|()| writer.flush());
    }
}

fn write_indented(out: &mut impl Write, text: &str) -> std::io::Result<()> {
    for line in text.lines() {
        writeln!(out, "  {line}")?;
    }
    Ok(())
}

impl<W: Write + Send> AttemptObserver for ConsoleObserver<W> {
    fn on_attempt_start(&self, _attempt: u32, request: &CompletionRequest) {
        let transcript = self.transcript;
        self.emit(|out| {
            if transcript {
                let model = request.model.as_deref().unwrap_or("default model");
                writeln!(out, "\n== Messages for {model} ==")?;
                for (i, message) in request.messages.iter().enumerate() {
                    if i > 0 {
                        writeln!(out, "------------------------")?;
                    }
                    writeln!(out, "[{}]", message.role.as_str().to_uppercase())?;
                    write_indented(out, &message.content)?;
                }
                writeln!(out, "== End of messages ==\n")?;
            }
            writeln!(out, "Fetching chat completion...")
        });
    }

    fn on_success(&self, _attempt: u32, response: &CompletionResponse) {
        let transcript = self.transcript;
        self.emit(|out| {
            writeln!(out, "Chat completion fetched successfully")?;
            if !transcript {
                return Ok(());
            }
            writeln!(out, "\n== Response ==")?;
            match response.choices.first() {
                Some(choice) => {
                    writeln!(out, "[{}]", choice.message.role.as_str().to_uppercase())?;
                    write_indented(out, &choice.message.content)?;
                    writeln!(out, "\nModel: {}", response.model.as_deref().unwrap_or("unknown"))?;
                    if let Some(usage) = response.usage {
                        writeln!(out, "Prompt Tokens: {}", usage.prompt_tokens)?;
                        writeln!(out, "Completion Tokens: {}", usage.completion_tokens)?;
                        writeln!(out, "Total Tokens: {}", usage.total_tokens)?;
                    }
                }
                None => writeln!(out, "No response content available")?,
            }
            writeln!(out, "== End of response ==\n")
        });
    }

    fn on_failure(&self, _attempt: u32, error: &CompletionError) {
        self.emit(|out| writeln!(out, "Failed to fetch chat completion: {error}"));
    }

    fn on_retry(&self, next_attempt: u32, max_retries: u32, _backoff: Duration) {
        self.emit(|out| writeln!(out, "Retrying... ({next_attempt}/{max_retries})"));
    }
}
