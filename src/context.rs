//! Service context bundling all port trait objects.

use std::io::{self, BufReader};

use crate::adapters::live::{
    LiveClock, LiveFileSystem, OpenRouterClient, ProcessEditor, TerminalPrompter,
};
use crate::completion::{ChatCompletionClient, ConsoleObserver};
use crate::config::Config;
use crate::ports::clock::Clock;
use crate::ports::editor::Editor;
use crate::ports::filesystem::FileSystem;
use crate::ports::llm::LlmClient;
use crate::ports::prompt::Prompter;

/// Bundles all port trait objects into a single context.
///
/// Workflows only ever see these trait objects; [`ServiceContext::live`]
/// wires the real adapters, tests wire doubles.
pub struct ServiceContext {
    /// Clock for timestamps.
    pub clock: Box<dyn Clock>,
    /// Filesystem for content files.
    pub fs: Box<dyn FileSystem>,
    /// Chat completion client (retrying in live use).
    pub llm: Box<dyn LlmClient>,
    /// External editor for drafted files.
    pub editor: Box<dyn Editor>,
    /// Operator prompts and messages.
    pub prompt: Box<dyn Prompter>,
}

impl ServiceContext {
    /// Creates a live context from the resolved configuration.
    ///
    /// The LLM port is the OpenRouter client wrapped in the retry loop, with
    /// attempt progress written to stderr. When `transcript` is set, the
    /// messages and replies are echoed too.
    #[must_use]
    pub fn live(config: &Config, api_key: &str, transcript: bool) -> Self {
        let transport =
            OpenRouterClient::new(config.completion.api_url.clone(), api_key, config.model.clone());
        let llm = ChatCompletionClient::new(transport, config.completion.policy())
            .with_observer(ConsoleObserver::new(io::stderr()).with_transcript(transcript));

        Self {
            clock: Box::new(LiveClock),
            fs: Box::new(LiveFileSystem),
            llm: Box::new(llm),
            editor: Box::new(ProcessEditor::new(config.editor.clone())),
            prompt: Box::new(TerminalPrompter::new(BufReader::new(io::stdin()), io::stdout())),
        }
    }
}
