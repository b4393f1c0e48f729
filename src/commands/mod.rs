//! Menu dispatch and the drafting workflows.

pub mod menu;
pub mod new;
pub mod prompts;
pub mod publish;
pub mod refine;
pub mod regenerate;
pub mod status;

use std::path::Path;

use thiserror::Error;

use crate::context::ServiceContext;
use crate::ports::editor::EditorError;
use crate::ports::llm::CompletionError;
use crate::ports::prompt::{PromptError, Prompter};
use crate::store::{Answers, ContentStore, StoreError};

pub use menu::{run_menu, MenuAction};

/// Failure of a single menu action.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// The chat completion failed after all retries.
    #[error(transparent)]
    Completion(#[from] CompletionError),
    /// Reading or writing content failed.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// Talking to the operator failed.
    #[error(transparent)]
    Prompt(#[from] PromptError),
    /// The editor could not be run.
    #[error(transparent)]
    Editor(#[from] EditorError),
    /// The model's question reply was not a JSON list of strings.
    #[error("Unexpected response from LLM. Expected an array of questions, got: {0}")]
    MalformedQuestions(String),
    /// Request context could not be serialized.
    #[error("failed to encode request context: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Runs one menu action to completion.
///
/// # Errors
///
/// Returns the first error raised by the action.
pub async fn dispatch(
    action: MenuAction,
    ctx: &ServiceContext,
    store: &ContentStore<'_>,
) -> Result<(), WorkflowError> {
    match action {
        MenuAction::New => new::run(ctx, store).await,
        MenuAction::Refine => refine::run(ctx, store).await,
        MenuAction::Regenerate => regenerate::run(ctx, store).await,
        MenuAction::Publish => publish::run(ctx),
        MenuAction::Status => status::run(ctx),
        MenuAction::Exit => Ok(()),
    }
}

/// Asks each question in order and returns the answers keyed by question.
///
/// # Errors
///
/// Returns an error if any prompt fails.
pub fn prompt_for_answers(
    prompter: &dyn Prompter,
    questions: &[String],
) -> Result<Answers, PromptError> {
    let mut answers = Answers::new();
    for question in questions {
        let answer = prompter.input(question, None)?;
        answers.insert(question.clone(), answer);
    }
    Ok(answers)
}

/// Presents `names` and returns the one picked.
fn choose(prompter: &dyn Prompter, message: &str, mut names: Vec<String>) -> Result<String, PromptError> {
    let index = prompter.select(message, &names)?;
    if index >= names.len() {
        return Err(PromptError::NoChoices(message.to_string()));
    }
    Ok(names.swap_remove(index))
}

/// Offers to open `path` in the configured editor.
fn offer_editor(ctx: &ServiceContext, path: &Path) -> Result<(), WorkflowError> {
    if ctx.prompt.confirm("Open editor?")? {
        ctx.editor.open(path)?;
        ctx.prompt.say("File edited successfully.")?;
    }
    Ok(())
}

/// Renders answers one per line for review.
fn format_answers(answers: &Answers) -> String {
    if answers.is_empty() {
        return "  (none)".to_string();
    }
    answers
        .iter()
        .map(|(question, answer)| format!("  {question}: {answer}"))
        .collect::<Vec<_>>()
        .join("\n")
}
