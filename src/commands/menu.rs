//! Main menu loop.

use tracing::warn;

use crate::context::ServiceContext;
use crate::ports::prompt::PromptError;
use crate::store::ContentStore;

use super::{dispatch, WorkflowError};

/// Entries of the main menu, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// Draft a new article from a template.
    New,
    /// Rewrite a draft in a character's voice.
    Refine,
    /// Redraft from a generation log.
    Regenerate,
    /// Publish an article (not implemented).
    Publish,
    /// List article status (not implemented).
    Status,
    /// Leave the program.
    Exit,
}

impl MenuAction {
    /// All actions in menu order.
    pub const ALL: [Self; 6] =
        [Self::New, Self::Refine, Self::Regenerate, Self::Publish, Self::Status, Self::Exit];

    /// Menu label for the action.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::New => "New Article",
            Self::Refine => "Refine Article",
            Self::Regenerate => "Regenerate Article",
            Self::Publish => "Publish Article",
            Self::Status => "List Status",
            Self::Exit => "Exit",
        }
    }
}

const MENU_PROMPT: &str = "What would you like to do?";

/// Shows the menu until the operator exits.
///
/// A failed action is reported and the menu is shown again. Closed input
/// at the menu counts as Exit.
///
/// # Errors
///
/// Returns an error only if the menu itself cannot be shown.
pub async fn run_menu(ctx: &ServiceContext, store: &ContentStore<'_>) -> Result<(), WorkflowError> {
    let labels: Vec<String> = MenuAction::ALL.iter().map(|a| a.label().to_string()).collect();

    loop {
        ctx.prompt.say("Simple Templating System: Blog")?;
        ctx.prompt.say("Please select an option:")?;

        let action = match ctx.prompt.select(MENU_PROMPT, &labels) {
            Ok(index) => MenuAction::ALL
                .get(index)
                .copied()
                .ok_or_else(|| PromptError::NoChoices(MENU_PROMPT.to_string()))?,
            Err(PromptError::Closed) => MenuAction::Exit,
            Err(err) => return Err(err.into()),
        };

        if action == MenuAction::Exit {
            ctx.prompt.say("Goodbye!")?;
            return Ok(());
        }

        if let Err(err) = dispatch(action, ctx, store).await {
            warn!(action = action.label(), error = %err, "menu action failed");
            ctx.prompt.say(&format!("An error occurred: {err}"))?;
        }
    }
}
