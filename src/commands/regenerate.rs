//! Regenerate Article: redraft from a saved generation log.

use tracing::info;

use crate::context::ServiceContext;
use crate::store::{ContentStore, GenerationLog, Shelf};

use super::prompts;
use super::{choose, format_answers, offer_editor, prompt_for_answers, WorkflowError};

/// Redrafts an article from a generation log.
///
/// The logged parameters and answers are shown and can be re-entered
/// before the article request is sent again. The new draft and an updated
/// copy of the log are written to the output directory; the original log
/// is left untouched.
///
/// # Errors
///
/// Returns an error if the log or its template cannot be read, the model
/// fails, or a prompt or write fails.
pub async fn run(ctx: &ServiceContext, store: &ContentStore<'_>) -> Result<(), WorkflowError> {
    let prompt = ctx.prompt.as_ref();

    let logs = store.list_generation_logs()?;
    if logs.is_empty() {
        prompt.say("No generation logs found. Please generate an article first.")?;
        return Ok(());
    }

    let log_name = choose(prompt, "Select a generation log to regenerate from:", logs)?;
    let log = store.read_generation_log(&log_name)?;
    prompt.say("Regenerating article from log...")?;

    let template = store.read_template(&log.template)?;

    prompt.say("\nCurrent parameters:")?;
    prompt.say(&format_answers(&log.user_params))?;
    let user_params = if prompt.confirm("Do you want to modify these parameters?")? {
        prompt_for_answers(prompt, &template.params.user_params)?
    } else {
        log.user_params.clone()
    };

    prompt.say("\nCurrent answers:")?;
    prompt.say(&format_answers(&log.user_answers))?;
    let user_answers = if prompt.confirm("Do you want to modify these answers?")? {
        prompt_for_answers(prompt, &log.llm_questions)?
    } else {
        log.user_answers.clone()
    };

    let reply = ctx.llm.complete(&prompts::article_request(&user_answers, &template.content)?).await?;

    let title = prompt
        .input("File save name (press Enter to keep the original):", Some(log.title.as_str()))?;
    let path = store.write_article(reply.content()?, Shelf::Drafts, Some(title.as_str()))?;
    prompt.say(&format!("Regenerated blog post written to {}.", path.display()))?;

    let updated = GenerationLog {
        timestamp: store.timestamp(),
        user_params,
        user_answers,
        title,
        ..log
    };
    let log_path = store.write_generation_log(&updated)?;
    info!(from = %log_name, path = %path.display(), "article regenerated");
    prompt.say(&format!("Updated generation log written to {}.", log_path.display()))?;

    offer_editor(ctx, &path)?;
    prompt.say("Regeneration complete. Happy writing!")?;
    Ok(())
}
