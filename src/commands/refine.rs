//! Refine Article: rewrite a draft in a character's voice.

use tracing::info;

use crate::context::ServiceContext;
use crate::store::{ContentStore, Shelf};

use super::prompts;
use super::{choose, WorkflowError};

/// Rewrites a drafted article in the voice of a chosen character and saves
/// the result to the completed directory under the draft's title.
///
/// # Errors
///
/// Returns an error if the article or character cannot be read, the model
/// fails, or a prompt or write fails.
pub async fn run(ctx: &ServiceContext, store: &ContentStore<'_>) -> Result<(), WorkflowError> {
    let prompt = ctx.prompt.as_ref();

    let article_name = choose(prompt, "Select an article to process:", store.list_articles()?)?;
    let article = store.read_article(&article_name)?;

    let character_name = choose(prompt, "Select a character to use:", store.list_characters()?)?;
    let character = store.read_character(&character_name)?;

    let reply = ctx.llm.complete(&prompts::refine_request(&article.content, &character)?).await?;
    let path = store.write_article(reply.content()?, Shelf::Completed, article.front.title.as_deref())?;
    info!(article = %article_name, character = %character_name, path = %path.display(), "article refined");

    prompt.say(&format!("Generated blog post written to {}.", path.display()))?;
    prompt.say("Refinement complete. Happy writing!")?;
    Ok(())
}
