//! New Article: template, brief, clarifying questions, draft, log.

use tracing::info;

use crate::context::ServiceContext;
use crate::store::{ContentStore, GenerationLog, Shelf};

use super::prompts::{self, MAX_QUESTIONS};
use super::{choose, offer_editor, prompt_for_answers, WorkflowError};

/// Drafts a new article from a template.
///
/// The operator picks a template, writes a brief, and answers the
/// template's parameters. The model proposes clarifying questions (at most
/// five are asked), then drafts the article from the answers and the
/// template body. The draft and a generation log are written to the output
/// directory.
///
/// # Errors
///
/// Returns an error if a template is missing, the model fails or replies
/// with something other than a question list, or a prompt or write fails.
pub async fn run(ctx: &ServiceContext, store: &ContentStore<'_>) -> Result<(), WorkflowError> {
    let timestamp = store.timestamp();
    let prompt = ctx.prompt.as_ref();

    let template_name = choose(prompt, "Select an article type:", store.list_templates()?)?;
    let template = store.read_template(&template_name)?;

    let brief = prompt.input("Briefly describe the goals of the article, and any key points.", None)?;

    prompt.say("\nPlease provide the following template parameters:")?;
    let user_params = prompt_for_answers(prompt, &template.params.user_params)?;

    let reply = ctx.llm.complete(&prompts::questions_request(&user_params, &brief)?).await?;
    let mut llm_questions = prompts::parse_questions(reply.content()?)?;
    llm_questions.truncate(MAX_QUESTIONS);

    prompt.say("\nPlease answer the following questions about your article:")?;
    let user_answers = prompt_for_answers(prompt, &llm_questions)?;
    prompt.say("\nThank you for answering the questions!")?;
    let title = prompt.input("File save name:", None)?;

    let reply = ctx.llm.complete(&prompts::article_request(&user_answers, &template.content)?).await?;
    let path = store.write_article(reply.content()?, Shelf::Drafts, Some(title.as_str()))?;
    info!(template = %template_name, path = %path.display(), "article drafted");
    prompt.say(&format!("Generated blog post written to {}.", path.display()))?;

    offer_editor(ctx, &path)?;

    let log = GenerationLog {
        timestamp,
        template: template_name,
        brief,
        user_params,
        llm_questions,
        user_answers,
        title,
    };
    store.write_generation_log(&log)?;

    prompt.say("Generation complete. Happy writing!")?;
    Ok(())
}
