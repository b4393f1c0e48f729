//! Request builders for the drafting workflows and parsing of model replies.

use crate::ports::llm::{ChatMessage, CompletionRequest};
use crate::store::{Answers, Character};

use super::WorkflowError;

/// System message for every structured request.
pub const SYSTEM_PROMPT: &str = "You are an LLM function and reply only in the format requested";

/// Most clarifying questions put to the operator.
pub const MAX_QUESTIONS: usize = 5;

/// Asks the model which questions a technical reader would have about the brief.
///
/// # Errors
///
/// Returns [`WorkflowError::Encode`] if the answers cannot be serialized.
pub fn questions_request(
    params: &Answers,
    brief: &str,
) -> Result<CompletionRequest, WorkflowError> {
    let context = serde_json::to_string(params)?;
    let prompt = format!(
        "What are some questions that a technical audience member might have if they do not \
         understand the following brief? Avoid simple questions and focus on complex topics. \
         Context: '{context}' Brief: '{brief}'. Provide a maximum of {MAX_QUESTIONS} questions. \
         Only respond in a JSON list, e.g. [\"What is the core motivation behind the idea?\", ...]"
    );
    Ok(CompletionRequest::new(vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(prompt)]))
}

/// Asks the model to fill `template` into an article skeleton using `answers`.
///
/// # Errors
///
/// Returns [`WorkflowError::Encode`] if the answers cannot be serialized.
pub fn article_request(
    answers: &Answers,
    template: &str,
) -> Result<CompletionRequest, WorkflowError> {
    let context = serde_json::to_string(answers)?;
    let prompt = format!(
        "Context: {context}\n Use the following template to generate an article skeleton for the \
         user to build on. Ensure you leave questions for user input: \n{template}\nReply in \
         markdown, ensure you fill in some of the QA context."
    );
    Ok(CompletionRequest::new(vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(prompt)]))
}

/// Asks the model to rewrite `article` in the voice of `character`.
///
/// The character's own system prompt frames the request; only its persona
/// fields travel with the article.
///
/// # Errors
///
/// Returns [`WorkflowError::Encode`] if the persona cannot be serialized.
pub fn refine_request(article: &str, character: &Character) -> Result<CompletionRequest, WorkflowError> {
    let persona = serde_json::to_string(&character.persona())?;
    let prompt = format!(
        "Revise the following article as if the following character is writing it. Ensure you \
         stick to the template of the article, and only revise the tone and wording of the \
         content. \n{article}\nCharacter writing the article: {persona}\n"
    );
    Ok(CompletionRequest::new(vec![
        ChatMessage::system(character.system_prompt.as_str()),
        ChatMessage::user(prompt),
    ]))
}

/// Parses the model's question list.
///
/// The reply must contain a JSON array of strings; text around the
/// outermost brackets (prose, a markdown code fence) is ignored.
///
/// # Errors
///
/// Returns [`WorkflowError::MalformedQuestions`] when no such array is found.
pub fn parse_questions(reply: &str) -> Result<Vec<String>, WorkflowError> {
    let malformed = || WorkflowError::MalformedQuestions(reply.to_string());
    let start = reply.find('[').ok_or_else(malformed)?;
    let end = reply.rfind(']').ok_or_else(malformed)?;
    if end < start {
        return Err(malformed());
    }
    serde_json::from_str(&reply[start..=end]).map_err(|_| malformed())
}
