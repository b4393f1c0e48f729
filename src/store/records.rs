//! Records persisted by the content store.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Operator answers keyed by prompt, in the order they were asked.
pub type Answers = IndexMap<String, String>;

/// Front matter of an article template.
///
/// `user_params` lists the questions put to the operator before drafting;
/// any other keys are kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateParams {
    /// Parameter prompts, asked in order.
    #[serde(default)]
    pub user_params: Vec<String>,
    /// Remaining front-matter keys.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// An article template: front matter plus the markdown skeleton.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    /// Template parameters.
    pub params: TemplateParams,
    /// Markdown body sent to the model.
    pub content: String,
}

/// Front matter written on every drafted or refined article.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleFrontMatter {
    /// Human title; `"Untitled"` when none was given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// RFC 3339 time of writing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// File-name-safe variant of `date`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// A drafted article read back from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    /// Article metadata.
    pub front: ArticleFrontMatter,
    /// Markdown body.
    pub content: String,
}

/// A persona used to rewrite an article in its voice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Character {
    /// Display name.
    pub name: String,
    /// Who the character is.
    pub description: String,
    /// Sample passages in the character's voice.
    pub few_shot_examples: Vec<serde_json::Value>,
    /// Free-form tone guidance (string or structured).
    pub tone_and_voice: serde_json::Value,
    /// Instructions appended after the article.
    pub post_prompt: String,
    /// System message for the rewrite request.
    pub system_prompt: String,
}

/// The subset of a [`Character`] shown to the model alongside the article.
#[derive(Debug, Serialize)]
pub struct Persona<'a> {
    name: &'a str,
    description: &'a str,
    few_shot_examples: &'a [serde_json::Value],
    tone_and_voice: &'a serde_json::Value,
    post_prompt: &'a str,
}

impl Character {
    /// Returns the persona fields sent to the model; the system prompt is
    /// sent separately.
    #[must_use]
    pub fn persona(&self) -> Persona<'_> {
        Persona {
            name: &self.name,
            description: &self.description,
            few_shot_examples: &self.few_shot_examples,
            tone_and_voice: &self.tone_and_voice,
            post_prompt: &self.post_prompt,
        }
    }
}

/// Inputs used to draft an article, kept so it can be regenerated later.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationLog {
    /// RFC 3339 time the generation started.
    pub timestamp: String,
    /// Template file name.
    pub template: String,
    /// The operator's brief.
    pub brief: String,
    /// Answers to the template parameters, keyed by prompt.
    #[serde(default)]
    pub user_params: Answers,
    /// Clarifying questions proposed by the model.
    #[serde(default)]
    pub llm_questions: Vec<String>,
    /// Answers to those questions, keyed by question.
    #[serde(default)]
    pub user_answers: Answers,
    /// Save name given to the article.
    #[serde(default)]
    pub title: String,
}
