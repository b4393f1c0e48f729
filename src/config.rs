//! Runtime configuration.
//!
//! A [`Config`] is built once at startup and passed down explicitly. Values
//! are layered: built-in defaults, then `<root>/scribe.yaml` (unknown keys
//! ignored, missing keys defaulted), then `SCRIBE_*` environment variables,
//! then command-line flags. Content directories are resolved against the
//! root directory.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::adapters::live::llm::OPENROUTER_API_URL;
use crate::completion::{RetryPolicy, DEFAULT_BACKOFF, DEFAULT_TIMEOUT, MAX_RETRIES};
use crate::ports::filesystem::FileSystem;

/// Environment variable holding the bearer credential.
pub const CREDENTIAL_VAR: &str = "OPENROUTER_API_KEY";
/// Name of the optional configuration file inside the root directory.
pub const CONFIG_FILE: &str = "scribe.yaml";
/// Model used when a request does not name one.
pub const DEFAULT_MODEL: &str = "mistralai/mixtral-8x22b-instruct";
/// Editor launched for "Open editor?".
pub const DEFAULT_EDITOR: &str = "hx";

/// Configuration errors; all are fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The credential variable is unset or empty.
    #[error("{0} not found in environment or .env")]
    MissingCredential(&'static str),
    /// The configuration file exists but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The configuration file is not valid YAML for [`Config`].
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying YAML error.
        #[source]
        source: serde_yaml::Error,
    },
}

/// Settings for the chat completion endpoint and retry loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionConfig {
    /// Chat completions endpoint URL.
    pub api_url: String,
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Per-attempt timeout in milliseconds.
    pub timeout_ms: u64,
    /// Fixed wait between attempts in milliseconds.
    pub backoff_ms: u64,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            api_url: OPENROUTER_API_URL.to_string(),
            max_retries: MAX_RETRIES,
            timeout_ms: u64::try_from(DEFAULT_TIMEOUT.as_millis()).unwrap_or(u64::MAX),
            backoff_ms: u64::try_from(DEFAULT_BACKOFF.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

impl CompletionConfig {
    /// Returns the retry policy described by these settings.
    #[must_use]
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.max_retries,
            timeout: Duration::from_millis(self.timeout_ms),
            backoff: Duration::from_millis(self.backoff_ms),
        }
    }
}

/// Resolved configuration for one run of the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default model identifier.
    pub model: String,
    /// Editor command line.
    pub editor: String,
    /// Directory of `*.md` article templates.
    pub templates_dir: PathBuf,
    /// Directory for drafts and generation logs.
    pub output_dir: PathBuf,
    /// Directory for character-refined articles.
    pub completed_dir: PathBuf,
    /// Directory of `*.json` character definitions.
    pub characters_dir: PathBuf,
    /// Endpoint and retry settings.
    pub completion: CompletionConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            editor: DEFAULT_EDITOR.to_string(),
            templates_dir: PathBuf::from("templates"),
            output_dir: PathBuf::from("generated"),
            completed_dir: PathBuf::from("completed"),
            characters_dir: PathBuf::from("characters"),
            completion: CompletionConfig::default(),
        }
    }
}

impl Config {
    /// Loads `<root>/scribe.yaml` if present, otherwise the defaults, and
    /// resolves content directories against `root`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(fs: &dyn FileSystem, root: &Path) -> Result<Self, ConfigError> {
        let path = root.join(CONFIG_FILE);
        let config = if fs.exists(&path) {
            let contents = fs
                .read_to_string(&path)
                .map_err(|source| ConfigError::Read { path: path.clone(), source })?;
            if contents.trim().is_empty() {
                Self::default()
            } else {
                serde_yaml::from_str(&contents)
                    .map_err(|source| ConfigError::Parse { path: path.clone(), source })?
            }
        } else {
            Self::default()
        };
        Ok(config.rooted_at(root))
    }

    /// Applies `SCRIBE_MODEL` and `SCRIBE_EDITOR` overrides from `lookup`.
    #[must_use]
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(model) = lookup("SCRIBE_MODEL").filter(|v| !v.is_empty()) {
            self.model = model;
        }
        if let Some(editor) = lookup("SCRIBE_EDITOR").filter(|v| !v.is_empty()) {
            self.editor = editor;
        }
        self
    }

    /// Applies command-line overrides.
    #[must_use]
    pub fn with_overrides(mut self, model: Option<&str>, editor: Option<&str>) -> Self {
        if let Some(model) = model {
            self.model = model.to_string();
        }
        if let Some(editor) = editor {
            self.editor = editor.to_string();
        }
        self
    }

    fn rooted_at(mut self, root: &Path) -> Self {
        for dir in [
            &mut self.templates_dir,
            &mut self.output_dir,
            &mut self.completed_dir,
            &mut self.characters_dir,
        ] {
            if dir.is_relative() {
                *dir = root.join(&*dir);
            }
        }
        self
    }
}

/// Reads the bearer credential through `lookup`.
///
/// # Errors
///
/// Returns [`ConfigError::MissingCredential`] when the variable is unset or
/// empty.
pub fn credential(lookup: impl Fn(&str) -> Option<String>) -> Result<String, ConfigError> {
    lookup(CREDENTIAL_VAR)
        .filter(|key| !key.is_empty())
        .ok_or(ConfigError::MissingCredential(CREDENTIAL_VAR))
}
