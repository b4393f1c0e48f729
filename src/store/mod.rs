//! Content store: templates, articles, characters, and generation logs.
//!
//! All I/O goes through the `FileSystem` port and all timestamps through the
//! `Clock` port. Directory layout (each directory configurable):
//!
//! ```text
//! <root>/
//!   ├── templates/    *.md with front matter (user_params)
//!   ├── generated/    drafted *.md and generation_log_*.json
//!   ├── completed/    character-refined *.md
//!   └── characters/   *.json personas
//! ```

pub mod front_matter;
pub mod records;

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::config::Config;
use crate::context::ServiceContext;
use crate::ports::clock::{file_timestamp, iso_timestamp};

pub use records::{
    Answers, Article, ArticleFrontMatter, Character, GenerationLog, Persona, Template, TemplateParams,
};

const LOG_PREFIX: &str = "generation_log_";

/// Failures reading or writing content files.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The named record does not exist.
    #[error("{kind} {name} not found")]
    NotFound {
        /// Record kind, e.g. `"Template"`.
        kind: &'static str,
        /// File name that was requested.
        name: String,
    },
    /// A filesystem operation failed.
    #[error("failed to {action} {}: {source}", path.display())]
    Io {
        /// What was being attempted.
        action: &'static str,
        /// Path involved.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// A file was read but its contents are malformed.
    #[error("failed to parse {}: {message}", path.display())]
    Parse {
        /// Path of the malformed file.
        path: PathBuf,
        /// Parser message.
        message: String,
    },
    /// A record could not be serialized for writing.
    #[error("failed to encode {kind}: {message}")]
    Encode {
        /// Record kind.
        kind: &'static str,
        /// Serializer message.
        message: String,
    },
}

/// Destination directory for an article.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shelf {
    /// Freshly generated drafts (the output directory).
    Drafts,
    /// Character-refined articles (the completed directory).
    Completed,
}

/// Persistence layer for templates, articles, characters, and logs.
pub struct ContentStore<'a> {
    ctx: &'a ServiceContext,
    config: &'a Config,
}

impl<'a> ContentStore<'a> {
    /// Creates a store over the directories named in `config`.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext, config: &'a Config) -> Self {
        Self { ctx, config }
    }

    /// Lists template files (`*.md`).
    ///
    /// # Errors
    ///
    /// Returns an error if the templates directory cannot be listed.
    pub fn list_templates(&self) -> Result<Vec<String>, StoreError> {
        self.list(&self.config.templates_dir, |name| name.ends_with(".md"))
    }

    /// Lists drafted articles (`*.md` in the output directory).
    ///
    /// # Errors
    ///
    /// Returns an error if the output directory cannot be listed.
    pub fn list_articles(&self) -> Result<Vec<String>, StoreError> {
        self.list(&self.config.output_dir, |name| name.ends_with(".md"))
    }

    /// Lists character files (`*.json`).
    ///
    /// # Errors
    ///
    /// Returns an error if the characters directory cannot be listed.
    pub fn list_characters(&self) -> Result<Vec<String>, StoreError> {
        self.list(&self.config.characters_dir, |name| name.ends_with(".json"))
    }

    /// Lists generation logs (`generation_log_*.json` in the output directory).
    ///
    /// # Errors
    ///
    /// Returns an error if the output directory cannot be listed.
    pub fn list_generation_logs(&self) -> Result<Vec<String>, StoreError> {
        self.list(&self.config.output_dir, |name| {
            name.starts_with(LOG_PREFIX) && name.ends_with(".json")
        })
    }

    /// Reads a template and its `user_params` front matter.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the template does not exist, or a
    /// parse error for malformed front matter.
    pub fn read_template(&self, name: &str) -> Result<Template, StoreError> {
        let path = self.config.templates_dir.join(name);
        let source = self.read("Template", name, &path)?;
        let doc = front_matter::parse::<TemplateParams>(&source)
            .map_err(|e| StoreError::Parse { path, message: e.to_string() })?;
        Ok(Template { params: doc.front, content: doc.body })
    }

    /// Reads a drafted article from the output directory.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the article does not exist, or a
    /// parse error for malformed front matter.
    pub fn read_article(&self, name: &str) -> Result<Article, StoreError> {
        let path = self.config.output_dir.join(name);
        let source = self.read("Article", name, &path)?;
        let doc = front_matter::parse::<ArticleFrontMatter>(&source)
            .map_err(|e| StoreError::Parse { path, message: e.to_string() })?;
        Ok(Article { front: doc.front, content: doc.body })
    }

    /// Reads a character definition.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the file does not exist, or a
    /// parse error for invalid JSON.
    pub fn read_character(&self, name: &str) -> Result<Character, StoreError> {
        let path = self.config.characters_dir.join(name);
        let source = self.read("Character", name, &path)?;
        serde_json::from_str(&source).map_err(|e| StoreError::Parse { path, message: e.to_string() })
    }

    /// Reads a generation log from the output directory.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the log does not exist, or a
    /// parse error for invalid JSON.
    pub fn read_generation_log(&self, name: &str) -> Result<GenerationLog, StoreError> {
        let path = self.config.output_dir.join(name);
        let source = self.read("Generation log", name, &path)?;
        serde_json::from_str(&source).map_err(|e| StoreError::Parse { path, message: e.to_string() })
    }

    /// Writes `log` as pretty JSON to `generation_log_<timestamp>.json` in
    /// the output directory and returns the path.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or writing fails.
    pub fn write_generation_log(&self, log: &GenerationLog) -> Result<PathBuf, StoreError> {
        let json = serde_json::to_string_pretty(log).map_err(|e| StoreError::Encode {
            kind: "generation log",
            message: e.to_string(),
        })?;
        let stamp = file_timestamp(self.ctx.clock.now());
        let path = self.config.output_dir.join(format!("{LOG_PREFIX}{stamp}.json"));
        self.write(&path, &json)?;
        debug!(path = %path.display(), "wrote generation log");
        Ok(path)
    }

    /// Writes an article with `title`/`date`/`created_at` front matter to
    /// `<timestamp>_<sanitized title>.md` on the given shelf and returns the
    /// path.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or writing fails.
    pub fn write_article(
        &self,
        content: &str,
        shelf: Shelf,
        title: Option<&str>,
    ) -> Result<PathBuf, StoreError> {
        let now = self.ctx.clock.now();
        let stamp = file_timestamp(now);
        let title = title.filter(|t| !t.is_empty());

        let front = ArticleFrontMatter {
            title: Some(title.unwrap_or("Untitled").to_string()),
            date: Some(iso_timestamp(now)),
            created_at: Some(stamp.clone()),
        };
        let document = front_matter::render(&front, content)
            .map_err(|e| StoreError::Encode { kind: "article", message: e.to_string() })?;

        let slug = title.map_or_else(|| "untitled".to_string(), sanitize_title);
        let path = self.shelf_dir(shelf).join(format!("{stamp}_{slug}.md"));
        self.write(&path, &document)?;
        debug!(path = %path.display(), "wrote article");
        Ok(path)
    }

    /// Returns the current time formatted for a generation log.
    #[must_use]
    pub fn timestamp(&self) -> String {
        iso_timestamp(self.ctx.clock.now())
    }

    fn shelf_dir(&self, shelf: Shelf) -> &Path {
        match shelf {
            Shelf::Drafts => &self.config.output_dir,
            Shelf::Completed => &self.config.completed_dir,
        }
    }

    fn list(&self, dir: &Path, keep: impl Fn(&str) -> bool) -> Result<Vec<String>, StoreError> {
        if !self.ctx.fs.exists(dir) {
            return Ok(Vec::new());
        }
        let entries = self.ctx.fs.list_dir(dir).map_err(|source| StoreError::Io {
            action: "list",
            path: dir.to_path_buf(),
            source,
        })?;
        Ok(entries.into_iter().filter(|name| keep(name)).collect())
    }

    fn read(&self, kind: &'static str, name: &str, path: &Path) -> Result<String, StoreError> {
        self.ctx.fs.read_to_string(path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                StoreError::NotFound { kind, name: name.to_string() }
            } else {
                StoreError::Io { action: "read", path: path.to_path_buf(), source }
            }
        })
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), StoreError> {
        self.ctx.fs.write(path, contents).map_err(|source| StoreError::Io {
            action: "write",
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Replaces every character outside `[A-Za-z0-9]` with `_` and lowercases.
#[must_use]
pub fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{test_context, FixedClock, MemFs, ScriptedLlm};

    fn mem_context(fs: MemFs) -> ServiceContext {
        let (mut ctx, _) = test_context(ScriptedLlm::new(vec![]), "");
        ctx.fs = Box::new(fs);
        ctx.clock = Box::new(FixedClock);
        ctx
    }

    fn config() -> Config {
        Config {
            templates_dir: PathBuf::from("/site/templates"),
            output_dir: PathBuf::from("/site/generated"),
            completed_dir: PathBuf::from("/site/completed"),
            characters_dir: PathBuf::from("/site/characters"),
            ..Config::default()
        }
    }

    #[test]
    fn sanitize_title_matches_file_name_rules() {
        assert_eq!(sanitize_title("My First Post!"), "my_first_post_");
        assert_eq!(sanitize_title("Rust 2024: été"), "rust_2024___t_");
    }

    #[test]
    fn lists_filter_by_kind() {
        let ctx = mem_context(MemFs::with_files(&[
            ("/site/templates/howto.md", ""),
            ("/site/templates/notes.txt", ""),
            ("/site/generated/2024_post.md", ""),
            ("/site/generated/generation_log_2024.json", ""),
            ("/site/generated/other.json", ""),
            ("/site/characters/ada.json", ""),
            ("/site/characters/readme.md", ""),
        ]));
        let config = config();
        let store = ContentStore::new(&ctx, &config);

        assert_eq!(store.list_templates().unwrap(), vec!["howto.md"]);
        assert_eq!(store.list_articles().unwrap(), vec!["2024_post.md"]);
        assert_eq!(store.list_characters().unwrap(), vec!["ada.json"]);
        assert_eq!(store.list_generation_logs().unwrap(), vec!["generation_log_2024.json"]);
    }

    #[test]
    fn missing_directories_list_as_empty() {
        let ctx = mem_context(MemFs::default());
        let config = config();
        let store = ContentStore::new(&ctx, &config);

        assert!(store.list_templates().unwrap().is_empty());
        assert!(store.list_generation_logs().unwrap().is_empty());
    }

    #[test]
    fn reads_template_params_and_body() {
        let ctx = mem_context(MemFs::with_files(&[(
            "/site/templates/howto.md",
            "---\nuser_params:\n  - Who is the audience?\n  - What is the product?\n---\n# How to {thing}\n",
        )]));
        let config = config();
        let store = ContentStore::new(&ctx, &config);

        let template = store.read_template("howto.md").unwrap();
        assert_eq!(
            template.params.user_params,
            vec!["Who is the audience?", "What is the product?"]
        );
        assert_eq!(template.content, "# How to {thing}\n");
    }

    #[test]
    fn template_without_front_matter_has_no_params() {
        let ctx = mem_context(MemFs::with_files(&[("/site/templates/plain.md", "# Plain\n")]));
        let config = config();
        let store = ContentStore::new(&ctx, &config);

        let template = store.read_template("plain.md").unwrap();
        assert!(template.params.user_params.is_empty());
        assert_eq!(template.content, "# Plain\n");
    }

    #[test]
    fn missing_records_are_not_found() {
        let ctx = mem_context(MemFs::default());
        let config = config();
        let store = ContentStore::new(&ctx, &config);

        let err = store.read_template("gone.md").unwrap_err();
        assert!(matches!(err, StoreError::NotFound { kind: "Template", .. }));
        assert_eq!(err.to_string(), "Template gone.md not found");

        assert!(matches!(store.read_character("x.json"), Err(StoreError::NotFound { .. })));
        assert!(matches!(store.read_generation_log("y.json"), Err(StoreError::NotFound { .. })));
        assert!(matches!(store.read_article("z.md"), Err(StoreError::NotFound { .. })));
    }

    #[test]
    fn malformed_character_is_a_parse_error() {
        let ctx = mem_context(MemFs::with_files(&[("/site/characters/bad.json", "{not json")]));
        let config = config();
        let store = ContentStore::new(&ctx, &config);

        let err = store.read_character("bad.json").unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }));
    }

    #[test]
    fn write_article_names_file_by_time_and_title() {
        let ctx = mem_context(MemFs::default());
        let config = config();
        let store = ContentStore::new(&ctx, &config);

        let path = store.write_article("# Draft\n", Shelf::Drafts, Some("Launch Day!")).unwrap();

        assert_eq!(
            path,
            PathBuf::from("/site/generated/2024-06-15T10-30-00.000Z_launch_day_.md")
        );
        let written = ctx.fs.read_to_string(&path).unwrap();
        let doc = front_matter::parse::<ArticleFrontMatter>(&written).unwrap();
        assert_eq!(doc.front.title.as_deref(), Some("Launch Day!"));
        assert_eq!(doc.front.date.as_deref(), Some("2024-06-15T10:30:00.000Z"));
        assert_eq!(doc.front.created_at.as_deref(), Some("2024-06-15T10-30-00.000Z"));
        assert_eq!(doc.body, "# Draft\n");
    }

    #[test]
    fn untitled_article_goes_to_the_requested_shelf() {
        let ctx = mem_context(MemFs::default());
        let config = config();
        let store = ContentStore::new(&ctx, &config);

        for title in [None, Some("")] {
            let path = store.write_article("text", Shelf::Completed, title).unwrap();
            assert_eq!(
                path,
                PathBuf::from("/site/completed/2024-06-15T10-30-00.000Z_untitled.md")
            );
            let article = ctx.fs.read_to_string(&path).unwrap();
            assert!(article.contains("title: Untitled"));
        }
    }

    #[test]
    fn article_written_then_read_back() {
        let ctx = mem_context(MemFs::default());
        let config = config();
        let store = ContentStore::new(&ctx, &config);

        let path = store.write_article("Body text", Shelf::Drafts, Some("Notes")).unwrap();
        let name = path.file_name().unwrap().to_str().unwrap();
        let article = store.read_article(name).unwrap();

        assert_eq!(article.front.title.as_deref(), Some("Notes"));
        assert_eq!(article.content, "Body text\n");
    }

    #[test]
    fn generation_log_round_trips_through_disk_layout() {
        let ctx = mem_context(MemFs::default());
        let config = config();
        let store = ContentStore::new(&ctx, &config);
        let log = GenerationLog {
            timestamp: store.timestamp(),
            template: "howto.md".into(),
            brief: "teach retries".into(),
            title: "retries".into(),
            ..GenerationLog::default()
        };

        let path = store.write_generation_log(&log).unwrap();

        assert_eq!(
            path,
            PathBuf::from("/site/generated/generation_log_2024-06-15T10-30-00.000Z.json")
        );
        assert_eq!(store.list_generation_logs().unwrap().len(), 1);
        let name = path.file_name().unwrap().to_str().unwrap();
        assert_eq!(store.read_generation_log(name).unwrap(), log);
    }
}
