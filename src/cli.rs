//! CLI argument definitions.

use std::path::PathBuf;

use clap::Parser;

/// Top-level CLI parser for `scribe`.
#[derive(Debug, Parser)]
#[command(name = "scribe", version, about = "Draft articles from templates with a language model")]
pub struct Cli {
    /// Directory holding templates, drafts, and characters.
    #[arg(long, default_value = ".")]
    pub root: PathBuf,
    /// Model identifier used when a request does not name one.
    #[arg(long)]
    pub model: Option<String>,
    /// Editor command used to open drafts.
    #[arg(long)]
    pub editor: Option<String>,
    /// Enable debug logging on stderr.
    #[arg(short, long)]
    pub verbose: bool,
    /// Echo messages sent to the model and its replies.
    #[arg(long)]
    pub transcript: bool,
}
