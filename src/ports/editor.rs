//! Editor port for handing a drafted file to the operator.

use std::path::Path;

use thiserror::Error;

/// Failure to open a file in the external editor.
#[derive(Debug, Error)]
pub enum EditorError {
    /// The editor command was empty or could not be tokenized.
    #[error("invalid editor command {0:?}")]
    InvalidCommand(String),
    /// The editor process could not be started.
    #[error("failed to start editor {editor}: {source}")]
    Spawn {
        /// The program that was launched.
        editor: String,
        /// Underlying spawn error.
        #[source]
        source: std::io::Error,
    },
    /// The editor ran but exited unsuccessfully.
    #[error("editor {editor} exited with {}", exit_label(.code))]
    Exit {
        /// The program that was launched.
        editor: String,
        /// Exit code, absent when terminated by a signal.
        code: Option<i32>,
    },
}

fn exit_label(code: &Option<i32>) -> String {
    code.map_or_else(|| "no exit code".to_string(), |c| format!("code {c}"))
}

/// Opens files for interactive editing.
pub trait Editor: Send + Sync {
    /// Opens `path` and blocks until the operator closes the editor.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor cannot be launched or exits non-zero.
    fn open(&self, path: &Path) -> Result<(), EditorError>;
}
