//! Live editor adapter that launches an external program.

use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::ports::editor::{Editor, EditorError};

/// Opens files with an external editor command such as `hx` or `code --wait`.
///
/// The command string is split with shell quoting rules; the file path is
/// appended as the final argument. The child inherits the terminal.
pub struct ProcessEditor {
    command: String,
}

impl ProcessEditor {
    /// Creates an editor adapter for the given command line.
    pub fn new(command: impl Into<String>) -> Self {
        Self { command: command.into() }
    }
}

impl Editor for ProcessEditor {
    fn open(&self, path: &Path) -> Result<(), EditorError> {
        let words = shell_words::split(&self.command)
            .map_err(|_| EditorError::InvalidCommand(self.command.clone()))?;
        let Some((program, args)) = words.split_first() else {
            return Err(EditorError::InvalidCommand(self.command.clone()));
        };

        debug!(editor = %program, path = %path.display(), "opening editor");
        let status = Command::new(program)
            .args(args)
            .arg(path)
            .status()
            .map_err(|source| EditorError::Spawn { editor: program.clone(), source })?;

        if status.success() {
            Ok(())
        } else {
            Err(EditorError::Exit { editor: program.clone(), code: status.code() })
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn successful_editor_returns_ok() {
        let editor = ProcessEditor::new("true");
        assert!(editor.open(Path::new("draft.md")).is_ok());
    }

    #[test]
    fn editor_receives_path_after_its_own_arguments() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("opened.txt");
        let command = format!("sh -c 'echo \"$0\" > {}'", marker.display());

        ProcessEditor::new(command).open(Path::new("draft.md")).unwrap();

        let written = std::fs::read_to_string(&marker).unwrap();
        assert_eq!(written.trim(), "draft.md");
    }

    #[test]
    fn non_zero_exit_is_reported_with_code() {
        let err = ProcessEditor::new("sh -c 'exit 3'").open(Path::new("x.md")).unwrap_err();
        assert!(matches!(err, EditorError::Exit { code: Some(3), .. }));
    }

    #[test]
    fn missing_program_is_a_spawn_error() {
        let err =
            ProcessEditor::new("scribe-no-such-editor").open(Path::new("x.md")).unwrap_err();
        assert!(matches!(err, EditorError::Spawn { .. }));
        assert!(err.to_string().contains("scribe-no-such-editor"));
    }

    #[test]
    fn empty_command_is_invalid() {
        let err = ProcessEditor::new("   ").open(Path::new("x.md")).unwrap_err();
        assert!(matches!(err, EditorError::InvalidCommand(_)));
    }
}
