//! Shared test doubles for ports and observers.

use std::collections::{HashMap, VecDeque};
use std::io::{self, Cursor, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use tokio::time::Instant;

use crate::adapters::live::{LiveFileSystem, TerminalPrompter};
use crate::completion::AttemptObserver;
use crate::context::ServiceContext;
use crate::ports::editor::{Editor, EditorError};
use crate::ports::llm::{
    ChatMessage, Choice, CompletionError, CompletionRequest, CompletionResponse, LlmClient,
    LlmFuture, Usage,
};
use crate::ports::{Clock, FileSystem};

/// Paused-clock timers resolve on millisecond ticks.
pub(crate) fn assert_close(actual: Duration, expected: Duration) {
    assert!(
        actual >= expected && actual < expected + Duration::from_millis(5),
        "expected ~{expected:?}, got {actual:?}"
    );
}

/// Builds a one-choice assistant response.
pub(crate) fn reply(content: &str) -> CompletionResponse {
    CompletionResponse {
        id: Some("gen-test".into()),
        model: Some("test/model".into()),
        choices: vec![Choice { message: ChatMessage::assistant(content), finish_reason: None }],
        usage: Some(Usage { prompt_tokens: 12, completion_tokens: 8, total_tokens: 20 }),
    }
}

/// The instant every [`FixedClock`] reports.
pub(crate) fn fixed_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 10, 30, 0).unwrap()
}

/// Clock frozen at [`fixed_instant`].
pub(crate) struct FixedClock;

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        fixed_instant()
    }
}

/// One scripted outcome of an [`LlmClient::complete`] call.
#[derive(Clone)]
pub(crate) enum Step {
    Reply(CompletionResponse),
    Fail(CompletionError),
    Hang,
}

/// LLM client that plays back a fixed script and records every request.
#[derive(Clone)]
pub(crate) struct ScriptedLlm {
    script: Arc<Mutex<VecDeque<Step>>>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl ScriptedLlm {
    pub(crate) fn new(script: Vec<Step>) -> Self {
        Self {
            script: Arc::new(Mutex::new(script.into())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub(crate) fn replies(contents: &[&str]) -> Self {
        Self::new(contents.iter().map(|c| Step::Reply(reply(c))).collect())
    }

    pub(crate) fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub(crate) fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl LlmClient for ScriptedLlm {
    fn complete(&self, request: &CompletionRequest) -> LlmFuture<'_> {
        self.requests.lock().unwrap().push(request.clone());
        let step = self.script.lock().unwrap().pop_front();
        Box::pin(async move {
            match step {
                Some(Step::Reply(response)) => Ok(response),
                Some(Step::Fail(error)) => Err(error),
                Some(Step::Hang) => std::future::pending().await,
                None => Err(CompletionError::Network("script exhausted".into())),
            }
        })
    }
}

/// Observer that logs attempt boundaries as strings plus start instants.
#[derive(Clone, Default)]
pub(crate) struct RecordingObserver {
    events: Arc<Mutex<Vec<String>>>,
    starts: Arc<Mutex<Vec<Instant>>>,
}

impl RecordingObserver {
    pub(crate) fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    pub(crate) fn attempt_starts(&self) -> Vec<Instant> {
        self.starts.lock().unwrap().clone()
    }

    pub(crate) fn retries(&self) -> usize {
        self.events().iter().filter(|e| e.starts_with("retry:")).count()
    }

    pub(crate) fn failures(&self) -> usize {
        self.events().iter().filter(|e| e.starts_with("failure:")).count()
    }
}

impl AttemptObserver for RecordingObserver {
    fn on_attempt_start(&self, attempt: u32, _request: &CompletionRequest) {
        self.starts.lock().unwrap().push(Instant::now());
        self.events.lock().unwrap().push(format!("start:{attempt}"));
    }

    fn on_success(&self, attempt: u32, _response: &CompletionResponse) {
        self.events.lock().unwrap().push(format!("success:{attempt}"));
    }

    fn on_failure(&self, attempt: u32, error: &CompletionError) {
        self.events.lock().unwrap().push(format!("failure:{attempt}:{error}"));
    }

    fn on_retry(&self, next_attempt: u32, _max_retries: u32, _backoff: Duration) {
        self.events.lock().unwrap().push(format!("retry:{next_attempt}"));
    }
}

/// Editor that records opened paths instead of launching anything.
#[derive(Clone, Default)]
pub(crate) struct RecordingEditor {
    opened: Arc<Mutex<Vec<PathBuf>>>,
}

impl RecordingEditor {
    pub(crate) fn opened(&self) -> Vec<PathBuf> {
        self.opened.lock().unwrap().clone()
    }
}

impl Editor for RecordingEditor {
    fn open(&self, path: &Path) -> Result<(), EditorError> {
        self.opened.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }
}

/// Cloneable in-memory sink for prompter output.
#[derive(Clone, Default)]
pub(crate) struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub(crate) fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// In-memory filesystem for exercising the store without touching disk.
#[derive(Default)]
pub(crate) struct MemFs {
    files: Mutex<HashMap<PathBuf, String>>,
}

impl MemFs {
    pub(crate) fn with_files(files: &[(&str, &str)]) -> Self {
        let fs = Self::default();
        for (path, contents) in files {
            fs.write(Path::new(path), contents).unwrap();
        }
        fs
    }
}

impl FileSystem for MemFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let files = self.files.lock().unwrap();
        files.get(path).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("File not found: {}", path.display()))
        })
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        let mut files = self.files.lock().unwrap();
        files.insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let files = self.files.lock().unwrap();
        // A directory exists when any file lives under it.
        files.contains_key(path) || files.keys().any(|k| k.starts_with(path) && k != path)
    }

    fn list_dir(&self, path: &Path) -> io::Result<Vec<String>> {
        let files = self.files.lock().unwrap();
        let mut names: Vec<String> = files
            .keys()
            .filter(|k| k.parent() == Some(path))
            .filter_map(|k| k.file_name().map(|n| n.to_string_lossy().into_owned()))
            .collect();
        names.sort();
        Ok(names)
    }
}

/// Handles onto the doubles wired into a [`test_context`].
pub(crate) struct Harness {
    pub(crate) output: SharedBuffer,
    pub(crate) editor: RecordingEditor,
}

/// Builds a context over the real filesystem with scripted model replies,
/// a fixed clock, and terminal input taken from `input`.
pub(crate) fn test_context(llm: ScriptedLlm, input: &str) -> (ServiceContext, Harness) {
    let output = SharedBuffer::default();
    let editor = RecordingEditor::default();
    let ctx = ServiceContext {
        clock: Box::new(FixedClock),
        fs: Box::new(LiveFileSystem),
        llm: Box::new(llm),
        editor: Box::new(editor.clone()),
        prompt: Box::new(TerminalPrompter::new(
            Cursor::new(input.as_bytes().to_vec()),
            output.clone(),
        )),
    };
    (ctx, Harness { output, editor })
}
