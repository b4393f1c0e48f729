//! Port traits defining external boundaries.
//!
//! Each trait is one seam between the drafting workflows and the outside
//! world (time, disk, the language model, the operator's terminal, and the
//! external editor). Implementations live in `src/adapters/`.

pub mod clock;
pub mod editor;
pub mod filesystem;
pub mod llm;
pub mod prompt;

pub use clock::Clock;
pub use editor::{Editor, EditorError};
pub use filesystem::FileSystem;
pub use llm::{
    ChatMessage, Choice, CompletionError, CompletionRequest, CompletionResponse, LlmClient,
    LlmFuture, Role, Usage,
};
pub use prompt::{PromptError, Prompter};
