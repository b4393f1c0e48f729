//! Live adapters for real external interactions.

pub mod clock;
pub mod editor;
pub mod filesystem;
pub mod llm;
pub mod prompt;

pub use clock::LiveClock;
pub use editor::ProcessEditor;
pub use filesystem::LiveFileSystem;
pub use llm::OpenRouterClient;
pub use prompt::TerminalPrompter;
