//! System prompt loading from the local file system.

mod file_prompt;

pub use file_prompt::FilePromptSource;
