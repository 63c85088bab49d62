//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for diag-chat
#[derive(Parser, Debug)]
#[command(name = "diag-chat")]
#[command(author, version, about = "Automotive diagnostic chat backed by a hosted LLM")]
#[command(long_about = r#"
diag-chat keeps persistent conversations with a hosted chat model.
Each conversation is a session stored as JSON under the sessions
directory; sessions can be given display names and resumed later.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./diag-chat.toml    Project-level config
3. ~/.config/diag-chat/config.toml   Global config

The endpoint, key and model can also come from the environment:
GROQ_API_ENDPOINT, GROQ_API_KEY, MODEL_NAME.

Example:
  diag-chat "My check engine light is flashing"
  diag-chat --session 1a2b3c4d "And the car shakes at idle"
  diag-chat --list
  diag-chat --rename 1a2b3c4d "Misfire"
  diag-chat --chat
"#)]
pub struct Cli {
    /// Question to send (omit to start the chat REPL)
    pub question: Option<String>,

    /// Session to continue (a new one is created when omitted)
    #[arg(short, long, value_name = "ID")]
    pub session: Option<String>,

    /// Start interactive chat mode
    #[arg(short, long)]
    pub chat: bool,

    /// List stored sessions and exit
    #[arg(short, long)]
    pub list: bool,

    /// Set the display name of a session and exit
    #[arg(long, num_args = 2, value_names = ["ID", "NAME"])]
    pub rename: Option<Vec<String>>,

    /// Send requests without the system prompt
    #[arg(long)]
    pub no_prompt: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// `(id, name)` pair given to `--rename`.
    pub fn rename_args(&self) -> Option<(&str, &str)> {
        match self.rename.as_deref() {
            Some([id, name]) => Some((id.as_str(), name.as_str())),
            _ => None,
        }
    }

    /// Whether to enter the REPL rather than answer one question.
    pub fn is_interactive(&self) -> bool {
        self.chat || self.question.is_none()
    }
}
