//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::ConsoleFormatter;
use crate::ProgressReporter;
use colored::Colorize;
use diagchat_application::{
    ChatCommand, ChatController, ChatState, NoProgress, ProgressNotifier,
};
use diagchat_domain::SessionId;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::path::PathBuf;

/// A `/command` typed at the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    New,
    List,
    Open(String),
    Rename(String),
    History,
    Session,
    Help,
    Quit,
    /// Known command typed without its argument.
    MissingArgument(&'static str),
    Unknown(String),
}

impl SlashCommand {
    /// Parse a line; `None` when it is a chat message rather than a command.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        let rest = line.strip_prefix('/')?;
        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };

        let command = match name {
            "new" | "n" => Self::New,
            "list" | "ls" => Self::List,
            "open" | "o" if arg.is_empty() => Self::MissingArgument("/open <name>"),
            "open" | "o" => Self::Open(arg.to_string()),
            "rename" if arg.is_empty() => Self::MissingArgument("/rename <name>"),
            "rename" => Self::Rename(arg.to_string()),
            "history" => Self::History,
            "session" => Self::Session,
            "help" | "h" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            _ => Self::Unknown(line.to_string()),
        };
        Some(command)
    }
}

/// Interactive chat REPL
pub struct ChatRepl {
    controller: ChatController,
    show_progress: bool,
    history_file: Option<PathBuf>,
}

impl ChatRepl {
    /// Create a new ChatRepl
    pub fn new(controller: ChatController) -> Self {
        Self {
            controller,
            show_progress: true,
            history_file: None,
        }
    }

    /// Set whether to show progress
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Use `path` for input history instead of the data-dir default
    pub fn with_history_file(mut self, path: Option<PathBuf>) -> Self {
        self.history_file = path;
        self
    }

    fn history_path(&self) -> Option<PathBuf> {
        self.history_file
            .clone()
            .or_else(|| dirs::data_dir().map(|p| p.join("diag-chat").join("history.txt")))
    }

    /// Run the interactive REPL, resuming `session` when given
    pub async fn run(&self, session: Option<SessionId>) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        let history_path = self.history_path();
        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        let mut state = self.controller.start(session);
        self.print_welcome(&state);

        loop {
            let readline = rl.readline(&Self::prompt(&state));

            match readline {
                Ok(line) => {
                    let line = line.trim();

                    if line.is_empty() {
                        continue;
                    }

                    let _ = rl.add_history_entry(line);

                    match SlashCommand::parse(line) {
                        Some(SlashCommand::Quit) => {
                            println!("Bye!");
                            break;
                        }
                        Some(command) => state = self.handle_command(state, command).await,
                        None => state = self.process_message(state, line).await,
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn prompt(state: &ChatState) -> String {
        let name = state
            .listing
            .display_name_of(&state.session_id)
            .unwrap_or(state.session_id.as_str());
        format!("{}> ", name)
    }

    fn print_welcome(&self, state: &ChatState) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│         diag-chat - Diagnostic Chat          │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("{}", Self::current_session(state));
        if !state.transcript.is_empty() {
            println!();
            println!("{}", ConsoleFormatter::transcript(&state.transcript));
        }
        Self::print_status(state);
        println!();
        println!("Type /help for commands.");
        println!();
    }

    fn print_help() {
        println!();
        println!("Commands:");
        println!("  /new               - Start a new chat");
        println!("  /list              - List saved chats");
        println!("  /open <name>       - Switch to a chat by name or id");
        println!("  /rename <name>     - Rename the current chat");
        println!("  /history           - Show the current conversation");
        println!("  /session           - Show the current chat id");
        println!("  /help, /h, /?      - Show this help");
        println!("  /quit, /exit, /q   - Exit chat");
        println!();
    }

    fn current_session(state: &ChatState) -> String {
        let name = state
            .listing
            .display_name_of(&state.session_id)
            .unwrap_or(state.session_id.as_str());
        ConsoleFormatter::session_line(&state.session_id, name)
    }

    fn print_status(state: &ChatState) {
        if let Some(status) = &state.status {
            println!("{}", ConsoleFormatter::status(status));
        }
    }

    async fn apply(&self, state: ChatState, command: ChatCommand) -> ChatState {
        let progress: Box<dyn ProgressNotifier> = if self.show_progress {
            Box::new(ProgressReporter::new())
        } else {
            Box::new(NoProgress)
        };
        self.controller.apply(state, command, progress.as_ref()).await
    }

    async fn handle_command(&self, state: ChatState, command: SlashCommand) -> ChatState {
        match command {
            SlashCommand::New => {
                let state = self.apply(state, ChatCommand::NewChat).await;
                Self::print_status(&state);
                println!("Started new chat {}", state.session_id.to_string().bold());
                state
            }
            SlashCommand::List => {
                let state = self.apply(state, ChatCommand::Refresh).await;
                println!(
                    "{}",
                    ConsoleFormatter::listing(&state.listing, Some(&state.session_id))
                );
                Self::print_status(&state);
                state
            }
            SlashCommand::Open(choice) => {
                let state = self.apply(state, ChatCommand::Select(choice)).await;
                if state.status.as_ref().is_some_and(|s| s.is_error()) {
                    Self::print_status(&state);
                } else {
                    println!("{}", Self::current_session(&state));
                    println!();
                    println!("{}", ConsoleFormatter::transcript(&state.transcript));
                }
                state
            }
            SlashCommand::Rename(name) => {
                let state = self
                    .apply(state.select_current(), ChatCommand::Rename(name))
                    .await;
                Self::print_status(&state);
                state
            }
            SlashCommand::History => {
                println!();
                println!("{}", ConsoleFormatter::transcript(&state.transcript));
                state
            }
            SlashCommand::Session => {
                println!("{}", Self::current_session(&state));
                state
            }
            SlashCommand::Help => {
                Self::print_help();
                state
            }
            SlashCommand::Quit => state,
            SlashCommand::MissingArgument(usage) => {
                println!("Usage: {}", usage);
                state
            }
            SlashCommand::Unknown(cmd) => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
                state
            }
        }
    }

    async fn process_message(&self, state: ChatState, text: &str) -> ChatState {
        let state = self.apply(state, ChatCommand::Submit(text.to_string())).await;

        match (&state.status, state.last_reply()) {
            (Some(status), _) if status.is_error() => Self::print_status(&state),
            (_, Some(reply)) => println!("{}", ConsoleFormatter::reply(reply)),
            _ => {}
        }
        state
    }
}
