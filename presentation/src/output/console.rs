//! Console output formatter

use colored::Colorize;
use diagchat_application::Status;
use diagchat_domain::{Message, Role, SessionId, SessionListing};

/// Formats transcripts, listings and status lines for the terminal
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// One message with a role label.
    pub fn message(message: &Message) -> String {
        let label = match message.role {
            Role::User => "You:".green().bold(),
            Role::Assistant => "Assistant:".cyan().bold(),
            Role::System => "System:".dimmed(),
        };
        format!("{}\n{}\n", label, Self::indent(&message.content, "  "))
    }

    /// Whole conversation, oldest first.
    pub fn transcript(history: &[Message]) -> String {
        if history.is_empty() {
            return format!("{}\n", "(no messages yet)".dimmed());
        }
        history
            .iter()
            .map(Self::message)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// A reply as printed after each question.
    pub fn reply(text: &str) -> String {
        format!("\n{}\n", text)
    }

    /// Session picker contents. Duplicated display names get their
    /// identifier appended so they can be told apart.
    pub fn listing(listing: &SessionListing, current: Option<&SessionId>) -> String {
        if listing.is_empty() {
            return format!("{}\n", "No saved chats.".dimmed());
        }

        let mut output = Self::section_header("Chats");
        for entry in listing.entries() {
            let marker = if Some(&entry.id) == current {
                "*".green().bold().to_string()
            } else {
                " ".to_string()
            };
            let name = if listing.is_ambiguous(&entry.display_name) {
                format!("{} {}", entry.display_name, format!("({})", entry.id).dimmed())
            } else {
                entry.display_name.clone()
            };
            output.push_str(&format!("{} {}\n", marker, name));
        }
        output
    }

    /// Status line produced by a chat command.
    pub fn status(status: &Status) -> String {
        match status {
            Status::Info(msg) => msg.green().to_string(),
            Status::Error(msg) => msg.red().to_string(),
        }
    }

    /// Identifier and display name of the current session.
    pub fn session_line(id: &SessionId, display_name: &str) -> String {
        if display_name == id.as_str() {
            format!("{} {}", "Session:".bold(), id)
        } else {
            format!("{} {} {}", "Session:".bold(), display_name, format!("({})", id).dimmed())
        }
    }

    pub fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diagchat_domain::ListedSession;

    fn plain() {
        colored::control::set_override(false);
    }

    fn id(raw: &str) -> SessionId {
        SessionId::new(raw).unwrap()
    }

    fn entry(name: &str, raw: &str) -> ListedSession {
        ListedSession {
            display_name: name.to_string(),
            id: id(raw),
        }
    }

    #[test]
    fn test_transcript_labels_roles() {
        plain();
        let out = ConsoleFormatter::transcript(&[
            Message::user("check engine light"),
            Message::assistant("Try scanning codes.\nThen check plugs."),
        ]);
        assert!(out.contains("You:\n  check engine light"));
        assert!(out.contains("Assistant:\n  Try scanning codes.\n  Then check plugs."));
    }

    #[test]
    fn test_empty_transcript() {
        plain();
        assert!(ConsoleFormatter::transcript(&[]).contains("no messages yet"));
    }

    #[test]
    fn test_listing_marks_current_and_duplicates() {
        plain();
        let listing = SessionListing::new(vec![
            entry("Brakes", "aaaa1111"),
            entry("Brakes", "bbbb2222"),
            entry("Misfire", "cccc3333"),
        ]);

        let out = ConsoleFormatter::listing(&listing, Some(&id("cccc3333")));

        assert!(out.contains("  Brakes (aaaa1111)"));
        assert!(out.contains("  Brakes (bbbb2222)"));
        assert!(out.contains("* Misfire"));
        assert!(!out.contains("(cccc3333)"));
    }

    #[test]
    fn test_empty_listing() {
        plain();
        let out = ConsoleFormatter::listing(&SessionListing::default(), None);
        assert!(out.contains("No saved chats."));
    }

    #[test]
    fn test_session_line() {
        plain();
        assert_eq!(
            ConsoleFormatter::session_line(&id("abc123"), "abc123"),
            "Session: abc123"
        );
        assert_eq!(
            ConsoleFormatter::session_line(&id("abc123"), "Brake Issue"),
            "Session: Brake Issue (abc123)"
        );
    }

    #[test]
    fn test_indent() {
        assert_eq!(ConsoleFormatter::indent("a\nb", "> "), "> a\n> b");
    }
}
