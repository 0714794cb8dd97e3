//! Slash command parsing

use chrono::NaiveDate;
use thiserror::Error;

use crate::planner::parse_due;
use crate::session::View;

/// A chat to switch to, by listing position or by name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThreadRef {
    Position(usize),
    Name(String),
}

/// One parsed line of REPL input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Help,
    Quit,
    Signup { email: String, password: String },
    Login { email: String, password: String },
    Logout,
    Whoami,
    New,
    Chats,
    Switch(ThreadRef),
    History,
    Save,
    Retry,
    View(View),
    Tasks,
    Add { text: String, due: Option<NaiveDate> },
    Done(usize),
    Delete(usize),
    /// Plain text, sent as a chat message
    Message(String),
}

impl ReplCommand {
    /// Lines that carry a password must not land in readline history
    pub fn is_sensitive(&self) -> bool {
        matches!(self, ReplCommand::Signup { .. } | ReplCommand::Login { .. })
    }
}

/// Whether a line belongs in readline history
///
/// Lines that fail to parse are left out as well, since a mistyped
/// `/login` may still carry a password.
pub fn keep_in_history(parsed: &Result<ReplCommand, CommandError>) -> bool {
    matches!(parsed, Ok(cmd) if !cmd.is_sensitive())
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Invalid date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Invalid position '{0}' (expected a number from the listing)")]
    InvalidPosition(String),

    #[error("{0}")]
    InvalidView(String),
}

/// Parse a trimmed, non-empty input line
pub fn parse(input: &str) -> Result<ReplCommand, CommandError> {
    let Some(rest) = input.strip_prefix('/') else {
        return Ok(ReplCommand::Message(input.to_string()));
    };

    let (cmd, args) = match rest.split_once(char::is_whitespace) {
        Some((cmd, args)) => (cmd, args.trim()),
        None => (rest, ""),
    };

    match cmd {
        "help" | "h" => Ok(ReplCommand::Help),
        "quit" | "q" | "exit" => Ok(ReplCommand::Quit),
        "signup" => {
            let (email, password) = credentials(args).ok_or(CommandError::Usage("/signup <email> <password>"))?;
            Ok(ReplCommand::Signup { email, password })
        }
        "login" => {
            let (email, password) = credentials(args).ok_or(CommandError::Usage("/login <email> <password>"))?;
            Ok(ReplCommand::Login { email, password })
        }
        "logout" => Ok(ReplCommand::Logout),
        "whoami" => Ok(ReplCommand::Whoami),
        "new" => Ok(ReplCommand::New),
        "chats" => Ok(ReplCommand::Chats),
        "switch" => {
            if args.is_empty() {
                return Err(CommandError::Usage("/switch <n|name>"));
            }
            match args.parse::<usize>() {
                Ok(n) => Ok(ReplCommand::Switch(ThreadRef::Position(n))),
                Err(_) => Ok(ReplCommand::Switch(ThreadRef::Name(args.to_string()))),
            }
        }
        "history" => Ok(ReplCommand::History),
        "save" => Ok(ReplCommand::Save),
        "retry" => Ok(ReplCommand::Retry),
        "view" => {
            if args.is_empty() {
                return Err(CommandError::Usage("/view chat|planner"));
            }
            args.parse().map(ReplCommand::View).map_err(CommandError::InvalidView)
        }
        "chat" => Ok(ReplCommand::View(View::Chat)),
        "planner" => Ok(ReplCommand::View(View::Planner)),
        "tasks" => Ok(ReplCommand::Tasks),
        "add" => parse_add(args),
        "done" => Ok(ReplCommand::Done(position(args, "/done <n>")?)),
        "delete" | "del" => Ok(ReplCommand::Delete(position(args, "/delete <n>")?)),
        _ => Err(CommandError::Unknown(format!("/{cmd}"))),
    }
}

/// Email is the first word; the password is everything after it
fn credentials(args: &str) -> Option<(String, String)> {
    let (email, password) = args.split_once(char::is_whitespace)?;
    let password = password.trim_start();
    if password.is_empty() {
        return None;
    }
    Some((email.to_string(), password.to_string()))
}

fn position(args: &str, usage: &'static str) -> Result<usize, CommandError> {
    if args.is_empty() {
        return Err(CommandError::Usage(usage));
    }
    match args.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(CommandError::InvalidPosition(args.to_string())),
    }
}

/// Split `<text> --due <date>` when `--due` is a word of its own, second to last
fn split_due(args: &str) -> Option<(&str, &str)> {
    let (rest, date) = args.trim_end().rsplit_once(char::is_whitespace)?;
    let text = rest.trim_end().strip_suffix("--due")?;
    if !text.is_empty() && !text.ends_with(char::is_whitespace) {
        return None;
    }
    Some((text.trim(), date))
}

fn parse_add(args: &str) -> Result<ReplCommand, CommandError> {
    const USAGE: &str = "/add <text> [--due YYYY-MM-DD]";

    let (text, due) = match split_due(args) {
        Some((text, date)) => {
            let due = parse_due(date).map_err(|_| CommandError::InvalidDate(date.to_string()))?;
            (text, Some(due))
        }
        None => (args, None),
    };

    if text.is_empty() {
        return Err(CommandError::Usage(USAGE));
    }
    Ok(ReplCommand::Add {
        text: text.to_string(),
        due,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_a_message() {
        assert_eq!(parse("hello there").unwrap(), ReplCommand::Message("hello there".to_string()));
    }

    #[test]
    fn test_simple_commands() {
        assert_eq!(parse("/help").unwrap(), ReplCommand::Help);
        assert_eq!(parse("/h").unwrap(), ReplCommand::Help);
        assert_eq!(parse("/exit").unwrap(), ReplCommand::Quit);
        assert_eq!(parse("/new").unwrap(), ReplCommand::New);
        assert_eq!(parse("/chats").unwrap(), ReplCommand::Chats);
        assert_eq!(parse("/history").unwrap(), ReplCommand::History);
        assert_eq!(parse("/save").unwrap(), ReplCommand::Save);
        assert_eq!(parse("/retry").unwrap(), ReplCommand::Retry);
        assert_eq!(parse("/tasks").unwrap(), ReplCommand::Tasks);
        assert_eq!(parse("/logout").unwrap(), ReplCommand::Logout);
        assert_eq!(parse("/whoami").unwrap(), ReplCommand::Whoami);
    }

    #[test]
    fn test_credentials_keep_spaces_in_password() {
        let cmd = parse("/login a@x.com  correct horse battery").unwrap();
        assert_eq!(
            cmd,
            ReplCommand::Login {
                email: "a@x.com".to_string(),
                password: "correct horse battery".to_string()
            }
        );
        assert!(cmd.is_sensitive());
    }

    #[test]
    fn test_history_skips_credentials_and_unparsed_lines() {
        assert!(keep_in_history(&parse("/new")));
        assert!(keep_in_history(&parse("hello there")));
        assert!(!keep_in_history(&parse("/signup a@x.com secret")));
        assert!(!keep_in_history(&parse("/logn a@x.com secret")));
        assert!(!keep_in_history(&parse("/login a@x.com")));
    }

    #[test]
    fn test_credentials_missing_fields() {
        assert_eq!(parse("/signup").unwrap_err(), CommandError::Usage("/signup <email> <password>"));
        assert_eq!(parse("/signup a@x.com").unwrap_err(), CommandError::Usage("/signup <email> <password>"));
        assert_eq!(parse("/login a@x.com   ").unwrap_err(), CommandError::Usage("/login <email> <password>"));
    }

    #[test]
    fn test_switch_by_position_or_name() {
        assert_eq!(parse("/switch 2").unwrap(), ReplCommand::Switch(ThreadRef::Position(2)));
        assert_eq!(
            parse("/switch Chat 1 - 10:00:00").unwrap(),
            ReplCommand::Switch(ThreadRef::Name("Chat 1 - 10:00:00".to_string()))
        );
        assert!(matches!(parse("/switch"), Err(CommandError::Usage(_))));
    }

    #[test]
    fn test_views() {
        assert_eq!(parse("/view planner").unwrap(), ReplCommand::View(View::Planner));
        assert_eq!(parse("/chat").unwrap(), ReplCommand::View(View::Chat));
        assert_eq!(parse("/planner").unwrap(), ReplCommand::View(View::Planner));
        assert!(matches!(parse("/view settings"), Err(CommandError::InvalidView(_))));
    }

    #[test]
    fn test_add_with_and_without_due() {
        assert_eq!(
            parse("/add Buy milk").unwrap(),
            ReplCommand::Add {
                text: "Buy milk".to_string(),
                due: None
            }
        );
        assert_eq!(
            parse("/add File taxes --due 2025-04-15").unwrap(),
            ReplCommand::Add {
                text: "File taxes".to_string(),
                due: NaiveDate::from_ymd_opt(2025, 4, 15)
            }
        );
        assert_eq!(
            parse("/add Renew --due tomorrow").unwrap_err(),
            CommandError::InvalidDate("tomorrow".to_string())
        );
        assert!(matches!(parse("/add --due 2025-04-15"), Err(CommandError::Usage(_))));
        assert!(matches!(parse("/add"), Err(CommandError::Usage(_))));
    }

    #[test]
    fn test_add_text_containing_due_is_kept_whole() {
        assert_eq!(
            parse("/add Research --due-diligence rules").unwrap(),
            ReplCommand::Add {
                text: "Research --due-diligence rules".to_string(),
                due: None
            }
        );
        assert_eq!(
            parse("/add overdue--due 2025-04-15").unwrap(),
            ReplCommand::Add {
                text: "overdue--due 2025-04-15".to_string(),
                due: None
            }
        );
        assert_eq!(
            parse("/add Check --due-date field --due 2025-04-15").unwrap(),
            ReplCommand::Add {
                text: "Check --due-date field".to_string(),
                due: NaiveDate::from_ymd_opt(2025, 4, 15)
            }
        );
    }

    #[test]
    fn test_positions() {
        assert_eq!(parse("/done 3").unwrap(), ReplCommand::Done(3));
        assert_eq!(parse("/del 1").unwrap(), ReplCommand::Delete(1));
        assert_eq!(parse("/done 0").unwrap_err(), CommandError::InvalidPosition("0".to_string()));
        assert_eq!(parse("/delete x").unwrap_err(), CommandError::InvalidPosition("x".to_string()));
        assert!(matches!(parse("/done"), Err(CommandError::Usage(_))));
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(parse("/frobnicate now").unwrap_err(), CommandError::Unknown("/frobnicate".to_string()));
    }
}
