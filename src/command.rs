//! Line protocol commands
//!
//! Each non-blank input line becomes one immutable `Command`. The first
//! whitespace-delimited token is the verb; all tokens (verb included) are
//! kept as the argument list.

use crate::types::SessionId;

/// Kind of client action, selected by the leading verb
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    /// `/nick NAME`
    Nick,
    /// `/join ROOM`
    Join,
    /// `/rooms`
    Rooms,
    /// `/msg TEXT...`
    Msg,
    /// `/quit`
    Quit,
    /// Anything else, reported back as an unknown command
    Unknown,
}

impl CommandKind {
    /// Map a verb token to its kind
    pub fn from_verb(verb: &str) -> Self {
        match verb {
            "/nick" => Self::Nick,
            "/join" => Self::Join,
            "/rooms" => Self::Rooms,
            "/msg" => Self::Msg,
            "/quit" => Self::Quit,
            _ => Self::Unknown,
        }
    }

    /// Canonical verb for this kind
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Nick => "/nick",
            Self::Join => "/join",
            Self::Rooms => "/rooms",
            Self::Msg => "/msg",
            Self::Quit => "/quit",
            Self::Unknown => "",
        }
    }
}

/// A parsed request from one client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Issuing session
    pub session: SessionId,
    pub kind: CommandKind,
    /// Whitespace-delimited tokens, verb first
    pub args: Vec<String>,
}

impl Command {
    /// Parse one input line
    ///
    /// Returns None for blank or whitespace-only lines.
    pub fn parse(session: SessionId, line: &str) -> Option<Self> {
        let args: Vec<String> = line.split_whitespace().map(str::to_string).collect();
        let kind = CommandKind::from_verb(args.first()?);
        Some(Self {
            session,
            kind,
            args,
        })
    }

    /// QUIT on behalf of a connection whose stream ended
    pub fn quit(session: SessionId) -> Self {
        Self {
            session,
            kind: CommandKind::Quit,
            args: vec![CommandKind::Quit.verb().to_string()],
        }
    }

    /// The verb token as typed
    pub fn verb(&self) -> &str {
        self.args.first().map(String::as_str).unwrap_or_default()
    }

    /// First argument after the verb
    pub fn first_arg(&self) -> Option<&str> {
        self.args.get(1).map(String::as_str)
    }

    /// All arguments after the verb joined by single spaces
    pub fn text(&self) -> Option<String> {
        if self.args.len() < 2 {
            return None;
        }
        Some(self.args[1..].join(" "))
    }
}
