//! Client struct definition
//!
//! Represents a connected client with their state and outbound queue.

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

use crate::error::SendError;
use crate::types::SessionId;

/// Display name before `/nick`
pub const DEFAULT_NICK: &str = "anonymous";

/// One item on a client's outbound queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outgoing {
    Line(String),
    /// Lines queued as a single item, so a long reply takes one queue slot
    Batch(Vec<String>),
}

impl Outgoing {
    pub fn into_lines(self) -> Vec<String> {
        match self {
            Self::Line(line) => vec![line],
            Self::Batch(lines) => lines,
        }
    }
}

/// Handle to a client's bounded outbound queue
///
/// The connection's writer task drains the other end. Delivery never
/// waits: a full queue rejects the item.
#[derive(Debug, Clone)]
pub struct Outbox {
    session: SessionId,
    sender: mpsc::Sender<Outgoing>,
}

impl Outbox {
    pub fn new(session: SessionId, sender: mpsc::Sender<Outgoing>) -> Self {
        Self { session, sender }
    }

    /// Session this outbox belongs to
    pub fn session(&self) -> SessionId {
        self.session
    }

    /// Queue one line for the writer task without blocking
    pub fn deliver(&self, line: impl Into<String>) -> Result<(), SendError> {
        self.push(Outgoing::Line(line.into()))
    }

    /// Queue several lines as one item; they are written in order
    pub fn deliver_batch(&self, lines: Vec<String>) -> Result<(), SendError> {
        self.push(Outgoing::Batch(lines))
    }

    fn push(&self, item: Outgoing) -> Result<(), SendError> {
        self.sender.try_send(item).map_err(|e| match e {
            TrySendError::Full(_) => SendError::QueueFull,
            TrySendError::Closed(_) => SendError::ChannelClosed,
        })
    }
}

/// Connected client information
///
/// Only the dispatcher reads or writes these fields.
#[derive(Debug)]
pub struct Client {
    /// Unique identifier for this session
    pub id: SessionId,
    /// Display name, not unique across clients
    pub nick: String,
    /// Name of the room currently joined
    pub room: Option<String>,
    /// Server → Client line queue
    pub outbox: Outbox,
    /// Remote address, for logging
    pub peer: String,
}

impl Client {
    /// Create a new client with the default nickname and no room
    pub fn new(outbox: Outbox, peer: String) -> Self {
        Self {
            id: outbox.session(),
            nick: DEFAULT_NICK.to_string(),
            room: None,
            outbox,
            peer,
        }
    }

    /// Queue a line for this client
    pub fn send(&self, line: impl Into<String>) -> Result<(), SendError> {
        self.outbox.deliver(line)
    }

    /// Queue several lines for this client as one item
    pub fn send_batch(&self, lines: Vec<String>) -> Result<(), SendError> {
        self.outbox.deliver_batch(lines)
    }

    /// Set the client's display name
    pub fn set_nick(&mut self, nick: String) {
        self.nick = nick;
    }
}
