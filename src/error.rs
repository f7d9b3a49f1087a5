//! Error types for the chat server
//!
//! Defines application-level errors, outbound delivery errors and
//! persistence errors. Uses thiserror for ergonomic error definitions.

use thiserror::Error;

/// Application-level errors
///
/// Covers both fatal errors (connection termination) and
/// business errors (reported back to the issuing client).
#[derive(Debug, Error)]
pub enum AppError {
    /// IO error (fatal)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Channel send error (fatal - dispatcher is gone)
    #[error("Channel send error")]
    ChannelSend,

    /// MSG issued before any JOIN
    #[error("you must join the room first")]
    NotInRoom,

    /// First token was not a known command verb
    #[error("unknown command: {0}")]
    UnknownCommand(String),
}

impl AppError {
    /// Text line sent to the client for a business error
    pub fn reply_line(&self) -> String {
        format!("err: {self}")
    }
}

/// Outbound delivery errors
///
/// Occurs when a line cannot be queued for a client's writer task.
#[derive(Debug, Error)]
pub enum SendError {
    /// The client's outbound queue is at capacity
    #[error("Outbound queue full")]
    QueueFull,

    /// The writer task has ended
    #[error("Channel closed")]
    ChannelClosed,
}

/// Persistence errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("store unavailable")]
    Unavailable,
}
