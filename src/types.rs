//! Basic type definitions for the chat server
//!
//! Provides newtype wrappers for type safety:
//! - `SessionId`: per-connection identifier, never reused within a process
//! - `SessionIds`: monotonic allocator owned by the accept loop

use chrono::{Local, NaiveDateTime};

/// Format used when timestamps are shown to clients
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Unique session identifier (newtype pattern)
///
/// Assigned once per accepted connection. Used as the membership key
/// instead of the peer address, which the OS may hand out again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionId(pub u64);

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Strictly increasing session id allocator
#[derive(Debug)]
pub struct SessionIds {
    next: u64,
}

impl SessionIds {
    /// Start numbering at 1
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Hand out the next id
    pub fn next_id(&mut self) -> SessionId {
        let id = SessionId(self.next);
        self.next += 1;
        id
    }
}

impl Default for SessionIds {
    fn default() -> Self {
        Self::new()
    }
}

/// Current local wall-clock time
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Render a timestamp for history replay
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}
