//! Durable record of rooms and chat history
//!
//! Only the dispatcher talks to a `Store`. Failures are reported to the
//! caller, which logs them and carries on.

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use chrono::NaiveDateTime;
use tokio::runtime::{Handle, RuntimeFlavor};

use crate::error::StoreError;

/// Room entry, written once when the room is first created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomRecord {
    pub name: String,
    pub created_at: NaiveDateTime,
}

/// One chat line as sent with `/msg`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub timestamp: NaiveDateTime,
    pub author: String,
    pub room: String,
    pub text: String,
}

/// Persistence backend used by the dispatcher
///
/// Methods are synchronous and run on the dispatcher task, so a write is
/// ordered with the command that caused it. The dispatcher wraps each call
/// in [`blocking`] to keep a slow query from starving other tasks.
pub trait Store: Send {
    fn create_room_record(&self, record: &RoomRecord) -> Result<(), StoreError>;

    fn create_chat_message(&self, message: &ChatMessage) -> Result<(), StoreError>;

    /// Every room ever created, in no particular order
    fn list_room_records(&self) -> Result<Vec<RoomRecord>, StoreError>;

    /// History of one room in the order it was written
    fn list_chat_messages(&self, room: &str) -> Result<Vec<ChatMessage>, StoreError>;
}

/// Run a synchronous store call from inside the dispatcher
///
/// On a multi-thread runtime the worker hands its other tasks off with
/// `block_in_place` first. Elsewhere (current-thread runtime, no runtime)
/// the call runs inline.
pub fn blocking<T>(f: impl FnOnce() -> T) -> T {
    match Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
            tokio::task::block_in_place(f)
        }
        _ => f(),
    }
}
