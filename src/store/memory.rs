use std::sync::{Arc, Mutex, MutexGuard};

use super::{ChatMessage, RoomRecord, Store};
use crate::error::StoreError;

#[derive(Debug, Default)]
struct Inner {
    rooms: Vec<RoomRecord>,
    messages: Vec<ChatMessage>,
    unavailable: bool,
}

/// In-memory store
///
/// Clones share the same data, so a test can keep a handle after moving
/// the store into the dispatcher.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every operation fail with `StoreError::Unavailable`
    pub fn set_unavailable(&self, unavailable: bool) {
        self.lock().unavailable = unavailable;
    }

    /// Number of chat messages written so far
    pub fn message_count(&self) -> usize {
        self.lock().messages.len()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn available(&self) -> Result<MutexGuard<'_, Inner>, StoreError> {
        let inner = self.lock();
        if inner.unavailable {
            return Err(StoreError::Unavailable);
        }
        Ok(inner)
    }
}

impl Store for MemoryStore {
    fn create_room_record(&self, record: &RoomRecord) -> Result<(), StoreError> {
        self.available()?.rooms.push(record.clone());
        Ok(())
    }

    fn create_chat_message(&self, message: &ChatMessage) -> Result<(), StoreError> {
        self.available()?.messages.push(message.clone());
        Ok(())
    }

    fn list_room_records(&self) -> Result<Vec<RoomRecord>, StoreError> {
        Ok(self.available()?.rooms.clone())
    }

    fn list_chat_messages(&self, room: &str) -> Result<Vec<ChatMessage>, StoreError> {
        Ok(self
            .available()?
            .messages
            .iter()
            .filter(|m| m.room == room)
            .cloned()
            .collect())
    }
}
