//! Room struct definition
//!
//! Represents a named chat room and its current members.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use tracing::warn;

use crate::client::Outbox;
use crate::types::SessionId;

/// Named chat room
///
/// Rooms are never deleted; an empty room stays listed and keeps its history.
#[derive(Debug)]
pub struct Room {
    /// Room name, unique within the server
    pub name: String,
    /// Room creation time
    pub created_at: NaiveDateTime,
    /// Current members keyed by session
    members: BTreeMap<SessionId, Outbox>,
}

impl Room {
    /// Create an empty room
    pub fn new(name: String, created_at: NaiveDateTime) -> Self {
        Self {
            name,
            created_at,
            members: BTreeMap::new(),
        }
    }

    /// Add a member
    ///
    /// Returns false if the session was already a member (the entry is replaced).
    pub fn add_member(&mut self, outbox: Outbox) -> bool {
        self.members.insert(outbox.session(), outbox).is_none()
    }

    /// Remove a member, returning true if it was present
    pub fn remove_member(&mut self, session: SessionId) -> bool {
        self.members.remove(&session).is_some()
    }

    /// Check if a session is in this room
    pub fn contains(&self, session: SessionId) -> bool {
        self.members.contains_key(&session)
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Sessions currently in the room, in ascending order
    pub fn members(&self) -> impl Iterator<Item = SessionId> + '_ {
        self.members.keys().copied()
    }

    /// Send `text` to every member except `exclude`
    ///
    /// Best effort: a member whose queue is full or closed is skipped.
    /// Returns how many members accepted the line.
    pub fn broadcast(&self, exclude: Option<SessionId>, text: &str) -> usize {
        let mut delivered = 0;
        for (session, outbox) in &self.members {
            if Some(*session) == exclude {
                continue;
            }
            match outbox.deliver(text) {
                Ok(()) => delivered += 1,
                Err(e) => warn!("Dropped line for {} in room {}: {}", session, self.name, e),
            }
        }
        delivered
    }
}
