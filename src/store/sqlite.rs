use std::path::Path;

use rusqlite::{params, Connection};

use super::{ChatMessage, RoomRecord, Store};
use crate::error::StoreError;

/// SQLite-backed store
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) a database file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let store = Self {
            conn: Connection::open(path)?,
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Private in-memory database
    pub fn in_memory() -> Result<Self, StoreError> {
        let store = Self {
            conn: Connection::open_in_memory()?,
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<(), StoreError> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS rooms (
                name TEXT PRIMARY KEY,
                created_at TEXT NOT NULL
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS chat_messages (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                created_at TEXT NOT NULL,
                author TEXT NOT NULL,
                room TEXT NOT NULL,
                text TEXT NOT NULL
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_chat_messages_room ON chat_messages(room)",
            [],
        )?;

        Ok(())
    }
}

impl Store for SqliteStore {
    fn create_room_record(&self, record: &RoomRecord) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO rooms (name, created_at) VALUES (?1, ?2)",
            params![record.name, record.created_at],
        )?;
        Ok(())
    }

    fn create_chat_message(&self, message: &ChatMessage) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO chat_messages (created_at, author, room, text)
             VALUES (?1, ?2, ?3, ?4)",
            params![message.timestamp, message.author, message.room, message.text],
        )?;
        Ok(())
    }

    fn list_room_records(&self) -> Result<Vec<RoomRecord>, StoreError> {
        let mut stmt = self.conn.prepare("SELECT name, created_at FROM rooms")?;

        let rooms = stmt
            .query_map([], |row| {
                Ok(RoomRecord {
                    name: row.get(0)?,
                    created_at: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rooms)
    }

    fn list_chat_messages(&self, room: &str) -> Result<Vec<ChatMessage>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT created_at, author, room, text
             FROM chat_messages
             WHERE room = ?1
             ORDER BY id",
        )?;

        let messages = stmt
            .query_map(params![room], |row| {
                Ok(ChatMessage {
                    timestamp: row.get(0)?,
                    author: row.get(1)?,
                    room: row.get(2)?,
                    text: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(messages)
    }
}
