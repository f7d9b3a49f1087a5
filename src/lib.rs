//! Multi-room Chat Server Library
//!
//! A line-based TCP chat server built with tokio, using the Actor pattern
//! for state management and SQLite for room and message history.
//!
//! # Features
//! - Line protocol: `/nick`, `/join`, `/rooms`, `/msg`, `/quit`
//! - Rooms created on first join and kept forever
//! - Chat history replayed to whoever joins a room
//! - Per-client bounded outbound queues with write timeouts
//!
//! # Architecture
//! Uses the Actor pattern with `mpsc` channels:
//! - `ChatServer` is the central actor owning rooms, membership and nicknames
//! - Each connection has a reader task that turns lines into `Command`s and
//!   a writer task that drains the client's outbound queue
//! - No locks needed - all state access goes through message passing
//!
//! # Example
//! ```ignore
//! use tokio::net::TcpListener;
//! use tokio::sync::mpsc;
//! use roomchat::{serve, ChatServer, ConnectionConfig, SqliteStore};
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = SqliteStore::open("chat.db").unwrap();
//!     let listener = TcpListener::bind("127.0.0.1:8888").await.unwrap();
//!     let (cmd_tx, cmd_rx) = mpsc::channel(256);
//!
//!     tokio::spawn(ChatServer::new(cmd_rx, store).run());
//!     serve(listener, cmd_tx, ConnectionConfig::default()).await;
//! }
//! ```

pub mod client;
pub mod command;
pub mod config;
pub mod error;
pub mod handler;
pub mod room;
pub mod server;
pub mod store;
pub mod types;

// Re-export main types for convenience
pub use client::{Client, Outbox};
pub use command::{Command, CommandKind};
pub use config::{Config, ConnectionConfig};
pub use error::{AppError, SendError, StoreError};
pub use handler::{handle_connection, serve};
pub use room::Room;
pub use server::{ChatServer, ServerCommand};
pub use store::{ChatMessage, MemoryStore, RoomRecord, SqliteStore, Store};
pub use types::{SessionId, SessionIds};
