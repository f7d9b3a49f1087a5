//! Server configuration
//!
//! Parsed from the command line with clap. `ConnectionConfig` is the
//! per-connection subset handed to each handler task.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

/// Default server address
pub const DEFAULT_ADDR: &str = "127.0.0.1:8888";

/// Multi-room line-based chat server
#[derive(Debug, Clone, Parser)]
#[command(name = "roomchat", version, about)]
pub struct Config {
    /// Address to listen on
    #[arg(default_value = DEFAULT_ADDR)]
    pub addr: String,

    /// SQLite database holding rooms and chat history
    #[arg(long, default_value = "chat.db")]
    pub database: PathBuf,

    /// Capacity of the dispatcher's command queue
    #[arg(long, default_value_t = 256)]
    pub command_buffer: usize,

    /// Capacity of each client's outbound line queue
    #[arg(long, default_value_t = 64)]
    pub outbound_buffer: usize,

    /// Upper bound on a single socket write, in milliseconds
    #[arg(long, default_value_t = 5000)]
    pub write_timeout_ms: u64,

    /// Longest accepted input line, in bytes
    #[arg(long, default_value_t = 4096)]
    pub max_line_length: usize,
}

impl Config {
    pub fn connection(&self) -> ConnectionConfig {
        ConnectionConfig {
            outbound_buffer: self.outbound_buffer,
            write_timeout: Duration::from_millis(self.write_timeout_ms),
            max_line_length: self.max_line_length,
        }
    }
}

/// Limits applied to every connection
#[derive(Debug, Clone, Copy)]
pub struct ConnectionConfig {
    pub outbound_buffer: usize,
    pub write_timeout: Duration,
    pub max_line_length: usize,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            outbound_buffer: 64,
            write_timeout: Duration::from_secs(5),
            max_line_length: 4096,
        }
    }
}
