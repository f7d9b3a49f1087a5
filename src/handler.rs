//! TCP connection handler
//!
//! Handles individual client connections: line framing, the read loop that
//! turns lines into commands, and the writer task that drains the client's
//! outbound queue onto the socket.

use std::future::Future;

use futures_util::{SinkExt, StreamExt};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio::time::{self, Duration};
use tokio_util::codec::{FramedRead, FramedWrite, LinesCodec, LinesCodecError};
use tracing::{debug, error, info, warn};

use crate::client::{Outbox, Outgoing};
use crate::command::{Command, CommandKind};
use crate::config::ConnectionConfig;
use crate::error::AppError;
use crate::server::ServerCommand;
use crate::types::{SessionId, SessionIds};

/// Accept connections forever, handing each one its own session
pub async fn serve(
    listener: TcpListener,
    cmd_tx: mpsc::Sender<ServerCommand>,
    config: ConnectionConfig,
) {
    let mut sessions = SessionIds::new();

    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                let session = sessions.next_id();
                info!("New connection from {} as {}", addr, session);
                let cmd_tx = cmd_tx.clone();

                // Spawn handler task for each connection
                tokio::spawn(async move {
                    if let Err(e) = handle_connection(stream, session, cmd_tx, config).await {
                        error!("Connection handler error for {}: {}", session, e);
                    }
                });
            }
            Err(e) => {
                error!("Failed to accept connection: {}", e);
            }
        }
    }
}

/// Handle a new TCP connection
///
/// Registers the session with the ChatServer, then runs the read and write
/// halves until one of them finishes.
pub async fn handle_connection(
    stream: TcpStream,
    session: SessionId,
    cmd_tx: mpsc::Sender<ServerCommand>,
    config: ConnectionConfig,
) -> Result<(), AppError> {
    let peer = stream
        .peer_addr()
        .map(|a| a.to_string())
        .unwrap_or_else(|_| "unknown".to_string());
    stream.set_nodelay(true)?;
    let (reader, writer) = stream.into_split();

    // Channel for server -> client lines
    let (line_tx, line_rx) = mpsc::channel::<Outgoing>(config.outbound_buffer);

    // Register with ChatServer
    cmd_tx
        .send(ServerCommand::Connect {
            outbox: Outbox::new(session, line_tx),
            peer,
        })
        .await
        .map_err(|_| AppError::ChannelSend)?;

    let mut read_task = tokio::spawn(read_commands(
        reader,
        session,
        cmd_tx.clone(),
        config.max_line_length,
    ));
    let mut write_task = tokio::spawn(write_lines(writer, line_rx, session, config.write_timeout));

    tokio::select! {
        _ = &mut read_task => {
            // The reader queued a QUIT; the writer ends once the server
            // drops this client's outbox.
            debug!("Read task completed for {}", session);
            let _ = write_task.await;
        }
        _ = &mut write_task => {
            debug!("Write task completed for {}", session);
            read_task.abort();
            // Harmless if the client already quit
            let _ = cmd_tx
                .send(ServerCommand::Execute(Command::quit(session)))
                .await;
        }
    }

    info!("Connection {} closed", session);

    Ok(())
}

/// Read loop: socket lines -> ServerCommand
///
/// Stops after forwarding `/quit`. End of stream, a read error or an
/// over-long line is turned into a QUIT for this session.
async fn read_commands(
    reader: OwnedReadHalf,
    session: SessionId,
    cmd_tx: mpsc::Sender<ServerCommand>,
    max_line_length: usize,
) {
    let mut lines = FramedRead::new(reader, LinesCodec::new_with_max_length(max_line_length));

    loop {
        match lines.next().await {
            Some(Ok(line)) => {
                let Some(cmd) = Command::parse(session, &line) else {
                    continue;
                };
                let quitting = cmd.kind == CommandKind::Quit;
                if cmd_tx.send(ServerCommand::Execute(cmd)).await.is_err() {
                    debug!("Server closed, ending read task for {}", session);
                    return;
                }
                if quitting {
                    return;
                }
            }
            Some(Err(LinesCodecError::MaxLineLengthExceeded)) => {
                // The framed stream ends after any decode error
                warn!("Line from {} exceeds {} bytes, disconnecting", session, max_line_length);
                break;
            }
            Some(Err(LinesCodecError::Io(e))) => {
                debug!("Read error for {}: {}", session, e);
                break;
            }
            None => {
                debug!("Client {} closed its stream", session);
                break;
            }
        }
    }

    let _ = cmd_tx
        .send(ServerCommand::Execute(Command::quit(session)))
        .await;
}

/// Write loop: outbound queue -> socket
///
/// Each line write and each flush is bounded by `write_timeout`; a peer that
/// stops reading gets disconnected instead of holding up anyone else.
async fn write_lines(
    writer: OwnedWriteHalf,
    mut outgoing: mpsc::Receiver<Outgoing>,
    session: SessionId,
    write_timeout: Duration,
) {
    let mut sink = FramedWrite::new(writer, LinesCodec::new());

    while let Some(item) = outgoing.recv().await {
        for line in item.into_lines() {
            if !bounded(session, write_timeout, sink.feed(line)).await {
                return;
            }
        }
        if !bounded(session, write_timeout, SinkExt::<String>::flush(&mut sink)).await {
            return;
        }
    }

    // Queue closed by the server: flush and shut down the write half
    if time::timeout(write_timeout, SinkExt::<String>::close(&mut sink))
        .await
        .is_err()
    {
        debug!("Closing {} timed out", session);
    }
}

/// Await one socket write under the timeout, returning false if the
/// connection should be dropped
async fn bounded<F>(session: SessionId, write_timeout: Duration, write: F) -> bool
where
    F: Future<Output = Result<(), LinesCodecError>>,
{
    match time::timeout(write_timeout, write).await {
        Ok(Ok(())) => true,
        Ok(Err(e)) => {
            debug!("Write failed for {}: {}", session, e);
            false
        }
        Err(_) => {
            warn!("Write to {} timed out after {:?}", session, write_timeout);
            false
        }
    }
}
