//! ChatServer Actor implementation
//!
//! The central actor that owns all shared state: clients, rooms and the
//! room routing table. Connection tasks reach it only by sending
//! `ServerCommand`s over an mpsc channel, so no locks are needed.

use std::collections::{BTreeMap, HashMap};
use std::panic::{self, AssertUnwindSafe};

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::client::{Client, Outbox};
use crate::command::{Command, CommandKind};
use crate::error::AppError;
use crate::room::Room;
use crate::store::{self, ChatMessage, RoomRecord, Store};
use crate::types::{self, SessionId};

/// Messages sent from connection handlers to the ChatServer actor
#[derive(Debug)]
pub enum ServerCommand {
    /// New client connected
    Connect {
        outbox: Outbox,
        peer: String,
    },
    /// Parsed line from a connected client
    Execute(Command),
}

/// The main ChatServer actor
pub struct ChatServer<S> {
    /// All connected clients: SessionId -> Client
    clients: HashMap<SessionId, Client>,
    /// Routing table: room name -> Room, kept sorted for `/rooms`
    rooms: BTreeMap<String, Room>,
    store: S,
    /// Command receiver channel
    receiver: mpsc::Receiver<ServerCommand>,
}

impl<S: Store> ChatServer<S> {
    /// Create a new ChatServer, restoring known rooms from the store
    pub fn new(receiver: mpsc::Receiver<ServerCommand>, store: S) -> Self {
        let mut rooms = BTreeMap::new();
        match store.list_room_records() {
            Ok(records) => {
                for record in records {
                    debug!("Restoring room {} created {}", record.name, record.created_at);
                    rooms.insert(record.name.clone(), Room::new(record.name, record.created_at));
                }
                info!("Restored {} rooms from store", rooms.len());
            }
            Err(e) => error!("Failed to load rooms from store: {}", e),
        }

        Self {
            clients: HashMap::new(),
            rooms,
            store,
            receiver,
        }
    }

    /// Run the ChatServer event loop
    ///
    /// Processes commands one at a time until all senders are dropped.
    pub async fn run(mut self) {
        info!("ChatServer started");

        while let Some(cmd) = self.receiver.recv().await {
            self.dispatch(cmd);
        }

        info!("ChatServer shutting down");
    }

    /// Process one command, containing any panic it raises
    fn dispatch(&mut self, cmd: ServerCommand) {
        let session = match &cmd {
            ServerCommand::Connect { outbox, .. } => outbox.session(),
            ServerCommand::Execute(cmd) => cmd.session,
        };

        let result = panic::catch_unwind(AssertUnwindSafe(|| self.handle_command(cmd)));
        if result.is_err() {
            error!("Command from {} panicked; dispatcher continues", session);
        }
    }

    /// Process a single command
    fn handle_command(&mut self, cmd: ServerCommand) {
        match cmd {
            ServerCommand::Connect { outbox, peer } => self.handle_connect(outbox, peer),
            ServerCommand::Execute(cmd) => {
                if !self.clients.contains_key(&cmd.session) {
                    debug!("Ignoring {:?} from unknown session {}", cmd.kind, cmd.session);
                    return;
                }
                match cmd.kind {
                    CommandKind::Nick => self.handle_nick(&cmd),
                    CommandKind::Join => self.handle_join(&cmd),
                    CommandKind::Rooms => self.handle_rooms(&cmd),
                    CommandKind::Msg => self.handle_msg(&cmd),
                    CommandKind::Quit => self.handle_quit(&cmd),
                    CommandKind::Unknown => self.handle_unknown(&cmd),
                }
            }
        }
    }

    /// Handle new client connection
    fn handle_connect(&mut self, outbox: Outbox, peer: String) {
        let client = Client::new(outbox, peer);
        info!("Client {} connected from {}", client.id, client.peer);
        self.clients.insert(client.id, client);
        debug!(
            "Total clients: {}, Total rooms: {}",
            self.clients.len(),
            self.rooms.len()
        );
    }

    /// `/nick NAME`
    fn handle_nick(&mut self, cmd: &Command) {
        let Some(client) = self.clients.get_mut(&cmd.session) else {
            return;
        };

        let Some(nick) = cmd.first_arg() else {
            reply(client, "NAME is required. usage: /nick NAME");
            return;
        };

        info!("Client {} set nick to '{}'", client.id, nick);
        client.set_nick(nick.to_string());
        reply(client, format!("all right, I will call you {nick}"));
    }

    /// `/join ROOM`
    fn handle_join(&mut self, cmd: &Command) {
        let Some(client) = self.clients.get(&cmd.session) else {
            return;
        };

        let Some(room_name) = cmd.first_arg() else {
            reply(client, "ROOM is required. usage: /join ROOM");
            return;
        };

        if !self.rooms.contains_key(room_name) {
            self.create_room(room_name);
        }

        self.leave_current_room(cmd.session);

        let Some(client) = self.clients.get_mut(&cmd.session) else {
            return;
        };
        let Some(room) = self.rooms.get_mut(room_name) else {
            return;
        };

        room.add_member(client.outbox.clone());
        client.room = Some(room.name.clone());
        info!("Client {} joined room {}", client.id, room.name);

        room.broadcast(Some(client.id), &format!("{} has joined the room", client.nick));

        // Welcome and history go out as one queue item so a long history
        // is never cut short by the queue bound.
        let mut lines = vec![format!("welcome to {}", room.name)];
        match store::blocking(|| self.store.list_chat_messages(&room.name)) {
            Ok(history) => lines.extend(history.into_iter().map(|message| {
                format!(
                    "{} > {}: {}",
                    types::format_timestamp(&message.timestamp),
                    message.author,
                    message.text
                )
            })),
            Err(e) => error!("Failed to load history for room {}: {}", room.name, e),
        }
        if let Err(e) = client.send_batch(lines) {
            warn!("Failed to send join reply to {}: {}", client.id, e);
        }

        debug_assert!(self.membership_consistent());
    }

    /// `/rooms`
    fn handle_rooms(&mut self, cmd: &Command) {
        let Some(client) = self.clients.get(&cmd.session) else {
            return;
        };

        let names: Vec<&str> = self.rooms.keys().map(String::as_str).collect();
        reply(client, format!("available rooms are: {}", names.join(", ")));
    }

    /// `/msg TEXT...`
    fn handle_msg(&mut self, cmd: &Command) {
        let Some(client) = self.clients.get(&cmd.session) else {
            return;
        };

        let Some(room) = client.room.as_ref().and_then(|name| self.rooms.get(name)) else {
            reply(client, AppError::NotInRoom.reply_line());
            return;
        };

        let Some(text) = cmd.text() else {
            reply(client, "MSG is required. usage: /msg MSG");
            return;
        };

        let message = ChatMessage {
            timestamp: types::now(),
            author: client.nick.clone(),
            room: room.name.clone(),
            text,
        };
        if let Err(e) = store::blocking(|| self.store.create_chat_message(&message)) {
            error!("Failed to persist message in room {}: {}", room.name, e);
        }

        let delivered = room.broadcast(Some(client.id), &format!("{}: {}", client.nick, message.text));
        debug!("Message from {} in {} delivered to {} members", client.id, room.name, delivered);
    }

    /// `/quit`, or end of the client's stream
    fn handle_quit(&mut self, cmd: &Command) {
        self.leave_current_room(cmd.session);

        // Dropping the client drops its last outbox, which ends the writer
        // once the farewell is flushed.
        if let Some(client) = self.clients.remove(&cmd.session) {
            reply(&client, "bye bye~");
            info!("Client {} ({}) disconnected", client.id, client.peer);
        }

        debug!(
            "Total clients: {}, Total rooms: {}",
            self.clients.len(),
            self.rooms.len()
        );
        debug_assert!(self.membership_consistent());
    }

    fn handle_unknown(&mut self, cmd: &Command) {
        let Some(client) = self.clients.get(&cmd.session) else {
            return;
        };

        reply(client, AppError::UnknownCommand(cmd.verb().to_string()).reply_line());
    }

    /// Register a new room and record it durably
    fn create_room(&mut self, name: &str) {
        let record = RoomRecord {
            name: name.to_string(),
            created_at: types::now(),
        };
        if let Err(e) = store::blocking(|| self.store.create_room_record(&record)) {
            error!("Failed to persist room {}: {}", name, e);
        }

        info!("Room {} created", name);
        self.rooms
            .insert(record.name.clone(), Room::new(record.name, record.created_at));
    }

    /// Helper: take a client out of its room and tell the remaining members
    fn leave_current_room(&mut self, session: SessionId) {
        let Some(client) = self.clients.get_mut(&session) else {
            return;
        };
        let Some(room_name) = client.room.take() else {
            return;
        };
        let Some(room) = self.rooms.get_mut(&room_name) else {
            return;
        };

        room.remove_member(session);
        room.broadcast(Some(session), &format!("{} has left the room", client.nick));
        debug!("Client {} left room {}", session, room_name);
    }

    /// A client's room reference and the room's member set always agree
    fn membership_consistent(&self) -> bool {
        let clients_ok = self.clients.values().all(|client| match &client.room {
            Some(name) => self.rooms.get(name).is_some_and(|room| room.contains(client.id)),
            None => self.rooms.values().all(|room| !room.contains(client.id)),
        });
        let rooms_ok = self.rooms.values().all(|room| {
            room.members().all(|session| {
                self.clients
                    .get(&session)
                    .is_some_and(|client| client.room.as_deref() == Some(room.name.as_str()))
            })
        });
        clients_ok && rooms_ok
    }
}

/// Queue a reply for one client, logging when it cannot be delivered
fn reply(client: &Client, line: impl Into<String>) {
    if let Err(e) = client.send(line) {
        warn!("Failed to reply to {}: {}", client.id, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Outgoing;
    use crate::error::StoreError;
    use crate::store::{MemoryStore, SqliteStore};

    struct Harness {
        server: ChatServer<MemoryStore>,
        store: MemoryStore,
        _tx: mpsc::Sender<ServerCommand>,
    }

    impl Harness {
        fn new() -> Self {
            Self::with_store(MemoryStore::new())
        }

        fn with_store(store: MemoryStore) -> Self {
            let (tx, rx) = mpsc::channel(8);
            Self {
                server: ChatServer::new(rx, store.clone()),
                store,
                _tx: tx,
            }
        }

        fn connect(&mut self, id: u64, capacity: usize) -> mpsc::Receiver<Outgoing> {
            connect_to(&mut self.server, id, capacity)
        }

        fn send(&mut self, id: u64, line: &str) {
            send_to(&mut self.server, id, line);
        }

        fn client(&self, id: u64) -> &Client {
            &self.server.clients[&SessionId(id)]
        }

        fn room(&self, name: &str) -> &Room {
            &self.server.rooms[name]
        }
    }

    fn drain(rx: &mut mpsc::Receiver<Outgoing>) -> Vec<String> {
        let mut lines = Vec::new();
        while let Ok(item) = rx.try_recv() {
            lines.extend(item.into_lines());
        }
        lines
    }

    fn connect_to<S: Store>(
        server: &mut ChatServer<S>,
        id: u64,
        capacity: usize,
    ) -> mpsc::Receiver<Outgoing> {
        let (tx, rx) = mpsc::channel(capacity);
        server.dispatch(ServerCommand::Connect {
            outbox: Outbox::new(SessionId(id), tx),
            peer: format!("127.0.0.1:{}", 5000 + id),
        });
        rx
    }

    fn send_to<S: Store>(server: &mut ChatServer<S>, id: u64, line: &str) {
        let cmd = Command::parse(SessionId(id), line).expect("non-blank line");
        server.dispatch(ServerCommand::Execute(cmd));
    }

    #[test]
    fn test_two_clients_in_lobby() {
        let mut h = Harness::new();
        let mut a = h.connect(1, 32);
        h.send(1, "/nick alice");
        h.send(1, "/join lobby");
        assert_eq!(
            drain(&mut a),
            vec!["all right, I will call you alice", "welcome to lobby"]
        );

        let mut b = h.connect(2, 32);
        h.send(2, "/nick bob");
        h.send(2, "/join lobby");
        assert_eq!(drain(&mut a), vec!["bob has joined the room"]);
        assert_eq!(
            drain(&mut b),
            vec!["all right, I will call you bob", "welcome to lobby"]
        );

        h.send(1, "/msg hello");
        assert_eq!(drain(&mut b), vec!["alice: hello"]);
        assert!(drain(&mut a).is_empty());

        h.send(2, "/quit");
        assert_eq!(drain(&mut a), vec!["bob has left the room"]);
        assert_eq!(drain(&mut b), vec!["bye bye~"]);
        // Bob's outbox is gone, so his writer sees the queue close
        assert!(matches!(
            b.try_recv(),
            Err(mpsc::error::TryRecvError::Disconnected)
        ));
        assert!(!h.server.clients.contains_key(&SessionId(2)));
        assert!(h.server.membership_consistent());
    }

    #[test]
    fn test_msg_before_join() {
        let mut h = Harness::new();
        let mut a = h.connect(1, 8);

        h.send(1, "/msg hi");
        assert_eq!(drain(&mut a), vec!["err: you must join the room first"]);
        assert_eq!(h.store.message_count(), 0);
    }

    #[test]
    fn test_msg_without_text() {
        let mut h = Harness::new();
        let mut a = h.connect(1, 8);
        h.send(1, "/join lobby");
        drain(&mut a);

        h.send(1, "/msg");
        assert_eq!(drain(&mut a), vec!["MSG is required. usage: /msg MSG"]);
        assert_eq!(h.store.message_count(), 0);
    }

    #[test]
    fn test_nick_without_argument() {
        let mut h = Harness::new();
        let mut a = h.connect(1, 8);

        h.send(1, "/nick");
        assert_eq!(drain(&mut a), vec!["NAME is required. usage: /nick NAME"]);
        assert_eq!(h.client(1).nick, "anonymous");

        h.send(1, "/nick carol extra tokens");
        assert_eq!(h.client(1).nick, "carol");
    }

    #[test]
    fn test_duplicate_nicks_allowed() {
        let mut h = Harness::new();
        let _a = h.connect(1, 8);
        let _b = h.connect(2, 8);
        h.send(1, "/nick sam");
        h.send(2, "/nick sam");
        assert_eq!(h.client(1).nick, "sam");
        assert_eq!(h.client(2).nick, "sam");
    }

    #[test]
    fn test_join_without_argument() {
        let mut h = Harness::new();
        let mut a = h.connect(1, 8);

        h.send(1, "/join");
        assert_eq!(drain(&mut a), vec!["ROOM is required. usage: /join ROOM"]);
        assert!(h.server.rooms.is_empty());
        assert!(h.client(1).room.is_none());
    }

    #[test]
    fn test_rejoin_same_room() {
        let mut h = Harness::new();
        let mut a = h.connect(1, 16);
        let mut b = h.connect(2, 16);
        h.send(1, "/nick alice");
        h.send(1, "/join lobby");
        h.send(2, "/join lobby");
        drain(&mut a);
        drain(&mut b);

        h.send(2, "/join lobby");
        assert_eq!(h.room("lobby").member_count(), 2);
        assert_eq!(
            drain(&mut a),
            vec!["anonymous has left the room", "anonymous has joined the room"]
        );
        assert_eq!(drain(&mut b), vec!["welcome to lobby"]);
        assert_eq!(h.client(2).room.as_deref(), Some("lobby"));
        assert!(h.server.membership_consistent());
    }

    #[test]
    fn test_switching_rooms() {
        let mut h = Harness::new();
        let mut a = h.connect(1, 16);
        let mut b = h.connect(2, 16);
        h.send(2, "/nick bob");
        h.send(1, "/join lobby");
        h.send(2, "/join lobby");
        drain(&mut a);

        h.send(2, "/join games");
        assert_eq!(drain(&mut a), vec!["bob has left the room"]);
        assert!(!h.room("lobby").contains(SessionId(2)));
        assert!(h.room("games").contains(SessionId(2)));
        assert_eq!(h.client(2).room.as_deref(), Some("games"));
        assert!(h.server.membership_consistent());

        // Messages stay in their room
        h.send(2, "/msg anyone?");
        assert!(drain(&mut a).is_empty());
        assert!(drain(&mut b).iter().all(|l| !l.starts_with("bob:")));
    }

    #[test]
    fn test_history_replayed_in_order() {
        let mut h = Harness::new();
        let mut a = h.connect(1, 16);
        h.send(1, "/nick alice");
        h.send(1, "/join lobby");
        h.send(1, "/msg one");
        h.send(1, "/msg two");
        h.send(1, "/msg three");
        drain(&mut a);

        let mut b = h.connect(2, 16);
        h.send(2, "/join lobby");
        let lines = drain(&mut b);
        assert_eq!(lines[0], "welcome to lobby");
        let replay: Vec<&str> = lines[1..]
            .iter()
            .map(|l| l.split_once(" > ").expect("timestamp prefix").1)
            .collect();
        assert_eq!(replay, vec!["alice: one", "alice: two", "alice: three"]);
        // "YYYY-MM-DD HH:MM:SS > "
        assert_eq!(lines[1].find(" > "), Some(19));
    }

    #[test]
    fn test_rooms_lists_empty_rooms() {
        let mut h = Harness::new();
        let mut a = h.connect(1, 16);
        h.send(1, "/join lobby");
        h.send(1, "/join games");
        h.send(1, "/quit");

        let mut b = h.connect(2, 16);
        h.send(2, "/rooms");
        assert_eq!(drain(&mut b), vec!["available rooms are: games, lobby"]);
        assert!(h.room("lobby").is_empty());
        assert!(drain(&mut a).contains(&"bye bye~".to_string()));
    }

    #[test]
    fn test_rooms_restored_from_store() {
        let store = MemoryStore::new();
        {
            let mut h = Harness::with_store(store.clone());
            let _a = h.connect(1, 16);
            h.send(1, "/join lobby");
            h.send(1, "/msg remembered");
        }

        let mut h = Harness::with_store(store);
        let mut b = h.connect(1, 16);
        h.send(1, "/rooms");
        assert_eq!(drain(&mut b), vec!["available rooms are: lobby"]);

        h.send(1, "/join lobby");
        let lines = drain(&mut b);
        assert_eq!(lines.len(), 2);
        assert!(lines[1].ends_with("> anonymous: remembered"));
        // Restored room keeps its original creation time and is not recorded twice
        let records = h.store.list_room_records().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(h.room("lobby").created_at, records[0].created_at);
    }

    #[test]
    fn test_store_failure_does_not_block_chat() {
        let store = MemoryStore::new();
        store.set_unavailable(true);
        let mut h = Harness::with_store(store);
        let mut a = h.connect(1, 16);
        let mut b = h.connect(2, 16);
        h.send(1, "/nick alice");
        h.send(1, "/join lobby");
        h.send(2, "/join lobby");
        drain(&mut a);
        drain(&mut b);

        h.send(1, "/msg still here");
        assert_eq!(drain(&mut b), vec!["alice: still here"]);
        assert!(h.room("lobby").contains(SessionId(1)));
    }

    #[test]
    fn test_stalled_member_does_not_block_others() {
        let mut h = Harness::new();
        let _stalled = h.connect(1, 1);
        let mut a = h.connect(2, 64);
        let mut b = h.connect(3, 64);
        h.send(1, "/join lobby");
        h.send(2, "/join lobby");
        h.send(3, "/nick bob");
        h.send(3, "/join lobby");
        drain(&mut a);
        drain(&mut b);

        for i in 0..10 {
            h.send(3, &format!("/msg line {i}"));
        }

        let received = drain(&mut a);
        assert_eq!(received.len(), 10);
        assert_eq!(received[9], "bob: line 9");
        // The stalled member is still a member; its lines were dropped
        assert!(h.room("lobby").contains(SessionId(1)));
    }

    #[test]
    fn test_unknown_command() {
        let mut h = Harness::new();
        let mut a = h.connect(1, 8);

        h.send(1, "/dance");
        h.send(1, "hello everyone");
        assert_eq!(
            drain(&mut a),
            vec![
                "err: unknown command: /dance",
                "err: unknown command: hello",
            ]
        );
    }

    #[test]
    fn test_commands_after_quit_are_ignored() {
        let mut h = Harness::new();
        let mut a = h.connect(1, 8);
        h.send(1, "/join lobby");
        h.send(1, "/quit");
        drain(&mut a);

        // Synthesized QUIT from the connection handler after an explicit /quit
        h.server
            .dispatch(ServerCommand::Execute(Command::quit(SessionId(1))));
        h.send(1, "/rooms");
        assert!(h.server.clients.is_empty());
        assert!(h.room("lobby").is_empty());
    }

    #[test]
    fn test_history_longer_than_queue_is_complete() {
        let mut h = Harness::new();
        let _a = h.connect(1, 8);
        h.send(1, "/join lobby");
        for i in 0..100 {
            h.send(1, &format!("/msg m{i}"));
        }
        assert_eq!(h.store.message_count(), 100);

        let mut b = h.connect(2, 4);
        h.send(2, "/join lobby");
        let lines = drain(&mut b);
        assert_eq!(lines.len(), 101);
        assert_eq!(lines[0], "welcome to lobby");
        assert!(lines[1].ends_with("> anonymous: m0"));
        assert!(lines[100].ends_with("> anonymous: m99"));
    }

    /// Store whose history lookup always panics
    struct PanickingStore;

    impl Store for PanickingStore {
        fn create_room_record(&self, _record: &RoomRecord) -> Result<(), StoreError> {
            Ok(())
        }

        fn create_chat_message(&self, _message: &ChatMessage) -> Result<(), StoreError> {
            Ok(())
        }

        fn list_room_records(&self) -> Result<Vec<RoomRecord>, StoreError> {
            Ok(Vec::new())
        }

        fn list_chat_messages(&self, _room: &str) -> Result<Vec<ChatMessage>, StoreError> {
            panic!("history lookup exploded");
        }
    }

    #[test]
    fn test_panicking_command_does_not_stop_dispatcher() {
        let (_tx, rx) = mpsc::channel(8);
        let mut server = ChatServer::new(rx, PanickingStore);
        let _a = connect_to(&mut server, 1, 8);
        let mut b = connect_to(&mut server, 2, 8);

        send_to(&mut server, 1, "/join lobby");
        send_to(&mut server, 2, "/rooms");
        assert_eq!(drain(&mut b), vec!["available rooms are: lobby"]);

        send_to(&mut server, 2, "/nick bob");
        assert_eq!(drain(&mut b), vec!["all right, I will call you bob"]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_run_with_sqlite_on_multi_thread_runtime() {
        let (tx, rx) = mpsc::channel(16);
        let server = ChatServer::new(rx, SqliteStore::in_memory().unwrap());
        let handle = tokio::spawn(server.run());

        let (out_tx, mut out_rx) = mpsc::channel(16);
        tx.send(ServerCommand::Connect {
            outbox: Outbox::new(SessionId(1), out_tx),
            peer: "test".to_string(),
        })
        .await
        .unwrap();
        for line in ["/join lobby", "/msg one", "/msg two", "/join lobby", "/quit"] {
            let cmd = Command::parse(SessionId(1), line).unwrap();
            tx.send(ServerCommand::Execute(cmd)).await.unwrap();
        }

        let mut lines = Vec::new();
        while let Some(item) = out_rx.recv().await {
            lines.extend(item.into_lines());
        }
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[1], "welcome to lobby");
        assert!(lines[2].ends_with("> anonymous: one"));
        assert!(lines[3].ends_with("> anonymous: two"));
        assert_eq!(lines[4], "bye bye~");

        drop(tx);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_run_processes_in_order() {
        let (tx, rx) = mpsc::channel(16);
        let store = MemoryStore::new();
        let server = ChatServer::new(rx, store.clone());
        let handle = tokio::spawn(server.run());

        let (out_tx, mut out_rx) = mpsc::channel(16);
        tx.send(ServerCommand::Connect {
            outbox: Outbox::new(SessionId(1), out_tx),
            peer: "test".to_string(),
        })
        .await
        .unwrap();
        for line in ["/nick zed", "/join lobby", "/msg ping", "/quit"] {
            let cmd = Command::parse(SessionId(1), line).unwrap();
            tx.send(ServerCommand::Execute(cmd)).await.unwrap();
        }

        let mut lines = Vec::new();
        while let Some(item) = out_rx.recv().await {
            lines.extend(item.into_lines());
        }
        assert_eq!(
            lines,
            vec!["all right, I will call you zed", "welcome to lobby", "bye bye~"]
        );
        assert_eq!(store.message_count(), 1);

        drop(tx);
        handle.await.unwrap();
    }
}
