use std::collections::HashMap;

use log::trace;
use shared::{
    chat_message::ChatMessage, wire_command::WireCommand, wire_command_id::WireCommandId,
};
use tokio::sync::mpsc;

pub type ConnectionId = u64;
pub type OutboundSender = mpsc::UnboundedSender<WireCommand>;

/// Mapping from room name to the connections currently in it. A room is
/// created by the first join and removed again once its last member is gone,
/// so the map only ever holds rooms with members.
pub struct RoomMap {
    rooms: HashMap<String, HashMap<ConnectionId, OutboundSender>>,
}

impl RoomMap {
    pub fn new() -> Self {
        Self {
            rooms: HashMap::new(),
        }
    }

    /// Any string is a valid room name. Joining a room twice is a no-op.
    pub fn join(&mut self, room: &str, connection_id: ConnectionId, sender: OutboundSender) {
        self.rooms
            .entry(room.to_string())
            .or_default()
            .insert(connection_id, sender);
    }

    pub fn leave(&mut self, room: &str, connection_id: ConnectionId) {
        if let Some(members) = self.rooms.get_mut(room) {
            members.remove(&connection_id);

            if members.is_empty() {
                self.rooms.remove(room);
            }
        }
    }

    pub fn remove_connection(&mut self, connection_id: ConnectionId) {
        self.rooms.retain(|_, members| {
            members.remove(&connection_id);
            !members.is_empty()
        });
    }

    /// Forwards a message to every member of the room named in the message,
    /// except the sending connection. The sender does not have to be a member
    /// of that room itself, and a room without members swallows the message.
    pub fn broadcast(&self, sender_id: ConnectionId, message: &ChatMessage) {
        let Some(members) = self.rooms.get(&message.room) else {
            return;
        };

        for (connection_id, sender) in members {
            if *connection_id == sender_id {
                continue;
            }

            let command = WireCommand::Message(WireCommandId::ReceiveMessage, message.clone());

            if sender.send(command).is_err() {
                trace!("Connection {} is gone, skipping delivery", connection_id);
            }
        }
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn member_count(&self, room: &str) -> usize {
        self.rooms.get(room).map_or(0, HashMap::len)
    }
}

impl Default for RoomMap {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc::UnboundedReceiver;

    fn message_for(room: &str) -> ChatMessage {
        ChatMessage {
            room: room.to_string(),
            author: "alice".to_string(),
            body: "hello".to_string(),
            sent_at: "12:34".to_string(),
        }
    }

    fn member() -> (OutboundSender, UnboundedReceiver<WireCommand>) {
        mpsc::unbounded_channel()
    }

    fn received_count(receiver: &mut UnboundedReceiver<WireCommand>) -> usize {
        let mut count = 0;
        while receiver.try_recv().is_ok() {
            count += 1;
        }
        count
    }

    #[tokio::test]
    async fn broadcast_skips_the_sender() {
        let mut room_map = RoomMap::new();
        let (alice_tx, mut alice_rx) = member();
        let (bob_tx, mut bob_rx) = member();

        room_map.join("lobby", 1, alice_tx);
        room_map.join("lobby", 2, bob_tx);

        let message = message_for("lobby");
        room_map.broadcast(1, &message);

        match bob_rx.try_recv().unwrap() {
            WireCommand::Message(WireCommandId::ReceiveMessage, received) => {
                assert_eq!(received, message);
            }
            other => panic!("unexpected command: {:?}", other),
        }

        assert_eq!(received_count(&mut bob_rx), 0);
        assert_eq!(received_count(&mut alice_rx), 0);
    }

    #[tokio::test]
    async fn double_join_does_not_duplicate_delivery() {
        let mut room_map = RoomMap::new();
        let (alice_tx, mut alice_rx) = member();
        let (bob_tx, _bob_rx) = member();

        room_map.join("lobby", 1, alice_tx.clone());
        room_map.join("lobby", 1, alice_tx);
        room_map.join("lobby", 2, bob_tx);

        room_map.broadcast(2, &message_for("lobby"));

        assert_eq!(received_count(&mut alice_rx), 1);
    }

    #[tokio::test]
    async fn rooms_do_not_leak_into_each_other() {
        let mut room_map = RoomMap::new();
        let (alice_tx, mut alice_rx) = member();
        let (bob_tx, mut bob_rx) = member();

        room_map.join("red", 1, alice_tx);
        room_map.join("blue", 2, bob_tx);

        room_map.broadcast(1, &message_for("red"));

        assert_eq!(received_count(&mut bob_rx), 0);
        assert_eq!(received_count(&mut alice_rx), 0);
    }

    #[tokio::test]
    async fn non_member_can_still_post_into_a_room() {
        let mut room_map = RoomMap::new();
        let (bob_tx, mut bob_rx) = member();

        room_map.join("room42", 2, bob_tx);

        // Connection 1 never joined room42.
        room_map.broadcast(1, &message_for("room42"));

        assert_eq!(received_count(&mut bob_rx), 1);
    }

    #[tokio::test]
    async fn message_to_a_room_without_members_is_swallowed() {
        let room_map = RoomMap::new();

        room_map.broadcast(1, &message_for("nowhere"));
    }

    #[tokio::test]
    async fn last_leave_drops_the_room() {
        let mut room_map = RoomMap::new();
        let (alice_tx, _alice_rx) = member();

        room_map.join("lobby", 1, alice_tx);
        assert_eq!(room_map.room_count(), 1);

        room_map.leave("lobby", 1);
        assert_eq!(room_map.room_count(), 0);
    }

    #[tokio::test]
    async fn leave_of_a_room_never_joined_is_a_no_op() {
        let mut room_map = RoomMap::new();
        let (alice_tx, _alice_rx) = member();

        room_map.join("lobby", 1, alice_tx);
        room_map.leave("elsewhere", 1);

        assert_eq!(room_map.member_count("lobby"), 1);
    }

    #[tokio::test]
    async fn disconnect_removes_the_connection_everywhere() {
        let mut room_map = RoomMap::new();
        let (alice_tx, _alice_rx) = member();
        let (bob_tx, mut bob_rx) = member();

        room_map.join("red", 1, alice_tx.clone());
        room_map.join("blue", 1, alice_tx);
        room_map.join("blue", 2, bob_tx);

        room_map.remove_connection(1);

        assert_eq!(room_map.room_count(), 1);
        assert_eq!(room_map.member_count("blue"), 1);

        room_map.broadcast(2, &message_for("blue"));
        assert_eq!(received_count(&mut bob_rx), 0);
    }
}
