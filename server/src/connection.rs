use core::error::Error;
use std::sync::Arc;

use log::{debug, trace};
use shared::{
    received_wire_command::ReceivedWireCommand, wire_command::WireCommand,
    wire_command_id::WireCommandId,
};
use tokio::{
    net::TcpStream,
    sync::{RwLock, mpsc},
};

use crate::rooms::{ConnectionId, RoomMap};

pub struct ConnectionHandler;

impl ConnectionHandler {
    pub async fn handle_stream(
        stream: TcpStream,
        connection_id: ConnectionId,
        room_map: Arc<RwLock<RoomMap>>,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        let (mut read_half, mut write_half) = stream.into_split();

        let (outbound_tx, mut outbound_rx) = mpsc::unbounded_channel();

        loop {
            tokio::select! {

                result = WireCommand::read_from_stream(&mut read_half) => {

                    let incoming_command = match result? {
                        ReceivedWireCommand::EOF => return Ok(()),
                        ReceivedWireCommand::Command(command) => command,
                    };

                    Self::handle_command(incoming_command, connection_id, &outbound_tx, &room_map)
                        .await;
                }

                result = outbound_rx.recv() => {

                    let Some(outgoing_command) = result else {
                        return Ok(());
                    };

                    outgoing_command.write_to_stream(&mut write_half).await?;
                }
            }
        }
    }

    async fn handle_command(
        command: WireCommand,
        connection_id: ConnectionId,
        outbound_tx: &mpsc::UnboundedSender<WireCommand>,
        room_map: &Arc<RwLock<RoomMap>>,
    ) {
        match command {
            WireCommand::String(WireCommandId::JoinRoom, room) => {
                let mut rooms = room_map.write().await;
                rooms.join(&room, connection_id, outbound_tx.clone());

                debug!(
                    "Connection {} joined room '{}' ({} members)",
                    connection_id,
                    room,
                    rooms.member_count(&room)
                );
            }

            WireCommand::String(WireCommandId::LeaveRoom, room) => {
                room_map.write().await.leave(&room, connection_id);

                debug!("Connection {} left room '{}'", connection_id, room);
            }

            WireCommand::Message(WireCommandId::SendMessage, message) => {
                trace!(
                    "Forwarding message from connection {} to room '{}'",
                    connection_id, message.room
                );

                room_map.read().await.broadcast(connection_id, &message);
            }

            // Anything else parses but has no meaning coming from a client.
            other => {
                debug!(
                    "Ignoring unexpected command from connection {}: {:?}",
                    connection_id, other
                );
            }
        }
    }
}
