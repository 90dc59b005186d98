use core::error::Error;

use chrono::Local;
use shared::{
    chat_message::ChatMessage, received_wire_command::ReceivedWireCommand,
    wire_command::WireCommand, wire_command_id::WireCommandId,
};
use tokio::{
    io::{AsyncBufReadExt, AsyncWrite, BufReader, Stdin},
    net::TcpStream,
};

use crate::display::ChatDisplay;

pub struct ChatInterface;

impl ChatInterface {
    pub async fn run(
        room: &str,
        username: &str,
        tcp_stream: &mut TcpStream,
        stdin: &mut BufReader<Stdin>,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        ChatDisplay::print_joined_room(room);

        let (mut read_half, mut write_half) = tcp_stream.split();

        let mut line = String::new();

        loop {
            ChatDisplay::print_prompt()?;

            line.clear();

            tokio::select! {

                result = stdin.read_line(&mut line) => {

                    if result? == 0 {
                        leave_room(&mut write_half, room).await?;
                        return Ok(());
                    }

                    let input = line.trim();

                    if input == "/leave" {
                        leave_room(&mut write_half, room).await?;
                        ChatDisplay::print_left_room(room);
                        return Ok(());
                    }

                    if input.is_empty() {
                        continue;
                    }

                    let message = ChatMessage {
                        room: room.to_string(),
                        author: username.to_string(),
                        body: input.to_string(),
                        sent_at: Local::now().format("%H:%M").to_string(),
                    };

                    // The relay never echoes a message back to its sender.
                    ChatDisplay::print_own_message(&message);

                    WireCommand::Message(WireCommandId::SendMessage, message)
                        .write_to_stream(&mut write_half)
                        .await?;
                }

                result = WireCommand::read_from_stream(&mut read_half) => {

                    match result? {
                        ReceivedWireCommand::EOF => {
                            return Err("Server closed connection.".into());
                        }
                        ReceivedWireCommand::Command(command) => {

                            if let WireCommand::Message(WireCommandId::ReceiveMessage, message) = command {
                                ChatDisplay::print_chat_message(&message);
                            }
                        }
                    }
                }
            }
        }
    }
}

async fn leave_room<W>(tcp_stream: &mut W, room: &str) -> Result<(), Box<dyn Error + Send + Sync>>
where
    W: AsyncWrite + Unpin,
{
    WireCommand::String(WireCommandId::LeaveRoom, room.to_string())
        .write_to_stream(tcp_stream)
        .await?;

    Ok(())
}
