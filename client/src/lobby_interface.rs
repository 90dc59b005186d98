use core::error::Error;

use shared::{wire_command::WireCommand, wire_command_id::WireCommandId};
use tokio::io::{AsyncBufReadExt, AsyncWrite, BufReader, Stdin};

use crate::display::ChatDisplay;

pub struct LobbyInterface;

impl LobbyInterface {
    pub async fn run<W>(
        tcp_stream: &mut W,
        stdin: &mut BufReader<Stdin>,
    ) -> Result<Option<String>, Box<dyn Error + Send + Sync>>
    where
        W: AsyncWrite + Unpin,
    {
        ChatDisplay::print_lobby_help();

        let mut line = String::new();

        loop {
            ChatDisplay::print_prompt()?;

            line.clear();
            let n = stdin.read_line(&mut line).await?;

            if n == 0 {
                return Ok(None);
            }

            let input = line.trim();

            if input == "exit" {
                println!("Exiting...");
                return Ok(None);
            }

            let room_option = handle_user_input(input, tcp_stream).await?;

            if let Some(room) = room_option {
                return Ok(Some(room));
            }
        }
    }
}

async fn handle_user_input<W>(
    input: &str,
    tcp_stream: &mut W,
) -> Result<Option<String>, Box<dyn Error + Send + Sync>>
where
    W: AsyncWrite + Unpin,
{
    match input {
        "" => {}

        "join" => {
            eprintln!("Usage: join <room>");
        }
        command if command.starts_with("join ") => {
            // A room is any non-empty string; the server accepts it as-is.
            let room = command["join ".len()..].trim();

            if room.is_empty() {
                eprintln!("Usage: join <room>");
            } else {
                return join_room(tcp_stream, room).await;
            }
        }

        _ => {
            eprintln!("Unknown command");
        }
    }

    Ok(None)
}

async fn join_room<W>(
    tcp_stream: &mut W,
    room: &str,
) -> Result<Option<String>, Box<dyn Error + Send + Sync>>
where
    W: AsyncWrite + Unpin,
{
    // The server sends no acknowledgment for a join; the room exists from
    // this moment on.
    WireCommand::String(WireCommandId::JoinRoom, room.to_string())
        .write_to_stream(tcp_stream)
        .await?;

    Ok(Some(room.to_string()))
}
