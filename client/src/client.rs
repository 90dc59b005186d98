use core::error::Error;

use tokio::{io::BufReader, net::TcpStream};

use crate::{
    chat_interface::ChatInterface, display::ChatDisplay, lobby_interface::LobbyInterface,
};

pub struct Client {}

impl Client {
    pub async fn run(server_addr: &str, username: &str) -> Result<(), Box<dyn Error>> {
        let mut tcp_stream = TcpStream::connect(server_addr).await?;

        ChatDisplay::print_connected_message(server_addr, username);

        let mut stdin = BufReader::new(tokio::io::stdin());

        loop {
            let room_option = LobbyInterface::run(&mut tcp_stream, &mut stdin).await?;

            match room_option {
                Some(room) => {
                    ChatInterface::run(&room, username, &mut tcp_stream, &mut stdin).await?
                }
                None => return Ok(()),
            };
        }
    }
}
