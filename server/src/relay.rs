use core::error::Error;
use std::{
    net::SocketAddr,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use log::{error, info};
use tokio::{net::TcpListener, sync::RwLock};

use crate::{connection::ConnectionHandler, rooms::RoomMap};

pub struct RelayServer {
    listener: TcpListener,
}

impl RelayServer {
    pub async fn bind(addr: String) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            listener: TcpListener::bind(addr).await?,
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    pub async fn listen(self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let room_map = Arc::new(RwLock::new(RoomMap::new()));
        let next_connection_id = AtomicU64::new(1);

        loop {
            let (stream, peer_addr) = self.listener.accept().await?;

            let connection_id = next_connection_id.fetch_add(1, Ordering::Relaxed);
            let room_map = room_map.clone();

            tokio::spawn(async move {
                info!("Connection {} accepted from {}", connection_id, peer_addr);

                if let Err(e) =
                    ConnectionHandler::handle_stream(stream, connection_id, room_map.clone()).await
                {
                    error!("Error handling connection {}: {}", connection_id, e);
                }

                room_map.write().await.remove_connection(connection_id);
                info!("Connection {} has left the chat", connection_id);
            });
        }
    }
}
