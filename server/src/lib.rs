pub mod connection;
pub mod relay;
pub mod rooms;
