pub mod chat_message;
pub mod received_wire_command;
pub mod wire_command;
pub mod wire_command_id;
pub mod wire_command_payload_type;

pub const RELAY_PORT: u16 = 3001;
