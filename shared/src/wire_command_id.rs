use crate::wire_command_payload_type::WireCommandPayloadType;

const COMMAND_BYTE_OFFSET: u8 = 47;

macro_rules! wire_command_id_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, PartialEq, Eq, Clone, Copy)]
        #[repr(u8)]
        $vis enum $name {
            $($variant),*
        }

        impl $name {

            pub fn to_byte(&self) -> u8 {
                *self as u8 + COMMAND_BYTE_OFFSET
            }

            pub fn from_byte(byte: u8) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
                match byte.wrapping_sub(COMMAND_BYTE_OFFSET) {
                    $(x if x == $name::$variant as u8 => Ok($name::$variant),)*
                    _ => Err("Invalid WireCommandId".into()),
                }
            }
        }
    };
}

wire_command_id_enum! {
    pub enum WireCommandId {
        JoinRoom,
        LeaveRoom,
        SendMessage,
        ReceiveMessage,
    }
}

impl WireCommandId {
    pub fn get_payload_type(&self) -> WireCommandPayloadType {
        match &self {
            WireCommandId::JoinRoom => WireCommandPayloadType::String,
            WireCommandId::LeaveRoom => WireCommandPayloadType::String,
            WireCommandId::SendMessage => WireCommandPayloadType::Message,
            WireCommandId::ReceiveMessage => WireCommandPayloadType::Message,
        }
    }
}
