use core::error::Error;
use std::str::from_utf8;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::{
    chat_message::ChatMessage, received_wire_command::ReceivedWireCommand,
    wire_command_id::WireCommandId, wire_command_payload_type::WireCommandPayloadType,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireCommand {
    String(WireCommandId, String),
    Message(WireCommandId, ChatMessage),
}

impl WireCommand {
    pub async fn write_to_stream<W>(
        &self,
        stream: &mut W,
    ) -> Result<(), Box<dyn Error + Send + Sync>>
    where
        W: AsyncWrite + Unpin,
    {
        match &self {
            WireCommand::String(id, payload) => {
                if payload.len() > u8::MAX as usize {
                    return Err("String payload too large".into());
                }

                let mut bytes = vec![id.to_byte(), payload.len() as u8];
                bytes.extend(payload.as_bytes());

                stream.write_all(&bytes).await?;
            }
            WireCommand::Message(id, message) => {
                stream.write_all(&[id.to_byte()]).await?;

                message.write_to_stream(stream).await?;
            }
        }

        Ok(())
    }

    pub async fn read_from_stream<R>(
        stream: &mut R,
    ) -> Result<ReceivedWireCommand, Box<dyn Error + Send + Sync>>
    where
        R: AsyncRead + Unpin,
    {
        let mut buf = [0; 1];

        let first_byte = match stream.read(&mut buf).await {
            Ok(0) => return Ok(ReceivedWireCommand::EOF),
            Ok(_) => buf[0],
            Err(e) => return Err(e.into()),
        };

        let command_id = WireCommandId::from_byte(first_byte)?;

        match command_id.get_payload_type() {
            WireCommandPayloadType::String => {
                let mut payload_len_buf = [0];
                stream.read_exact(&mut payload_len_buf).await?;
                let payload_len = payload_len_buf[0] as usize;

                let mut payload_buf = vec![0; payload_len];
                stream.read_exact(&mut payload_buf).await?;
                let payload = from_utf8(&payload_buf)?.to_string();

                Ok(ReceivedWireCommand::Command(WireCommand::String(
                    command_id, payload,
                )))
            }
            WireCommandPayloadType::Message => {
                let message = ChatMessage::read_from_stream(stream).await?;

                Ok(ReceivedWireCommand::Command(WireCommand::Message(
                    command_id, message,
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_message() -> ChatMessage {
        ChatMessage {
            room: "lobby".to_string(),
            author: "alice".to_string(),
            body: "hello there".to_string(),
            sent_at: "12:34".to_string(),
        }
    }

    #[tokio::test]
    async fn join_command_survives_the_wire() {
        let (mut writer, mut reader) = tokio::io::duplex(1024);

        let command = WireCommand::String(WireCommandId::JoinRoom, "lobby".to_string());
        command.write_to_stream(&mut writer).await.unwrap();

        let received = WireCommand::read_from_stream(&mut reader).await.unwrap();

        match received {
            ReceivedWireCommand::Command(parsed) => assert_eq!(parsed, command),
            ReceivedWireCommand::EOF => panic!("unexpected EOF"),
        }
    }

    #[tokio::test]
    async fn message_command_survives_the_wire() {
        let (mut writer, mut reader) = tokio::io::duplex(1024);

        let command = WireCommand::Message(WireCommandId::SendMessage, sample_message());
        command.write_to_stream(&mut writer).await.unwrap();

        let received = WireCommand::read_from_stream(&mut reader).await.unwrap();

        match received {
            ReceivedWireCommand::Command(parsed) => assert_eq!(parsed, command),
            ReceivedWireCommand::EOF => panic!("unexpected EOF"),
        }
    }

    #[tokio::test]
    async fn closed_stream_reads_as_eof() {
        let (writer, mut reader) = tokio::io::duplex(1024);
        drop(writer);

        let received = WireCommand::read_from_stream(&mut reader).await.unwrap();

        assert!(matches!(received, ReceivedWireCommand::EOF));
    }

    #[tokio::test]
    async fn unknown_command_byte_is_rejected() {
        let (mut writer, mut reader) = tokio::io::duplex(1024);

        tokio::io::AsyncWriteExt::write_all(&mut writer, &[0xFF])
            .await
            .unwrap();

        assert!(WireCommand::read_from_stream(&mut reader).await.is_err());
    }

    #[tokio::test]
    async fn oversized_room_name_is_rejected_on_write() {
        let (mut writer, _reader) = tokio::io::duplex(4096);

        let command = WireCommand::String(WireCommandId::JoinRoom, "r".repeat(300));

        assert!(command.write_to_stream(&mut writer).await.is_err());
    }

    #[tokio::test]
    async fn long_message_body_is_not_truncated() {
        let (mut writer, mut reader) = tokio::io::duplex(16384);

        let mut message = sample_message();
        message.body = "x".repeat(4000);

        let command = WireCommand::Message(WireCommandId::SendMessage, message);
        command.write_to_stream(&mut writer).await.unwrap();

        let received = WireCommand::read_from_stream(&mut reader).await.unwrap();

        match received {
            ReceivedWireCommand::Command(WireCommand::Message(_, parsed)) => {
                assert_eq!(parsed.body.len(), 4000);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
