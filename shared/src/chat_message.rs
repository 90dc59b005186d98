use core::error::Error;
use std::str::from_utf8;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// A single chat message as it travels between client and server. It is never
/// stored anywhere; it only exists while being forwarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub room: String,
    pub author: String,
    pub body: String,
    pub sent_at: String,
}

impl ChatMessage {
    pub async fn write_to_stream<W>(
        &self,
        stream: &mut W,
    ) -> Result<(), Box<dyn Error + Send + Sync>>
    where
        W: AsyncWrite + Unpin,
    {
        if self.body.len() > u16::MAX as usize {
            return Err("Message body too large".into());
        }

        let mut bytes = Vec::new();

        for field in [&self.room, &self.author, &self.sent_at] {
            if field.len() > u8::MAX as usize {
                return Err("Message field too large".into());
            }

            bytes.push(field.len() as u8);
            bytes.extend(field.as_bytes());
        }

        bytes.extend((self.body.len() as u16).to_be_bytes());
        bytes.extend(self.body.as_bytes());

        stream.write_all(&bytes).await?;

        Ok(())
    }

    pub async fn read_from_stream<R>(stream: &mut R) -> Result<Self, Box<dyn Error + Send + Sync>>
    where
        R: AsyncRead + Unpin,
    {
        let room = read_short_string(stream).await?;
        let author = read_short_string(stream).await?;
        let sent_at = read_short_string(stream).await?;

        let mut body_len_buf = [0; 2];
        stream.read_exact(&mut body_len_buf).await?;
        let body_len = u16::from_be_bytes(body_len_buf) as usize;

        let mut body_buf = vec![0; body_len];
        stream.read_exact(&mut body_buf).await?;
        let body = from_utf8(&body_buf)?.to_string();

        Ok(Self {
            room,
            author,
            body,
            sent_at,
        })
    }
}

async fn read_short_string<R>(stream: &mut R) -> Result<String, Box<dyn Error + Send + Sync>>
where
    R: AsyncRead + Unpin,
{
    let mut len_buf = [0];
    stream.read_exact(&mut len_buf).await?;
    let len = len_buf[0] as usize;

    let mut buf = vec![0; len];
    stream.read_exact(&mut buf).await?;

    Ok(from_utf8(&buf)?.to_string())
}
