//! Minimal Source RCON client, enough to push `whitelist add/remove`
//! commands to the game server console. One connection per command: the
//! portal sends a handful of commands a day, not a stream.

use async_trait::async_trait;
use secrecy::ExposeSecret;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::config::RconSettings;
use crate::error::AppError;
use crate::services::sync::CommandSink;

const TYPE_AUTH: i32 = 3;
const TYPE_EXEC: i32 = 2;
const AUTH_REQUEST_ID: i32 = 1;
const EXEC_REQUEST_ID: i32 = 2;

// Protocol payload cap; whitelist commands are far below it.
const MAX_PACKET_LEN: usize = 4096;

pub struct RconSink {
    settings: RconSettings,
}

impl RconSink {
    pub fn new(settings: RconSettings) -> Self {
        Self { settings }
    }

    async fn exec(&self, command: &str) -> Result<(), AppError> {
        let mut stream = TcpStream::connect(&self.settings.address)
            .await
            .map_err(|e| AppError::Sync(format!("connect {}: {e}", self.settings.address)))?;

        write_packet(
            &mut stream,
            AUTH_REQUEST_ID,
            TYPE_AUTH,
            self.settings.password.expose_secret(),
        )
        .await?;
        let (id, _type, _body) = read_packet(&mut stream).await?;
        if id == -1 {
            return Err(AppError::Sync("RCON authentication rejected".to_string()));
        }

        write_packet(&mut stream, EXEC_REQUEST_ID, TYPE_EXEC, command).await?;
        let (_id, _type, body) = read_packet(&mut stream).await?;
        tracing::debug!(command, response = %body, "RCON command executed");
        Ok(())
    }
}

#[async_trait]
impl CommandSink for RconSink {
    async fn add(&self, name: &str) -> Result<(), AppError> {
        self.exec(&format!("whitelist add {name}")).await
    }

    async fn remove(&self, name: &str) -> Result<(), AppError> {
        self.exec(&format!("whitelist remove {name}")).await
    }
}

/// Frame a packet: little-endian length, then id, type, body and two NUL
/// terminators.
fn encode_packet(id: i32, packet_type: i32, body: &str) -> Vec<u8> {
    let len = 10 + body.len();
    let mut buf = Vec::with_capacity(4 + len);
    buf.extend_from_slice(&(len as i32).to_le_bytes());
    buf.extend_from_slice(&id.to_le_bytes());
    buf.extend_from_slice(&packet_type.to_le_bytes());
    buf.extend_from_slice(body.as_bytes());
    buf.extend_from_slice(&[0, 0]);
    buf
}

/// Parse the length-stripped remainder of a packet.
fn decode_packet(payload: &[u8]) -> Result<(i32, i32, String), AppError> {
    if payload.len() < 10 {
        return Err(AppError::Sync(format!(
            "short RCON packet: {} bytes",
            payload.len()
        )));
    }
    let id = i32::from_le_bytes([payload[0], payload[1], payload[2], payload[3]]);
    let packet_type = i32::from_le_bytes([payload[4], payload[5], payload[6], payload[7]]);
    let body = String::from_utf8_lossy(&payload[8..payload.len() - 2]).into_owned();
    Ok((id, packet_type, body))
}

async fn write_packet(
    stream: &mut TcpStream,
    id: i32,
    packet_type: i32,
    body: &str,
) -> Result<(), AppError> {
    let buf = encode_packet(id, packet_type, body);
    stream
        .write_all(&buf)
        .await
        .map_err(|e| AppError::Sync(format!("write: {e}")))?;
    Ok(())
}

async fn read_packet(stream: &mut TcpStream) -> Result<(i32, i32, String), AppError> {
    let mut len_buf = [0u8; 4];
    stream
        .read_exact(&mut len_buf)
        .await
        .map_err(|e| AppError::Sync(format!("read length: {e}")))?;
    let len = i32::from_le_bytes(len_buf);
    if !(10..=MAX_PACKET_LEN as i32).contains(&len) {
        return Err(AppError::Sync(format!("invalid RCON packet length: {len}")));
    }
    let mut payload = vec![0u8; len as usize];
    stream
        .read_exact(&mut payload)
        .await
        .map_err(|e| AppError::Sync(format!("read payload: {e}")))?;
    decode_packet(&payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_frames_length_and_terminators() {
        let buf = encode_packet(1, TYPE_AUTH, "hunter2");
        // 10 fixed bytes + 7-byte body.
        assert_eq!(&buf[0..4], &17i32.to_le_bytes());
        assert_eq!(buf.len(), 4 + 17);
        assert_eq!(&buf[buf.len() - 2..], &[0, 0]);
    }

    #[test]
    fn decode_roundtrip() {
        let buf = encode_packet(42, TYPE_EXEC, "whitelist add Steve");
        let (id, packet_type, body) = decode_packet(&buf[4..]).unwrap();
        assert_eq!(id, 42);
        assert_eq!(packet_type, TYPE_EXEC);
        assert_eq!(body, "whitelist add Steve");
    }

    #[test]
    fn decode_rejects_short_packets() {
        assert!(decode_packet(&[0, 0, 0]).is_err());
    }
}
