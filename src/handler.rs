//! Per-connection handler
//!
//! Drives one accepted connection through its lifecycle: join handshake,
//! relay loop, and membership cleanup on every exit path.

use std::sync::Arc;

use bytes::Bytes;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::client::Client;
use crate::error::{ConnectionError, RegistryError, RoomError};
use crate::registry::RoomRegistry;
use crate::types::{ConnectionId, RoomName, MAX_ROOM_NAME_LEN};

/// Size of the fixed relay read buffer; longer writes by a peer arrive
/// as multiple payloads chunked at this boundary.
pub const READ_BUFFER_SIZE: usize = 1024;

/// Size of the handshake read buffer. Larger than the room-name limit so
/// an oversized name is read and rejected rather than silently clipped.
const HANDSHAKE_BUFFER_SIZE: usize = 2 * MAX_ROOM_NAME_LEN;

/// Notice written to the peer when the registry is at its room bound.
const REGISTRY_FULL_NOTICE: &[u8] = b"Error: Cannot create or join chatroom.\n";

/// Notice written to the peer when the requested room is full.
const ROOM_FULL_NOTICE: &[u8] = b"Error: Chatroom is full.\n";

/// Handle one accepted connection.
///
/// Performs exactly one handshake read for the room name, joins the room
/// through `registry`, then relays every subsequent read to the room
/// until the peer disconnects or errors. The room membership entry is
/// removed exactly once when the connection ends, whatever ended it.
///
/// All errors returned here are local to this connection; the caller
/// logs them and moves on.
pub async fn handle_connection(
    mut stream: TcpStream,
    registry: Arc<RoomRegistry>,
    send_queue_depth: usize,
) -> Result<(), ConnectionError> {
    let peer_addr = stream
        .peer_addr()
        .map(|a| a.to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    let connection_id = ConnectionId::new();
    debug!("Client {} connected from {}", connection_id, peer_addr);

    // Unjoined: one bounded read yields the room name
    let mut name_buf = [0u8; HANDSHAKE_BUFFER_SIZE];
    let n = stream.read(&mut name_buf).await?;
    if n == 0 {
        debug!("Client {} closed before the handshake", connection_id);
        return Ok(());
    }

    let raw_name = String::from_utf8_lossy(&name_buf[..n]);
    let room_name = match RoomName::parse(&raw_name) {
        Ok(name) => name,
        Err(e) => {
            warn!("Rejecting {}: {}", connection_id, e);
            return Err(e.into());
        }
    };

    let room = match registry.get_or_create(&room_name) {
        Ok(room) => room,
        Err(RegistryError::RegistryFull) => {
            warn!(
                "Turning away {}: room '{}' cannot be created, registry is full",
                connection_id, room_name
            );
            let _ = stream.write_all(REGISTRY_FULL_NOTICE).await;
            return Ok(());
        }
    };

    let (payload_tx, mut payload_rx) = mpsc::channel::<Bytes>(send_queue_depth);

    if let Err(RoomError::RoomFull) = room.join(Client::new(connection_id, payload_tx)) {
        warn!(
            "Turning away {}: room '{}' is full",
            connection_id, room_name
        );
        let _ = stream.write_all(ROOM_FULL_NOTICE).await;
        return Ok(());
    }

    // Joined
    info!("Client {} joined room '{}'", connection_id, room_name);

    let (mut read_half, mut write_half) = stream.into_split();

    // Read task: each read is one opaque payload relayed to the room
    let reader_room = Arc::clone(&room);
    let mut read_task = tokio::spawn(async move {
        let mut buf = [0u8; READ_BUFFER_SIZE];
        loop {
            match read_half.read(&mut buf).await {
                Ok(0) => {
                    debug!("Client {} closed the connection", connection_id);
                    break;
                }
                Ok(n) => {
                    reader_room.broadcast(connection_id, Bytes::copy_from_slice(&buf[..n]));
                }
                Err(e) => {
                    debug!("Read error for {}: {}", connection_id, e);
                    break;
                }
            }
        }
    });

    // Write task: drains the outbound queue into the socket
    let mut write_task = tokio::spawn(async move {
        while let Some(payload) = payload_rx.recv().await {
            if let Err(e) = write_half.write_all(&payload).await {
                debug!("Write error for {}: {}", connection_id, e);
                break;
            }
        }
        let _ = write_half.shutdown().await;
    });

    tokio::select! {
        _ = &mut read_task => {
            debug!("Read task completed for {}", connection_id);
        }
        _ = &mut write_task => {
            debug!("Write task completed for {}", connection_id);
        }
    }

    // Closed: stop relaying before leaving so a half-dead connection
    // cannot keep broadcasting into a room it is no longer a member of
    read_task.abort();
    room.leave(&connection_id);
    write_task.abort();

    info!("Client {} left room '{}'", connection_id, room_name);

    Ok(())
}
