//! Error types for the chat server
//!
//! Defines the registry, room, handshake, and per-connection error
//! taxonomy. Uses thiserror for ergonomic error definitions.

use thiserror::Error;

use crate::types::MAX_ROOM_NAME_LEN;

/// Registry-level errors
///
/// Surfaced to the requesting client as a rejection; never fatal to the
/// server.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// The process-wide room-count bound has been reached
    #[error("maximum number of rooms reached")]
    RegistryFull,
}

/// Room-level errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RoomError {
    /// The room already holds `capacity` members
    #[error("room is full")]
    RoomFull,
}

/// Handshake protocol violations
///
/// Any of these closes the connection immediately, with no room side
/// effects and no failure notice on the wire.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HandshakeError {
    /// Room name was empty after stripping line terminators
    #[error("empty room name")]
    EmptyName,

    /// Room name exceeded the accepted length
    #[error("room name of {0} bytes exceeds the {MAX_ROOM_NAME_LEN} byte limit")]
    NameTooLong(usize),
}

/// Per-connection errors
///
/// Everything here is local to one connection's task: it ends that
/// connection and is never propagated to the listener, the registry, or
/// any other connection.
#[derive(Debug, Error)]
pub enum ConnectionError {
    /// Read or write failure on the transport (fatal for this connection)
    #[error("transport error: {0}")]
    Transport(#[from] std::io::Error),

    /// The client violated the join handshake
    #[error("handshake error: {0}")]
    Handshake(#[from] HandshakeError),
}

/// Message send errors
///
/// Outcomes of a best-effort delivery to one recipient's outbound queue.
/// Consumed (logged) inside broadcast; never aborts delivery to others.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SendError {
    /// The recipient's outbound queue is full (slow or stalled peer)
    #[error("send queue full")]
    QueueFull,

    /// The receiving end of the channel has been closed
    #[error("connection closed")]
    Closed,
}
