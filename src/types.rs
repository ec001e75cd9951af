//! Basic type definitions for the chat server
//!
//! Provides newtype wrappers for type safety:
//! - `ConnectionId`: UUID-based unique connection identifier
//! - `RoomName`: validated room name from the join handshake

use uuid::Uuid;

use crate::error::HandshakeError;

/// Maximum accepted length of a room name, in bytes.
pub const MAX_ROOM_NAME_LEN: usize = 256;

/// Unique connection identifier (newtype pattern)
///
/// Wraps a UUID v4 for type-safe identification of one accepted connection.
/// Implements Hash and Eq for use as HashMap keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(pub Uuid);

impl ConnectionId {
    /// Create a new random connection ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Room name declared by a client in the join handshake
///
/// Line terminators are stripped before validation; an empty or oversized
/// name is a handshake error, never a silently truncated one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoomName(String);

impl RoomName {
    /// Parse a room name from raw handshake input.
    ///
    /// Strips leading/trailing `\r` and `\n`, then rejects names that are
    /// empty or longer than [`MAX_ROOM_NAME_LEN`] bytes.
    pub fn parse(raw: &str) -> Result<Self, HandshakeError> {
        let name = raw.trim_matches(|c| c == '\r' || c == '\n');
        if name.is_empty() {
            return Err(HandshakeError::EmptyName);
        }
        if name.len() > MAX_ROOM_NAME_LEN {
            return Err(HandshakeError::NameTooLong(name.len()));
        }
        Ok(Self(name.to_string()))
    }

    /// The name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RoomName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
