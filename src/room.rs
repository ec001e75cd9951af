//! Room struct definition
//!
//! A named broadcast domain: owns its membership set and the lock
//! guarding it, and fans payloads out to every member but the sender.

use std::collections::HashMap;

use bytes::Bytes;
use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::client::Client;
use crate::error::RoomError;
use crate::types::{ConnectionId, RoomName};

/// A chat room with a bounded membership set
///
/// The membership lock is per-room: operations on one room never block
/// another. Join, leave, and the snapshot phase of broadcast are each a
/// single critical section; delivery happens after the lock is released
/// so a slow recipient cannot stall the room.
#[derive(Debug)]
pub struct Room {
    /// Room name, unique key in the registry
    name: RoomName,
    /// Maximum simultaneous members
    capacity: usize,
    /// Currently joined members, keyed by connection ID
    members: Mutex<HashMap<ConnectionId, Client>>,
}

impl Room {
    /// Create a new empty room with the given name and member capacity
    pub fn new(name: RoomName, capacity: usize) -> Self {
        Self {
            name,
            capacity,
            members: Mutex::new(HashMap::new()),
        }
    }

    /// The room's name
    pub fn name(&self) -> &RoomName {
        &self.name
    }

    /// Add a client to the room.
    ///
    /// Fails with [`RoomError::RoomFull`] when the room already holds
    /// `capacity` members; membership is unchanged on failure.
    pub fn join(&self, client: Client) -> Result<(), RoomError> {
        let mut members = self.members.lock();
        if members.len() >= self.capacity {
            return Err(RoomError::RoomFull);
        }
        members.insert(client.id, client);
        Ok(())
    }

    /// Remove a client from the room.
    ///
    /// Idempotent: removing an absent client is a no-op, since a
    /// connection can be torn down by more than one code path.
    pub fn leave(&self, id: &ConnectionId) {
        self.members.lock().remove(id);
    }

    /// Deliver `payload` to every member except `from`.
    ///
    /// Membership is snapshotted under the lock and the lock released
    /// before any delivery. Each delivery is a non-blocking queue push; a
    /// failed push is logged and skipped without touching membership.
    /// Removal happens only on that recipient's own disconnect path.
    pub fn broadcast(&self, from: ConnectionId, payload: Bytes) {
        let recipients: Vec<Client> = {
            let members = self.members.lock();
            members
                .values()
                .filter(|client| client.id != from)
                .cloned()
                .collect()
        };

        debug!(
            "Broadcasting {} bytes from {} to {} member(s) of room '{}'",
            payload.len(),
            from,
            recipients.len(),
            self.name
        );

        for client in recipients {
            if let Err(e) = client.try_send(payload.clone()) {
                warn!(
                    "Dropped payload for {} in room '{}': {}",
                    client.id, self.name, e
                );
            }
        }
    }

    /// Number of members currently joined
    pub fn member_count(&self) -> usize {
        self.members.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn room(capacity: usize) -> Room {
        Room::new(RoomName::parse("lobby").unwrap(), capacity)
    }

    fn member(room: &Room) -> (ConnectionId, mpsc::Receiver<Bytes>) {
        let (tx, rx) = mpsc::channel(8);
        let id = ConnectionId::new();
        room.join(Client::new(id, tx)).unwrap();
        (id, rx)
    }

    #[tokio::test]
    async fn test_join_respects_capacity() {
        let room = room(2);
        let (_a, _rx_a) = member(&room);
        let (_b, _rx_b) = member(&room);

        let (tx, _rx) = mpsc::channel(8);
        let err = room.join(Client::new(ConnectionId::new(), tx)).unwrap_err();

        assert_eq!(err, RoomError::RoomFull);
        assert_eq!(room.member_count(), 2);
    }

    #[tokio::test]
    async fn test_leave_is_idempotent() {
        let room = room(4);
        let (a, _rx_a) = member(&room);

        room.leave(&a);
        assert_eq!(room.member_count(), 0);

        // Leaving again, or leaving a never-joined ID, changes nothing
        room.leave(&a);
        room.leave(&ConnectionId::new());
        assert_eq!(room.member_count(), 0);
    }

    #[tokio::test]
    async fn test_broadcast_skips_sender() {
        let room = room(4);
        let (a, mut rx_a) = member(&room);
        let (_b, mut rx_b) = member(&room);

        room.broadcast(a, Bytes::from_static(b"hi"));

        assert_eq!(rx_b.recv().await.unwrap(), Bytes::from_static(b"hi"));
        assert!(rx_a.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_broadcast_reaches_all_other_members() {
        let room = room(4);
        let (a, _rx_a) = member(&room);
        let (_b, mut rx_b) = member(&room);
        let (_c, mut rx_c) = member(&room);

        room.broadcast(a, Bytes::from_static(b"fan out"));

        assert_eq!(rx_b.recv().await.unwrap(), Bytes::from_static(b"fan out"));
        assert_eq!(rx_c.recv().await.unwrap(), Bytes::from_static(b"fan out"));
    }

    #[tokio::test]
    async fn test_broadcast_to_empty_room_is_noop() {
        let room = room(4);
        let (a, mut rx_a) = member(&room);

        room.broadcast(a, Bytes::from_static(b"echo?"));

        assert!(rx_a.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_failed_delivery_keeps_membership() {
        let room = room(4);
        let (a, _rx_a) = member(&room);

        // A member whose receiver is gone: delivery fails, membership stays
        let (tx, rx) = mpsc::channel(1);
        let dead = ConnectionId::new();
        room.join(Client::new(dead, tx)).unwrap();
        drop(rx);

        room.broadcast(a, Bytes::from_static(b"hi"));

        assert_eq!(room.member_count(), 2);
    }

    #[tokio::test]
    async fn test_full_queue_does_not_abort_fan_out() {
        let room = room(4);
        let (a, _rx_a) = member(&room);

        // Saturate one member's queue
        let (tx, _rx_slow) = mpsc::channel(1);
        let slow = ConnectionId::new();
        room.join(Client::new(slow, tx.clone())).unwrap();
        tx.try_send(Bytes::from_static(b"stuck")).unwrap();

        let (_c, mut rx_c) = member(&room);

        room.broadcast(a, Bytes::from_static(b"hi"));

        // The healthy member still receives despite the saturated one
        assert_eq!(rx_c.recv().await.unwrap(), Bytes::from_static(b"hi"));
        assert_eq!(room.member_count(), 3);
    }
}
