//! Client handle definition
//!
//! Represents one connected client as seen by a room: its identity and
//! the outbound channel its writer task drains.

use bytes::Bytes;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

use crate::error::SendError;
use crate::types::ConnectionId;

/// Outbound handle for one connected client
///
/// Cloning is cheap (the channel sender is refcounted), which lets a room
/// snapshot its membership without holding its lock across delivery.
#[derive(Debug, Clone)]
pub struct Client {
    /// Unique identifier for this connection
    pub id: ConnectionId,
    /// Room → writer task payload channel
    sender: mpsc::Sender<Bytes>,
}

impl Client {
    /// Create a new client handle with the given ID and sender channel
    pub fn new(id: ConnectionId, sender: mpsc::Sender<Bytes>) -> Self {
        Self { id, sender }
    }

    /// Queue a payload for delivery to this client, without blocking.
    ///
    /// A full queue or a closed channel is reported to the caller, which
    /// decides whether the payload is worth retrying (broadcast never
    /// retries; it drops the payload for this recipient only).
    pub fn try_send(&self, payload: Bytes) -> Result<(), SendError> {
        self.sender.try_send(payload).map_err(|e| match e {
            TrySendError::Full(_) => SendError::QueueFull,
            TrySendError::Closed(_) => SendError::Closed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_try_send_delivers() {
        let (tx, mut rx) = mpsc::channel(4);
        let client = Client::new(ConnectionId::new(), tx);

        client.try_send(Bytes::from_static(b"hi")).unwrap();

        assert_eq!(rx.recv().await.unwrap(), Bytes::from_static(b"hi"));
    }

    #[tokio::test]
    async fn test_try_send_reports_full_queue() {
        let (tx, _rx) = mpsc::channel(1);
        let client = Client::new(ConnectionId::new(), tx);

        client.try_send(Bytes::from_static(b"one")).unwrap();
        let err = client.try_send(Bytes::from_static(b"two")).unwrap_err();

        assert_eq!(err, SendError::QueueFull);
    }

    #[tokio::test]
    async fn test_try_send_reports_closed_channel() {
        let (tx, rx) = mpsc::channel(4);
        let client = Client::new(ConnectionId::new(), tx);
        drop(rx);

        let err = client.try_send(Bytes::from_static(b"hi")).unwrap_err();

        assert_eq!(err, SendError::Closed);
    }
}
