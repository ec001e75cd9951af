//! Multi-room TCP Chat Server Library
//!
//! A line-of-sight-simple chat server: clients connect over TCP, send a
//! room name as their first bytes, and every subsequent read is relayed
//! verbatim to all other members of that room.
//!
//! # Features
//! - Named rooms, created lazily on first join
//! - Bounded room count and per-room member capacity
//! - Verbatim payload relay with no envelope or parsing
//! - Per-connection lifecycle handling and cleanup
//!
//! # Architecture
//! One tokio task per connection plus a writer task draining that
//! connection's outbound queue:
//! - `RoomRegistry` maps names to rooms under a single registry lock
//! - Each `Room` guards its membership with its own lock; broadcast
//!   snapshots the membership, releases the lock, then delivers through
//!   bounded per-connection queues so a slow peer stalls nobody
//! - `handle_connection` runs the Unjoined → Joined → Closed state
//!   machine for one connection
//!
//! # Example
//! ```ignore
//! use chatroomd::{ChatServer, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     let config = ServerConfig::default();
//!     let server = ChatServer::bind(&config).await?;
//!     server.run().await;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod handler;
pub mod registry;
pub mod room;
pub mod server;
pub mod types;

// Re-export main types for convenience
pub use client::Client;
pub use config::{ConfigError, ServerConfig};
pub use error::{ConnectionError, HandshakeError, RegistryError, RoomError, SendError};
pub use handler::handle_connection;
pub use registry::RoomRegistry;
pub use room::Room;
pub use server::ChatServer;
pub use types::{ConnectionId, RoomName};
