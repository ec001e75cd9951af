//! ChatServer: TCP listener and accept loop
//!
//! Thin by design: binds, accepts, and spawns one handler task per
//! connection. All room state lives in the [`RoomRegistry`] the server
//! owns, constructed explicitly at startup rather than as a process
//! global so tests can run independent servers side by side.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{error, info};

use crate::config::ServerConfig;
use crate::handler::handle_connection;
use crate::registry::RoomRegistry;

/// The chat server: a TCP listener plus the registry it serves
pub struct ChatServer {
    listener: TcpListener,
    registry: Arc<RoomRegistry>,
    send_queue_depth: usize,
}

impl ChatServer {
    /// Bind a listener for the configured address.
    ///
    /// A `listen_addr` ending in `:0` binds an ephemeral port; use
    /// [`local_addr`](Self::local_addr) to discover it.
    pub async fn bind(config: &ServerConfig) -> std::io::Result<Self> {
        let listener = TcpListener::bind(&config.listen_addr).await?;
        info!("Chat server listening on {}", listener.local_addr()?);

        Ok(Self {
            listener,
            registry: Arc::new(RoomRegistry::new(config.max_rooms, config.room_capacity)),
            send_queue_depth: config.send_queue_depth,
        })
    }

    /// The address the listener is bound to
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// The registry this server routes joins through
    pub fn registry(&self) -> &Arc<RoomRegistry> {
        &self.registry
    }

    /// Accept connections forever, one handler task per connection.
    ///
    /// A failed accept is logged and the loop continues; per-connection
    /// errors never reach this loop.
    pub async fn run(self) {
        loop {
            match self.listener.accept().await {
                Ok((stream, addr)) => {
                    info!("New connection from {}", addr);
                    let registry = Arc::clone(&self.registry);
                    let send_queue_depth = self.send_queue_depth;

                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(stream, registry, send_queue_depth).await
                        {
                            error!("Connection handler error: {}", e);
                        }
                    });
                }
                Err(e) => {
                    error!("Failed to accept connection: {}", e);
                }
            }
        }
    }
}
