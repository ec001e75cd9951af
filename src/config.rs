//! Server configuration
//!
//! Loaded from a TOML file when one is given, otherwise every field
//! falls back to its default. Defaults match the classic chatroom
//! limits: port 5193, 50 rooms, 100 members per room.

use std::path::Path;

use serde::Deserialize;

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address to bind the TCP listener to.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    /// Maximum number of rooms that may exist at once.
    #[serde(default = "default_max_rooms")]
    pub max_rooms: usize,
    /// Maximum simultaneous members per room.
    #[serde(default = "default_room_capacity")]
    pub room_capacity: usize,
    /// Depth of each connection's outbound payload queue.
    #[serde(default = "default_send_queue_depth")]
    pub send_queue_depth: usize,
}

fn default_listen_addr() -> String {
    "0.0.0.0:5193".to_string()
}

fn default_max_rooms() -> usize {
    50
}

fn default_room_capacity() -> usize {
    100
}

fn default_send_queue_depth() -> usize {
    32
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            max_rooms: default_max_rooms(),
            room_capacity: default_room_capacity(),
            send_queue_depth: default_send_queue_depth(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Ok(toml::from_str(&raw)?)
    }
}

/// Configuration loading errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid TOML for [`ServerConfig`]
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.listen_addr, "0.0.0.0:5193");
        assert_eq!(config.max_rooms, 50);
        assert_eq!(config.room_capacity, 100);
        assert_eq!(config.send_queue_depth, 32);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: ServerConfig = toml::from_str(
            r#"
            listen_addr = "127.0.0.1:9000"
            max_rooms = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.listen_addr, "127.0.0.1:9000");
        assert_eq!(config.max_rooms, 3);
        assert_eq!(config.room_capacity, 100);
        assert_eq!(config.send_queue_depth, 32);
    }

    #[test]
    fn test_empty_toml_is_all_defaults() {
        let config: ServerConfig = toml::from_str("").unwrap();
        assert_eq!(config.max_rooms, ServerConfig::default().max_rooms);
    }
}
