//! Server configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use std::net::SocketAddr;
use truco::notify::broadcaster::DEFAULT_SUBSCRIBER_CAPACITY;

/// Default bind address when neither `--bind` nor `SERVER_BIND` is given
pub const DEFAULT_BIND: &str = "127.0.0.1:8080";

/// Most games that can be created at startup
pub const MAX_SEED_GAMES: usize = 64;

/// Complete server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server bind address
    pub bind: SocketAddr,
    /// Buffered change events per WebSocket subscriber
    pub notify_channel_capacity: usize,
    /// Number of games to create on startup
    pub seed_games: usize,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `bind_override` - Optional bind address override (from CLI args)
    ///
    /// # Errors
    ///
    /// Returns error if `SERVER_BIND` is set but is not a socket address
    pub fn from_env(bind_override: Option<SocketAddr>) -> Result<Self, ConfigError> {
        let bind = match bind_override {
            Some(bind) => bind,
            None => match std::env::var("SERVER_BIND") {
                Ok(value) => value.parse().map_err(|_| ConfigError::Invalid {
                    var: "SERVER_BIND".to_string(),
                    reason: format!("'{value}' is not an IP:PORT address"),
                })?,
                Err(_) => default_bind(),
            },
        };

        Ok(ServerConfig {
            bind,
            notify_channel_capacity: parse_env_or(
                "NOTIFY_CHANNEL_CAPACITY",
                DEFAULT_SUBSCRIBER_CAPACITY,
            ),
            seed_games: parse_env_or("SEED_GAMES", 0),
        })
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.notify_channel_capacity == 0 {
            return Err(ConfigError::Invalid {
                var: "NOTIFY_CHANNEL_CAPACITY".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.seed_games > MAX_SEED_GAMES {
            return Err(ConfigError::Invalid {
                var: "SEED_GAMES".to_string(),
                reason: format!("Must be at most {MAX_SEED_GAMES}"),
            });
        }

        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            notify_channel_capacity: DEFAULT_SUBSCRIBER_CAPACITY,
            seed_games: 0,
        }
    }
}

fn default_bind() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8080))
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Helper to parse environment variable with default fallback
fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
