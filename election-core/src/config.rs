//! Configuration for the election ledger

use crate::types::AccountId;
use serde::{Deserialize, Serialize};

/// Upper bound for the actor mailbox and the notification buffer
///
/// tokio panics when a bounded channel is created above its own limits.
pub const MAX_CHANNEL_CAPACITY: usize = 1 << 20;

/// Election ledger configuration
///
/// There is no default owner: build with [`Config::with_owner`] or load one
/// that names the owner explicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Service name
    pub service_name: String,

    /// Identity bound as owner at initialization
    pub owner: AccountId,

    /// Actor configuration
    #[serde(default)]
    pub actor: ActorConfig,

    /// Notification fan-out configuration
    #[serde(default)]
    pub notifications: NotificationConfig,

    /// Metrics configuration
    #[serde(default)]
    pub metrics: MetricsConfig,
}

/// Actor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorConfig {
    /// Bounded mailbox size (backpressure)
    pub mailbox_capacity: usize,
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self {
            mailbox_capacity: 1000,
        }
    }
}

/// Notification configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Broadcast buffer per subscriber; slow subscribers lag past this
    pub buffer_size: usize,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self { buffer_size: 256 }
    }
}

/// Metrics configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Enable Prometheus metrics
    pub enabled: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Config {
    /// Config with a specific owner and defaults elsewhere
    pub fn with_owner(owner: AccountId) -> Self {
        Self {
            service_name: "election-core".to_string(),
            owner,
            actor: ActorConfig::default(),
            notifications: NotificationConfig::default(),
            metrics: MetricsConfig::default(),
        }
    }

    /// Load from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| crate::Error::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from environment variables
    ///
    /// `ELECTION_OWNER` is required.
    pub fn from_env() -> crate::Result<Self> {
        let owner = std::env::var("ELECTION_OWNER").map_err(|_| {
            crate::Error::Config("ELECTION_OWNER must be set".to_string())
        })?;
        let mut config = Config::with_owner(AccountId::new(owner));

        if let Ok(capacity) = std::env::var("ELECTION_MAILBOX_CAPACITY") {
            config.actor.mailbox_capacity = capacity.parse().map_err(|e| {
                crate::Error::Config(format!("Invalid ELECTION_MAILBOX_CAPACITY: {}", e))
            })?;
        }

        if let Ok(buffer) = std::env::var("ELECTION_NOTIFICATION_BUFFER") {
            config.notifications.buffer_size = buffer.parse().map_err(|e| {
                crate::Error::Config(format!("Invalid ELECTION_NOTIFICATION_BUFFER: {}", e))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check configuration values
    pub fn validate(&self) -> crate::Result<()> {
        if self.owner.as_str().is_empty() {
            return Err(crate::Error::Config("owner must not be empty".to_string()));
        }

        if !(1..=MAX_CHANNEL_CAPACITY).contains(&self.actor.mailbox_capacity) {
            return Err(crate::Error::Config(format!(
                "actor.mailbox_capacity must be between 1 and {}",
                MAX_CHANNEL_CAPACITY
            )));
        }

        if !(1..=MAX_CHANNEL_CAPACITY).contains(&self.notifications.buffer_size) {
            return Err(crate::Error::Config(format!(
                "notifications.buffer_size must be between 1 and {}",
                MAX_CHANNEL_CAPACITY
            )));
        }

        Ok(())
    }
}
