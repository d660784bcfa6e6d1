//! Centralized configuration for Hikari.
//!
//! All tunable parameters are defined here to avoid hard-coded values
//! scattered throughout the codebase.

use std::path::PathBuf;
use std::time::Duration;

/// Central configuration for all Hikari components.
///
/// Groups related settings into logical sections. Supports environment
/// variable overrides for runtime customization.
#[derive(Debug, Clone, Default)]
pub struct HikariConfig {
    pub catalog: CatalogConfig,
    pub delivery: DeliveryConfig,
    pub server: ServerConfig,
}

/// Catalog dataset location.
#[derive(Debug, Clone, Default)]
pub struct CatalogConfig {
    /// Explicit path to the catalog document. When unset, the loader
    /// falls back to its install-relative and cwd-relative candidates.
    pub data_path: Option<PathBuf>,
}

/// How a resolved episode is delivered to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DeliveryPolicy {
    /// 307 redirect to the first source link; no outbound fetch
    Redirect,
    /// Incremental byte relay with curated headers
    Streamed,
    /// Whole-body relay; only suitable for small payloads
    Buffered,
}

impl std::fmt::Display for DeliveryPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeliveryPolicy::Redirect => write!(f, "redirect"),
            DeliveryPolicy::Streamed => write!(f, "streamed"),
            DeliveryPolicy::Buffered => write!(f, "buffered"),
        }
    }
}

impl std::str::FromStr for DeliveryPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "redirect" => Ok(DeliveryPolicy::Redirect),
            "streamed" | "stream" => Ok(DeliveryPolicy::Streamed),
            "buffered" | "buffer" => Ok(DeliveryPolicy::Buffered),
            _ => Err(format!("Invalid delivery policy: {s}")),
        }
    }
}

/// Outbound fetch and relay configuration.
#[derive(Debug, Clone)]
pub struct DeliveryConfig {
    /// Active delivery policy
    pub policy: DeliveryPolicy,
    /// Outbound connect timeout
    pub connect_timeout: Duration,
    /// Outbound read timeout, applied per read while relaying
    pub read_timeout: Duration,
    /// Chunk size for the streamed relay body
    pub relay_chunk_size: usize,
    /// User agent for outbound requests
    pub user_agent: &'static str,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            policy: DeliveryPolicy::Redirect,
            connect_timeout: Duration::from_secs(10),
            read_timeout: Duration::from_secs(30),
            relay_chunk_size: 32768, // 32 KiB
            user_agent: "hikari/0.1.0",
        }
    }
}

/// Inbound listener configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl HikariConfig {
    /// Creates configuration with environment variable overrides.
    ///
    /// Allows runtime configuration via `HIKARI_*` variables while
    /// maintaining sensible defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(path) = std::env::var("HIKARI_DATA_PATH") {
            config.catalog.data_path = Some(PathBuf::from(path));
        }

        if let Ok(policy) = std::env::var("HIKARI_DELIVERY_POLICY") {
            if let Ok(parsed) = policy.parse() {
                config.delivery.policy = parsed;
            }
        }

        if let Ok(timeout) = std::env::var("HIKARI_CONNECT_TIMEOUT") {
            if let Ok(seconds) = timeout.parse::<u64>() {
                config.delivery.connect_timeout = Duration::from_secs(seconds);
            }
        }

        if let Ok(timeout) = std::env::var("HIKARI_READ_TIMEOUT") {
            if let Ok(seconds) = timeout.parse::<u64>() {
                config.delivery.read_timeout = Duration::from_secs(seconds);
            }
        }

        if let Ok(size) = std::env::var("HIKARI_RELAY_CHUNK_SIZE") {
            if let Ok(bytes) = size.parse::<usize>() {
                config.delivery.relay_chunk_size = bytes;
            }
        }

        if let Ok(host) = std::env::var("HIKARI_HOST") {
            config.server.host = host;
        }

        if let Ok(port) = std::env::var("HIKARI_PORT") {
            if let Ok(parsed) = port.parse::<u16>() {
                config.server.port = parsed;
            }
        }

        config
    }

    /// Creates a configuration optimized for testing: short timeouts and
    /// small relay chunks.
    pub fn for_testing() -> Self {
        Self {
            delivery: DeliveryConfig {
                connect_timeout: Duration::from_millis(500),
                read_timeout: Duration::from_millis(500),
                relay_chunk_size: 1024,
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        let config = HikariConfig::default();

        assert_eq!(config.delivery.policy, DeliveryPolicy::Redirect);
        assert_eq!(config.delivery.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.delivery.read_timeout, Duration::from_secs(30));
        assert_eq!(config.delivery.relay_chunk_size, 32768);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert!(config.catalog.data_path.is_none());
    }

    #[test]
    fn test_testing_preset() {
        let config = HikariConfig::for_testing();
        assert!(config.delivery.read_timeout < Duration::from_secs(1));
        assert_eq!(config.delivery.relay_chunk_size, 1024);
    }

    #[test]
    fn test_delivery_policy_parsing() {
        assert_eq!("redirect".parse(), Ok(DeliveryPolicy::Redirect));
        assert_eq!("Streamed".parse(), Ok(DeliveryPolicy::Streamed));
        assert_eq!("buffer".parse(), Ok(DeliveryPolicy::Buffered));
        assert!("proxy".parse::<DeliveryPolicy>().is_err());
    }

    #[test]
    fn test_env_override() {
        unsafe {
            std::env::set_var("HIKARI_DELIVERY_POLICY", "streamed");
            std::env::set_var("HIKARI_READ_TIMEOUT", "15");
            std::env::set_var("HIKARI_RELAY_CHUNK_SIZE", "8192");
            std::env::set_var("HIKARI_PORT", "8080");
        }

        let config = HikariConfig::from_env();

        assert_eq!(config.delivery.policy, DeliveryPolicy::Streamed);
        assert_eq!(config.delivery.read_timeout, Duration::from_secs(15));
        assert_eq!(config.delivery.relay_chunk_size, 8192);
        assert_eq!(config.server.port, 8080);

        // Cleanup
        unsafe {
            std::env::remove_var("HIKARI_DELIVERY_POLICY");
            std::env::remove_var("HIKARI_READ_TIMEOUT");
            std::env::remove_var("HIKARI_RELAY_CHUNK_SIZE");
            std::env::remove_var("HIKARI_PORT");
        }
    }
}
