//! Configuration Module
//!
//! Handles loading Redis connection settings from environment variables.

use std::env;

/// Redis connection parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct RedisConfig {
    /// Hostname or IP of the Redis server
    pub host: String,
    /// TCP port of the Redis server
    pub port: u16,
    /// Optional password for AUTH
    pub password: Option<String>,
    /// Logical database index selected after connecting
    pub database: u8,
    /// Whether to connect over TLS
    pub tls: bool,
}

impl RedisConfig {
    /// Creates a new RedisConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `REDIS_HOST` - Server hostname (default: localhost)
    /// - `REDIS_PORT` - Server port (default: 6379)
    /// - `REDIS_PASSWORD` - AUTH password (default: none)
    /// - `REDIS_DB` - Database index (default: 0)
    /// - `REDIS_TLS` - Set to `1` or `true` to enable TLS (default: off)
    pub fn from_env() -> Self {
        Self {
            host: env::var("REDIS_HOST").unwrap_or_else(|_| "localhost".to_string()),
            port: env::var("REDIS_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(6379),
            password: env::var("REDIS_PASSWORD").ok().filter(|p| !p.is_empty()),
            database: env::var("REDIS_DB")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
            tls: env::var("REDIS_TLS")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        }
    }

    /// Builds the connection URL understood by the redis client.
    pub fn connection_url(&self) -> String {
        let scheme = if self.tls { "rediss" } else { "redis" };
        let auth = match &self.password {
            Some(password) => format!(":{}@", password),
            None => String::new(),
        };
        format!(
            "{}://{}{}:{}/{}",
            scheme, auth, self.host, self.port, self.database
        )
    }
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 6379,
            password: None,
            database: 0,
            tls: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = RedisConfig::default();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 6379);
        assert_eq!(config.password, None);
        assert_eq!(config.database, 0);
        assert!(!config.tls);
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("REDIS_HOST");
        env::remove_var("REDIS_PORT");
        env::remove_var("REDIS_PASSWORD");
        env::remove_var("REDIS_DB");
        env::remove_var("REDIS_TLS");

        let config = RedisConfig::from_env();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 6379);
        assert_eq!(config.password, None);
        assert_eq!(config.database, 0);
        assert!(!config.tls);
    }

    #[test]
    fn test_connection_url_plain() {
        let config = RedisConfig::default();
        assert_eq!(config.connection_url(), "redis://localhost:6379/0");
    }

    #[test]
    fn test_connection_url_with_password_and_tls() {
        let config = RedisConfig {
            host: "cache.internal".to_string(),
            port: 6380,
            password: Some("hunter2".to_string()),
            database: 3,
            tls: true,
        };
        assert_eq!(
            config.connection_url(),
            "rediss://:hunter2@cache.internal:6380/3"
        );
    }
}
