//! Server configuration from environment variables (optionally seeded from `.env`).

use crate::error::ConfigError;
use std::net::SocketAddr;
use std::str::FromStr;

pub const DEFAULT_BIND_ADDR: ([u8; 4], u16) = ([0, 0, 0, 0], 3000);
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_USER_ID: i32 = 1;
pub const DEFAULT_BODY_LIMIT: usize = 64 * 1024;

#[derive(Clone, Debug, PartialEq)]
pub struct ServerConfig {
    /// PostgreSQL URL. None selects the in-memory store.
    pub database_url: Option<String>,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
    /// Acting user for requests without an `X-User-ID` header.
    pub default_user_id: i32,
    pub body_limit: usize,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        Ok(ServerConfig {
            database_url: get("DATABASE_URL"),
            bind_addr: parse_or("BIND_ADDR", get("BIND_ADDR"), SocketAddr::from(DEFAULT_BIND_ADDR))?,
            max_connections: parse_or("DB_MAX_CONNECTIONS", get("DB_MAX_CONNECTIONS"), DEFAULT_MAX_CONNECTIONS)?,
            default_user_id: parse_or("DEFAULT_USER_ID", get("DEFAULT_USER_ID"), DEFAULT_USER_ID)?,
            body_limit: parse_or("REQUEST_BODY_LIMIT", get("REQUEST_BODY_LIMIT"), DEFAULT_BODY_LIMIT)?,
        })
    }
}

fn parse_or<T: FromStr>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value.parse().map_err(|_| ConfigError::InvalidValue { key, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let env: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        ServerConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let c = config(&[]).unwrap();
        assert_eq!(c.database_url, None);
        assert_eq!(c.bind_addr, "0.0.0.0:3000".parse::<SocketAddr>().unwrap());
        assert_eq!(c.max_connections, 5);
        assert_eq!(c.default_user_id, 1);
        assert_eq!(c.body_limit, 64 * 1024);
    }

    #[test]
    fn values_are_read_and_trimmed() {
        let c = config(&[
            ("DATABASE_URL", " postgres://localhost/favorites "),
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("DEFAULT_USER_ID", "7"),
            ("DB_MAX_CONNECTIONS", ""),
        ])
        .unwrap();
        assert_eq!(c.database_url.as_deref(), Some("postgres://localhost/favorites"));
        assert_eq!(c.bind_addr.port(), 8080);
        assert_eq!(c.default_user_id, 7);
        assert_eq!(c.max_connections, 5);
    }

    #[test]
    fn malformed_number_is_an_error() {
        let err = config(&[("DEFAULT_USER_ID", "one")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "DEFAULT_USER_ID", .. }));
    }
}
