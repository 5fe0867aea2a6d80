//! HTTP server settings.

use crate::config::loader::{flag, parsed_or, process_env, VarSource};
use crate::error::ConfigError;
use std::net::SocketAddr;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:7071";
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Run the idempotent `CREATE TABLE IF NOT EXISTS` bootstrap before serving.
    pub ensure_schema: bool,
    pub max_body_bytes: usize,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(&process_env)
    }

    pub fn from_source(src: &dyn VarSource) -> Result<Self, ConfigError> {
        let default_addr: SocketAddr = DEFAULT_BIND_ADDR
            .parse()
            .map_err(|_| ConfigError::InvalidVar { key: "BIND_ADDR", value: DEFAULT_BIND_ADDR.into() })?;
        Ok(ServerConfig {
            bind_addr: parsed_or(src, "BIND_ADDR", default_addr)?,
            ensure_schema: flag(src, "DB_ENSURE_SCHEMA"),
            max_body_bytes: parsed_or(src, "MAX_BODY_BYTES", DEFAULT_MAX_BODY_BYTES)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_unset() {
        let cfg = ServerConfig::from_source(&|_: &str| -> Option<String> { None }).unwrap();
        assert_eq!(cfg.bind_addr.port(), 7071);
        assert!(!cfg.ensure_schema);
        assert_eq!(cfg.max_body_bytes, 64 * 1024);
    }

    #[test]
    fn overrides() {
        let src = |k: &str| match k {
            "BIND_ADDR" => Some("127.0.0.1:8080".to_string()),
            "DB_ENSURE_SCHEMA" => Some("true".to_string()),
            _ => None,
        };
        let cfg = ServerConfig::from_source(&src).unwrap();
        assert_eq!(cfg.bind_addr.to_string(), "127.0.0.1:8080");
        assert!(cfg.ensure_schema);
    }
}
