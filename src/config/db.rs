//! Database credentials from `DB_HOST`, `DB_NAME`, `DB_USER`, `DB_PASSWORD`, `DB_PORT`.

use crate::config::loader::{parsed_or, process_env, required, VarSource};
use crate::error::ConfigError;
use sqlx::postgres::PgConnectOptions;
use std::fmt;

pub const DEFAULT_DB_PORT: u16 = 5432;

#[derive(Clone)]
pub struct DbConfig {
    pub host: String,
    pub name: String,
    pub user: String,
    pub password: String,
    pub port: u16,
}

impl DbConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(&process_env)
    }

    /// `DB_PASSWORD` may be unset (trust / peer auth); the other names are required.
    pub fn from_source(src: &dyn VarSource) -> Result<Self, ConfigError> {
        Ok(DbConfig {
            host: required(src, "DB_HOST")?,
            name: required(src, "DB_NAME")?,
            user: required(src, "DB_USER")?,
            password: src.var("DB_PASSWORD").unwrap_or_default(),
            port: parsed_or(src, "DB_PORT", DEFAULT_DB_PORT)?,
        })
    }

    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.name)
            .username(&self.user)
            .password(&self.password)
    }

    /// `host:port/name`, safe for logs and error messages.
    pub fn target(&self) -> String {
        format!("{}:{}/{}", self.host, self.port, self.name)
    }
}

impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("name", &self.name)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("port", &self.port)
            .finish()
    }
}
