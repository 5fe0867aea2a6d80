//! Opens one PostgreSQL connection per call from an explicit `DbConfig`. No pooling.

use crate::config::DbConfig;
use crate::error::AppError;
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::ConnectOptions;

/// Not `Debug`: the connect options hold the password.
#[derive(Clone)]
pub struct ConnectionProvider {
    options: PgConnectOptions,
    target: String,
}

impl ConnectionProvider {
    pub fn new(config: &DbConfig) -> Self {
        tracing::info!(config = ?config, "database configuration");
        ConnectionProvider {
            options: config.connect_options().application_name(env!("CARGO_PKG_NAME")),
            target: config.target(),
        }
    }

    pub async fn connect(&self) -> Result<PgConnection, AppError> {
        let conn = self
            .options
            .connect()
            .await
            .map_err(|source| AppError::Connection {
                target: self.target.clone(),
                source,
            })?;
        tracing::debug!(target_db = %self.target, "connected to the database");
        Ok(conn)
    }
}
