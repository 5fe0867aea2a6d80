//! Runs one `Statement` per call on its own connection inside a transaction.
//!
//! Every exit path ends the transaction (commit on success, rollback on failure) and closes the
//! connection before returning.

use crate::db::connection::ConnectionProvider;
use crate::error::AppError;
use crate::sql::{bind_all, Statement};
use sqlx::postgres::{PgConnection, PgRow};
use sqlx::Connection;

enum Mode {
    One,
    All,
    Write,
}

enum Fetched {
    One(Option<PgRow>),
    All(Vec<PgRow>),
    Done(u64),
}

#[derive(Clone)]
pub struct QueryExecutor {
    provider: ConnectionProvider,
}

impl QueryExecutor {
    pub fn new(provider: ConnectionProvider) -> Self {
        QueryExecutor { provider }
    }

    /// Single row or none. Used for lookups and `INSERT ... RETURNING`.
    pub async fn fetch_one(&self, stmt: &Statement) -> Result<Option<PgRow>, AppError> {
        match self.run(stmt, Mode::One).await? {
            Fetched::One(row) => Ok(row),
            _ => Ok(None),
        }
    }

    /// All rows in the order the statement produces them.
    pub async fn fetch_all(&self, stmt: &Statement) -> Result<Vec<PgRow>, AppError> {
        match self.run(stmt, Mode::All).await? {
            Fetched::All(rows) => Ok(rows),
            _ => Ok(Vec::new()),
        }
    }

    /// Write and commit; returns rows affected.
    pub async fn execute(&self, stmt: &Statement) -> Result<u64, AppError> {
        match self.run(stmt, Mode::Write).await? {
            Fetched::Done(n) => Ok(n),
            _ => Ok(0),
        }
    }

    async fn run(&self, stmt: &Statement, mode: Mode) -> Result<Fetched, AppError> {
        tracing::debug!(sql = %stmt.sql, params = ?stmt.params, "query");
        let mut conn = self.provider.connect().await?;
        let outcome = Self::run_in_tx(&mut conn, stmt, mode).await;
        if let Err(e) = conn.close().await {
            tracing::warn!(error = %e, "closing database connection failed");
        }
        outcome
    }

    async fn run_in_tx(conn: &mut PgConnection, stmt: &Statement, mode: Mode) -> Result<Fetched, AppError> {
        let mut tx = conn.begin().await?;
        let query = bind_all(sqlx::query(stmt.sql), &stmt.params);
        let result = match mode {
            Mode::One => query.fetch_optional(&mut *tx).await.map(Fetched::One),
            Mode::All => query.fetch_all(&mut *tx).await.map(Fetched::All),
            Mode::Write => query
                .execute(&mut *tx)
                .await
                .map(|r| Fetched::Done(r.rows_affected())),
        };
        match result {
            Ok(out) => {
                tx.commit().await?;
                Ok(out)
            }
            Err(e) => {
                if let Err(rb) = tx.rollback().await {
                    tracing::warn!(error = %rb, "rollback failed");
                }
                Err(e.into())
            }
        }
    }
}
