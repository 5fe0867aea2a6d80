//! Idempotent DDL for `admins`, `non_admins` and `admin_non_admin`. Same text as `schema.sql`.

use crate::db::QueryExecutor;
use crate::error::AppError;
use crate::sql::Statement;

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS admins (
        id SERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        remote_access BOOLEAN NOT NULL DEFAULT FALSE,
        video_call BOOLEAN NOT NULL DEFAULT FALSE,
        voice_call BOOLEAN NOT NULL DEFAULT FALSE,
        manage_users BOOLEAN NOT NULL DEFAULT FALSE,
        is_super_admin BOOLEAN NOT NULL DEFAULT FALSE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS non_admins (
        id SERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        family_member_count INTEGER NOT NULL DEFAULT 0
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS admin_non_admin (
        admin_id INTEGER NOT NULL REFERENCES admins(id),
        non_admin_id INTEGER NOT NULL REFERENCES non_admins(id),
        admin_email TEXT NOT NULL
    )
    "#,
];

/// Create the three tables if they do not exist. Does not alter existing tables.
pub async fn ensure_schema(executor: &QueryExecutor) -> Result<(), AppError> {
    for &ddl in SCHEMA {
        executor.execute(&Statement::new(ddl)).await?;
    }
    tracing::info!("schema ensured");
    Ok(())
}
