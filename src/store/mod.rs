//! Persistence seam between the services and the database.

use crate::error::AppError;
use crate::model::{Link, NewUser, UserRecord};
use async_trait::async_trait;

#[cfg(test)]
pub mod memory;
pub mod postgres;
pub mod schema;

pub use postgres::PgUserStore;
pub use schema::ensure_schema;

/// Row-level operations the handlers need. `PgUserStore` is the production implementation.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert into the table the variant belongs to; returns the generated id.
    /// A duplicate email yields `AppError::Uniqueness`.
    async fn insert_user(&self, user: &NewUser) -> Result<i32, AppError>;

    async fn admin_id_by_email(&self, email: &str) -> Result<Option<i32>, AppError>;

    async fn non_admin_id_by_email(&self, email: &str) -> Result<Option<i32>, AppError>;

    async fn insert_link(&self, link: &Link) -> Result<(), AppError>;

    /// Link rows of one admin, ordered by non-admin id. Duplicates are returned as stored.
    async fn links_for_admin(&self, admin_id: i32) -> Result<Vec<Link>, AppError>;

    /// Admins ordered by id, then non-admins ordered by id.
    async fn list_users(&self) -> Result<Vec<UserRecord>, AppError>;

    /// Round trip to the store for readiness checks.
    async fn ping(&self) -> Result<(), AppError>;
}
