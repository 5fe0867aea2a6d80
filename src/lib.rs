//! User registry: admin / non-admin accounts and the links between them, served over HTTP with PostgreSQL.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::{DbConfig, ServerConfig};
pub use db::{ConnectionProvider, QueryExecutor};
pub use error::{AppError, ConfigError};
pub use model::{Link, NewUser, PermissionOverrides, Permissions, Role, UserRecord};
pub use routes::{app, common_routes, user_routes};
pub use service::{RegistrationService, RelationshipManager};
pub use state::AppState;
pub use store::{ensure_schema, PgUserStore, UserStore};
