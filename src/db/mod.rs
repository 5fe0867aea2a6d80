//! Connection acquisition and statement execution against PostgreSQL.

pub mod connection;
pub mod executor;

pub use connection::ConnectionProvider;
pub use executor::QueryExecutor;
