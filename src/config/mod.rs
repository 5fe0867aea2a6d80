//! Process configuration: database credentials and HTTP server settings, read once at startup.

pub mod db;
pub mod loader;
pub mod server;

pub use db::*;
pub use loader::*;
pub use server::*;
