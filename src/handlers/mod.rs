//! HTTP handlers for registration, linking and listing.

pub mod users;
pub use users::*;
