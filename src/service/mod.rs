//! Registration and linking on top of a `UserStore`.

pub mod registration;
pub mod relationship;

pub use registration::{Registration, RegistrationService};
pub use relationship::RelationshipManager;
