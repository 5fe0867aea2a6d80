//! Parameterized statements: SQL text is fixed, values always travel as bind parameters.

mod builder;
pub mod params;
pub use builder::*;
pub use params::*;
