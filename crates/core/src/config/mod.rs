//! Configuration loading and schema definitions
//!
//! Defaults for the reference point, nearby radius, anchor selection and
//! share link, read from an optional TOML file.

mod loader;
mod schema;

pub use loader::Config;
pub use schema::*;
