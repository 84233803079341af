//! Tool configuration loading and schema definitions
//!
//! The `.droidbuild.toml` file that describes an Android project to the
//! tooling: application identity, input file paths, and dependency
//! declarations.

mod loader;
mod schema;

pub use loader::Config;
pub use schema::*;
