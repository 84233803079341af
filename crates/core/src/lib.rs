//! Core utilities for droidbuild Android build tooling
//!
//! This crate provides the shared foundation for the droidbuild workspace:
//!
//! - **Error handling**: structured errors with codes, context, and recovery
//!   suggestions
//! - **Properties files**: parsing for the `key=value` files Android build
//!   tooling consumes (`gradle.properties`, `signing.properties`)
//! - **Configuration**: TOML-based tool configuration with defaults
//!
//! # Example
//!
//! ```rust,no_run
//! use droidbuild_core::config::Config;
//! use droidbuild_core::properties::Properties;
//!
//! let config = Config::load(None).expect("invalid tool configuration");
//! let props = Properties::load(std::path::Path::new("gradle.properties"))
//!     .expect("unreadable properties file");
//! assert!(props.get("VERSION_NAME").is_some() || config.path.is_none());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod properties;

pub use error::{Error, ErrorCode, Result, ResultExt};
