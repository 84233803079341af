//! Android build-configuration modeling
//!
//! This crate turns the pieces of an Android application's build
//! configuration into explicit, validated data:
//! - Release signing identity loaded from `signing.properties`
//! - Project properties (SDK bounds, app version)
//! - Dependency declarations with scopes and exclusions
//! - Build variant resolution (debug/release)

#![warn(missing_docs)]

pub mod dependency;
pub mod project;
pub mod signing;
pub mod variant;
