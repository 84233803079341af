//! Project build properties and application identity
//!
//! SDK version bounds and the app version come from the project
//! properties file and land in an explicit struct that the rest of the
//! tooling receives as a plain argument, rather than being read out of
//! ambient build-tool state.

use droidbuild_core::properties::Properties;
use droidbuild_core::{Error, ErrorCode, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::path::Path;

/// Compile SDK version key
pub const COMPILE_SDK_KEY: &str = "ANDROID_BUILD_SDK_VERSION";
/// Minimum supported SDK version key
pub const MIN_SDK_KEY: &str = "ANDROID_BUILD_TARGET_SDK_MINIMUM";
/// Target SDK version key
pub const TARGET_SDK_KEY: &str = "ANDROID_BUILD_TARGET_SDK_VERSION";
/// Human-readable app version key
pub const VERSION_NAME_KEY: &str = "VERSION_NAME";
/// Monotonic app version code key
pub const VERSION_CODE_KEY: &str = "VERSION_CODE";

/// SDK bounds and app version for a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectProperties {
    /// SDK the project compiles against
    pub compile_sdk: u32,
    /// Lowest SDK the app installs on
    pub min_sdk: u32,
    /// SDK the app targets at runtime
    pub target_sdk: u32,
    /// Human-readable version string
    pub version_name: String,
    /// Monotonic version code
    pub version_code: u32,
}

impl ProjectProperties {
    /// Load project properties from disk
    ///
    /// Unlike the signing properties, this file is mandatory: nothing
    /// can be built without SDK bounds and a version.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::file_not_found(path)
                .with_context("Project properties are required for every build"));
        }
        let props = Properties::load(path)?;
        Self::from_properties(&props, path)
    }

    /// Extract the five required keys from parsed properties
    ///
    /// `origin` names the file in errors.
    pub fn from_properties(props: &Properties, origin: &Path) -> Result<Self> {
        let version_name = props.require(VERSION_NAME_KEY, origin)?.to_string();
        if version_name.is_empty() {
            return Err(Error::invalid_value(VERSION_NAME_KEY, "value is blank"));
        }

        Ok(Self {
            compile_sdk: props.require_u32(COMPILE_SDK_KEY, origin)?,
            min_sdk: props.require_u32(MIN_SDK_KEY, origin)?,
            target_sdk: props.require_u32(TARGET_SDK_KEY, origin)?,
            version_name,
            version_code: props.require_u32(VERSION_CODE_KEY, origin)?,
        })
    }

    /// Check SDK ordering: `min_sdk <= target_sdk <= compile_sdk`
    pub fn validate(&self) -> Result<()> {
        if self.min_sdk > self.target_sdk {
            return Err(Error::validation(format!(
                "minimum SDK {} is above target SDK {}",
                self.min_sdk, self.target_sdk
            )));
        }
        if self.target_sdk > self.compile_sdk {
            return Err(Error::validation(format!(
                "target SDK {} is above compile SDK {}",
                self.target_sdk, self.compile_sdk
            ))
            .with_suggestion(format!("Raise {} or lower {}", COMPILE_SDK_KEY, TARGET_SDK_KEY)));
        }
        Ok(())
    }
}

static APPLICATION_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_]*(\.[A-Za-z][A-Za-z0-9_]*)+$").unwrap());

/// Validate an application id
///
/// Requires reverse-domain form: two or more dot-separated segments,
/// each starting with a letter.
pub fn validate_application_id(id: &str) -> Result<()> {
    if APPLICATION_ID.is_match(id) {
        Ok(())
    } else {
        Err(Error::new(
            ErrorCode::InvalidFormat,
            format!("Invalid application id: `{}`", id),
        )
        .with_suggestion("Use reverse-domain form, e.g. com.example.app"))
    }
}
