//! Release signing configuration
//!
//! Reads the optional `signing.properties` file next to a project. A
//! release-signing identity is produced only when all four required
//! fields are present and non-blank after trimming; anything less
//! resolves to "no signing configuration", which keeps demo and debug
//! builds unsigned instead of failing them.

use droidbuild_core::Result;
use droidbuild_core::properties::Properties;
use serde::{Serialize, Serializer};
use std::fmt;
use std::path::{Path, PathBuf};

/// Keystore path key in `signing.properties`
pub const STORE_FILE_KEY: &str = "STORE_FILE";
/// Keystore password key in `signing.properties`
pub const STORE_PASSWORD_KEY: &str = "STORE_PASSWORD";
/// Key entry alias key in `signing.properties`
pub const KEY_ALIAS_KEY: &str = "KEY_ALIAS";
/// Key entry password key in `signing.properties`
pub const KEY_PASSWORD_KEY: &str = "KEY_PASSWORD";

const REDACTED: &str = "********";

/// Release-signing identity: keystore location plus credentials
///
/// Either fully populated or not constructed at all; there is no
/// partially-filled state. Password fields are redacted in both `Debug`
/// and serialized output.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct SigningConfig {
    /// Keystore path, resolved against the project root when relative
    pub store_file: PathBuf,
    /// Keystore password
    #[serde(serialize_with = "serialize_redacted")]
    pub store_password: String,
    /// Key entry within the keystore
    pub key_alias: String,
    /// Password for the key entry
    #[serde(serialize_with = "serialize_redacted")]
    pub key_password: String,
}

fn serialize_redacted<S: Serializer>(_: &str, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(REDACTED)
}

impl fmt::Debug for SigningConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningConfig")
            .field("store_file", &self.store_file)
            .field("store_password", &REDACTED)
            .field("key_alias", &self.key_alias)
            .field("key_password", &REDACTED)
            .finish()
    }
}

impl SigningConfig {
    /// Build a signing config from parsed properties
    ///
    /// Returns `None` unless all four fields are present and non-blank.
    /// A relative `STORE_FILE` is resolved against `project_root`.
    pub fn from_properties(props: &Properties, project_root: &Path) -> Option<Self> {
        let store_file = props.get_nonblank(STORE_FILE_KEY)?;
        let store_password = props.get_nonblank(STORE_PASSWORD_KEY)?;
        let key_alias = props.get_nonblank(KEY_ALIAS_KEY)?;
        let key_password = props.get_nonblank(KEY_PASSWORD_KEY)?;

        Some(Self {
            store_file: resolve_store_file(store_file, project_root),
            store_password: store_password.to_string(),
            key_alias: key_alias.to_string(),
            key_password: key_password.to_string(),
        })
    }

    /// One-line summary safe for terminal output
    pub fn masked_summary(&self) -> String {
        format!(
            "keystore {} (alias {}, passwords {})",
            self.store_file.display(),
            self.key_alias,
            REDACTED
        )
    }
}

/// Load the optional release-signing configuration
///
/// A missing file is not an error: the result is `Ok(None)` and release
/// artifacts stay unsigned. A file that exists but cannot be parsed is a
/// hard configuration error. Partial field sets also yield `Ok(None)`.
pub fn load(path: &Path, project_root: &Path) -> Result<Option<SigningConfig>> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no signing properties file");
        return Ok(None);
    }

    let props = Properties::load(path)?;
    let config = SigningConfig::from_properties(&props, project_root);
    match &config {
        Some(c) => tracing::debug!(store_file = %c.store_file.display(), "release signing configured"),
        None => tracing::debug!(path = %path.display(), "signing properties incomplete; release stays unsigned"),
    }
    Ok(config)
}

fn resolve_store_file(raw: &str, project_root: &Path) -> PathBuf {
    let path = Path::new(raw);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_root.join(path)
    }
}
