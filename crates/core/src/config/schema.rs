//! Configuration schema definitions

use serde::{Deserialize, Serialize};

/// Root configuration schema for `.droidbuild.toml`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    /// Application identity
    #[serde(default)]
    pub app: AppConfig,

    /// Input file locations
    #[serde(default)]
    pub paths: PathsConfig,

    /// Declared dependencies
    #[serde(default)]
    pub dependencies: Vec<DependencyDecl>,
}

/// Application identity configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application id in reverse-domain form (e.g. `com.example.app`)
    #[serde(default)]
    pub application_id: Option<String>,

    /// Instrumentation test runner class
    #[serde(default = "default_test_runner")]
    pub test_runner: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            application_id: None,
            test_runner: default_test_runner(),
        }
    }
}

fn default_test_runner() -> String {
    "androidx.test.runner.AndroidJUnitRunner".to_string()
}

/// Locations of the project's build input files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Project root directory; relative paths resolve against it
    #[serde(default = "default_project_root")]
    pub project_root: String,

    /// Properties file carrying SDK bounds and app version
    #[serde(default = "default_project_properties")]
    pub project_properties: String,

    /// Optional properties file carrying the release-signing identity
    #[serde(default = "default_signing_properties")]
    pub signing_properties: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            project_root: default_project_root(),
            project_properties: default_project_properties(),
            signing_properties: default_signing_properties(),
        }
    }
}

fn default_project_root() -> String {
    ".".to_string()
}

fn default_project_properties() -> String {
    "gradle.properties".to_string()
}

fn default_signing_properties() -> String {
    "signing.properties".to_string()
}

/// A declared dependency, as written in configuration
///
/// The raw strings here are parsed and validated by the platform crates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencyDecl {
    /// Coordinate (`group:name:version`) or project path (`:module`)
    pub notation: String,

    /// Dependency scope
    #[serde(default = "default_scope")]
    pub scope: String,

    /// Module names excluded from this dependency's transitive closure
    #[serde(default)]
    pub exclude: Vec<String>,
}

fn default_scope() -> String {
    "implementation".to_string()
}
