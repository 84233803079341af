//! Dependency declarations
//!
//! Typed Maven-style coordinates and project-path dependencies, with
//! scopes and per-dependency module exclusions. Parsing validates the
//! declared notation; resolution of the coordinates is the build tool's
//! job, not ours.

use droidbuild_core::config::DependencyDecl;
use droidbuild_core::{Error, ErrorCode, Result};
use serde::Serialize;
use std::fmt;

/// A Maven coordinate: `group:name:version`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Coordinate {
    /// Group id, e.g. `androidx.browser`
    pub group: String,
    /// Artifact name
    pub name: String,
    /// Version string, taken verbatim
    pub version: String,
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.name, self.version)
    }
}

/// What a dependency points at
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DependencyNotation {
    /// External module coordinate
    Module(Coordinate),
    /// Project path within the build, e.g. `:app-sdk`
    Project(String),
}

impl DependencyNotation {
    /// Parse a notation string
    ///
    /// `:path` selects a project dependency; otherwise exactly three
    /// non-empty `:`-separated segments form a module coordinate.
    pub fn parse(notation: &str) -> Result<Self> {
        if let Some(path) = notation.strip_prefix(':') {
            if path.is_empty() {
                return Err(invalid_notation(notation, "project path is empty"));
            }
            return Ok(Self::Project(notation.to_string()));
        }

        let segments: Vec<&str> = notation.split(':').collect();
        if segments.len() != 3 || segments.iter().any(|s| s.is_empty()) {
            return Err(invalid_notation(
                notation,
                "expected group:name:version or :project-path",
            ));
        }

        Ok(Self::Module(Coordinate {
            group: segments[0].to_string(),
            name: segments[1].to_string(),
            version: segments[2].to_string(),
        }))
    }
}

impl fmt::Display for DependencyNotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Module(coordinate) => write!(f, "{}", coordinate),
            Self::Project(path) => f.write_str(path),
        }
    }
}

fn invalid_notation(notation: &str, detail: &str) -> Error {
    Error::new(
        ErrorCode::InvalidFormat,
        format!("Invalid dependency notation `{}`: {}", notation, detail),
    )
}

/// Scope a dependency is visible in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DependencyScope {
    /// Compile and runtime, not exported to consumers
    Implementation,
    /// Compile and runtime, exported to consumers
    Api,
    /// Instrumented (on-device) tests only
    AndroidTestImplementation,
    /// Local unit tests only
    TestImplementation,
}

impl DependencyScope {
    /// The scope name as written in configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Implementation => "implementation",
            Self::Api => "api",
            Self::AndroidTestImplementation => "androidTestImplementation",
            Self::TestImplementation => "testImplementation",
        }
    }

    /// Parse a scope name
    pub fn parse(scope: &str) -> Result<Self> {
        match scope {
            "implementation" => Ok(Self::Implementation),
            "api" => Ok(Self::Api),
            "androidTestImplementation" => Ok(Self::AndroidTestImplementation),
            "testImplementation" => Ok(Self::TestImplementation),
            other => Err(Error::config(format!("Unknown dependency scope `{}`", other))
                .with_suggestion(
                    "Use implementation, api, androidTestImplementation, or testImplementation",
                )),
        }
    }
}

/// A validated dependency declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dependency {
    /// What the dependency points at
    pub notation: DependencyNotation,
    /// Scope the dependency applies to
    pub scope: DependencyScope,
    /// Module names excluded from the transitive closure
    pub excludes: Vec<String>,
}

impl Dependency {
    /// Validate a raw configuration declaration
    pub fn from_decl(decl: &DependencyDecl) -> Result<Self> {
        Ok(Self {
            notation: DependencyNotation::parse(&decl.notation)?,
            scope: DependencyScope::parse(&decl.scope)?,
            excludes: decl.exclude.clone(),
        })
    }

    /// Validate a whole declaration list, keeping declaration order
    pub fn from_decls(decls: &[DependencyDecl]) -> Result<Vec<Self>> {
        decls.iter().map(Self::from_decl).collect()
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.scope.as_str(), self.notation)?;
        for module in &self.excludes {
            write!(f, " -{}", module)?;
        }
        Ok(())
    }
}
