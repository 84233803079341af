//! Build variants
//!
//! Debug and release build types and the per-variant resolved plan. A
//! release variant carries the signing identity exactly when one was
//! loaded; a debug variant never carries one, whatever the loader
//! produced.

use crate::dependency::Dependency;
use crate::project::{self, ProjectProperties};
use crate::signing::SigningConfig;
use droidbuild_core::config::AppConfig;
use droidbuild_core::{Error, Result};
use serde::Serialize;
use std::fmt;

/// Build type of an artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildType {
    /// Development build, never release-signed
    Debug,
    /// Distribution build, signed when a signing config exists
    Release,
}

impl BuildType {
    /// The build type name as used on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Release => "release",
        }
    }

    /// Parse a build type name
    pub fn parse(name: &str) -> Result<Self> {
        match name {
            "debug" => Ok(Self::Debug),
            "release" => Ok(Self::Release),
            other => Err(Error::validation(format!("Unknown build type `{}`", other))
                .with_suggestion("Use debug or release")),
        }
    }
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fully resolved configuration for one build variant
#[derive(Debug, Clone, Serialize)]
pub struct VariantPlan {
    /// Variant build type
    pub build_type: BuildType,
    /// Application id
    pub application_id: String,
    /// Human-readable version
    pub version_name: String,
    /// Monotonic version code
    pub version_code: u32,
    /// SDK the variant compiles against
    pub compile_sdk: u32,
    /// Lowest supported SDK
    pub min_sdk: u32,
    /// Targeted SDK
    pub target_sdk: u32,
    /// Instrumentation test runner
    pub test_runner: String,
    /// Declared dependencies, in declaration order
    pub dependencies: Vec<Dependency>,
    /// Signing identity handed to packaging; `None` means unsigned
    pub signing: Option<SigningConfig>,
}

impl VariantPlan {
    /// Resolve a variant from validated inputs
    ///
    /// Fails when the application id is unset or malformed, or when the
    /// project properties fail their ordering check. The signing rule:
    /// release takes the loader's output as-is, debug always drops it.
    pub fn resolve(
        build_type: BuildType,
        app: &AppConfig,
        project: &ProjectProperties,
        dependencies: Vec<Dependency>,
        signing: Option<SigningConfig>,
    ) -> Result<Self> {
        let application_id = app.application_id.as_deref().ok_or_else(|| {
            Error::config("application_id is not set")
                .with_suggestion("Set [app].application_id in .droidbuild.toml")
        })?;
        project::validate_application_id(application_id)?;
        project.validate()?;

        let signing = match build_type {
            BuildType::Release => signing,
            BuildType::Debug => {
                if signing.is_some() {
                    tracing::debug!("debug variant ignores the signing configuration");
                }
                None
            }
        };

        Ok(Self {
            build_type,
            application_id: application_id.to_string(),
            version_name: project.version_name.clone(),
            version_code: project.version_code,
            compile_sdk: project.compile_sdk,
            min_sdk: project.min_sdk,
            target_sdk: project.target_sdk,
            test_runner: app.test_runner.clone(),
            dependencies,
            signing,
        })
    }

    /// Whether packaging will sign this variant
    pub fn is_signed(&self) -> bool {
        self.signing.is_some()
    }

    /// Render the plan as pretty-printed JSON (passwords redacted)
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use droidbuild_core::properties::Properties;
    use std::path::Path;

    fn app() -> AppConfig {
        AppConfig {
            application_id: Some("com.example.demoapp".to_string()),
            ..AppConfig::default()
        }
    }

    fn project() -> ProjectProperties {
        ProjectProperties {
            compile_sdk: 34,
            min_sdk: 21,
            target_sdk: 34,
            version_name: "5.1.0".to_string(),
            version_code: 51,
        }
    }

    fn signing() -> SigningConfig {
        let content = "STORE_FILE=release.jks\nSTORE_PASSWORD=sp\nKEY_ALIAS=release\nKEY_PASSWORD=kp\n";
        let props = Properties::parse(content, Path::new("signing.properties")).unwrap();
        SigningConfig::from_properties(&props, Path::new(".")).unwrap()
    }

    #[test]
    fn test_build_type_parse() {
        assert_eq!(BuildType::parse("debug").unwrap(), BuildType::Debug);
        assert_eq!(BuildType::parse("release").unwrap(), BuildType::Release);
        assert!(BuildType::parse("staging").is_err());
    }

    #[test]
    fn test_release_with_signing_is_signed() {
        let plan = VariantPlan::resolve(
            BuildType::Release,
            &app(),
            &project(),
            Vec::new(),
            Some(signing()),
        )
        .unwrap();
        assert!(plan.is_signed());
        assert_eq!(plan.application_id, "com.example.demoapp");
    }

    #[test]
    fn test_release_without_signing_is_unsigned() {
        let plan =
            VariantPlan::resolve(BuildType::Release, &app(), &project(), Vec::new(), None)
                .unwrap();
        assert!(!plan.is_signed());
    }

    #[test]
    fn test_debug_never_signed() {
        let plan = VariantPlan::resolve(
            BuildType::Debug,
            &app(),
            &project(),
            Vec::new(),
            Some(signing()),
        )
        .unwrap();
        assert!(!plan.is_signed());
    }

    #[test]
    fn test_missing_application_id() {
        let app = AppConfig::default();
        let err =
            VariantPlan::resolve(BuildType::Debug, &app, &project(), Vec::new(), None).unwrap_err();
        assert!(err.message.contains("application_id"));
        assert!(err.suggestion.is_some());
    }

    #[test]
    fn test_malformed_application_id() {
        let app = AppConfig {
            application_id: Some("not an id".to_string()),
            ..AppConfig::default()
        };
        assert!(
            VariantPlan::resolve(BuildType::Debug, &app, &project(), Vec::new(), None).is_err()
        );
    }

    #[test]
    fn test_invalid_sdk_ordering_rejected() {
        let mut bad = project();
        bad.min_sdk = 99;
        assert!(VariantPlan::resolve(BuildType::Debug, &app(), &bad, Vec::new(), None).is_err());
    }

    #[test]
    fn test_json_plan_redacts_passwords() {
        let plan = VariantPlan::resolve(
            BuildType::Release,
            &app(),
            &project(),
            Vec::new(),
            Some(signing()),
        )
        .unwrap();
        let json = plan.to_json().unwrap();
        assert!(json.contains("com.example.demoapp"));
        assert!(json.contains("release.jks"));
        assert!(!json.contains("\"sp\""));
        assert!(!json.contains("\"kp\""));
    }

    #[test]
    fn test_test_runner_carried_through() {
        let plan =
            VariantPlan::resolve(BuildType::Debug, &app(), &project(), Vec::new(), None).unwrap();
        assert_eq!(plan.test_runner, "androidx.test.runner.AndroidJUnitRunner");
    }
}
