//! Properties file parsing
//!
//! Parses the flat `key=value` files Android build tooling reads
//! (`gradle.properties`, `signing.properties`). Blank lines and lines
//! starting with `#` or `!` are ignored; every other line must contain
//! an `=`. A non-comment line without one is a hard parse error naming
//! the offending line.

use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::path::Path;

/// Parsed contents of a properties file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    entries: BTreeMap<String, String>,
}

impl Properties {
    /// Read and parse a properties file from disk
    ///
    /// The file must exist; callers that treat absence as "no
    /// configuration" check for existence first.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .map_err(|e| Error::from(e).with_context(format!("Reading {}", path.display())))?;

        let content = String::from_utf8(bytes)
            .map_err(|_| Error::config_parse(path, "file is not valid UTF-8"))?;

        let props = Self::parse(&content, path)?;
        tracing::debug!(
            path = %path.display(),
            entries = props.len(),
            "loaded properties file"
        );
        Ok(props)
    }

    /// Parse properties from a string
    ///
    /// `origin` is only used to name the file in parse errors.
    pub fn parse(content: &str, origin: &Path) -> Result<Self> {
        let mut entries = BTreeMap::new();

        for (idx, raw_line) in content.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }

            match line.split_once('=') {
                Some((key, value)) => {
                    let key = key.trim();
                    if key.is_empty() {
                        return Err(Error::config_parse(
                            origin,
                            format!("line {}: empty key in `{}`", idx + 1, raw_line),
                        ));
                    }
                    // Duplicate keys: last occurrence wins.
                    entries.insert(key.to_string(), value.trim().to_string());
                }
                None => {
                    return Err(Error::config_parse(
                        origin,
                        format!("line {}: missing `=` in `{}`", idx + 1, raw_line),
                    )
                    .with_suggestion("Expected one KEY=value pair per line"));
                }
            }
        }

        Ok(Self { entries })
    }

    /// Get a raw value by key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Get a value by key, trimmed, treating blank values as absent
    pub fn get_nonblank(&self, key: &str) -> Option<&str> {
        self.get(key)
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    /// Get a required value, failing with a configuration error if absent
    pub fn require(&self, key: &str, origin: &Path) -> Result<&str> {
        self.get(key)
            .ok_or_else(|| Error::missing_property(origin, key))
    }

    /// Get a required value and parse it as `u32`
    pub fn require_u32(&self, key: &str, origin: &Path) -> Result<u32> {
        let raw = self.require(key, origin)?;
        raw.trim()
            .parse::<u32>()
            .map_err(|_| Error::invalid_value(key, format!("`{}` is not a non-negative integer", raw)))
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the file contained no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all key/value pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse(content: &str) -> Result<Properties> {
        Properties::parse(content, Path::new("test.properties"))
    }

    #[test]
    fn test_parse_basic_pairs() {
        let props = parse("KEY_ALIAS=release\nSTORE_FILE=keys/release.jks\n").unwrap();
        assert_eq!(props.get("KEY_ALIAS"), Some("release"));
        assert_eq!(props.get("STORE_FILE"), Some("keys/release.jks"));
        assert_eq!(props.len(), 2);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let props = parse("  VERSION_NAME =  5.1.0  \n").unwrap();
        assert_eq!(props.get("VERSION_NAME"), Some("5.1.0"));
    }

    #[test]
    fn test_parse_value_may_contain_equals() {
        let props = parse("STORE_PASSWORD=a=b=c\n").unwrap();
        assert_eq!(props.get("STORE_PASSWORD"), Some("a=b=c"));
    }

    #[test]
    fn test_parse_skips_comments_and_blanks() {
        let props = parse("# release keys\n! legacy comment\n\nKEY_ALIAS=release\n").unwrap();
        assert_eq!(props.len(), 1);
    }

    #[test]
    fn test_parse_duplicate_key_last_wins() {
        let props = parse("VERSION_CODE=4\nVERSION_CODE=5\n").unwrap();
        assert_eq!(props.get("VERSION_CODE"), Some("5"));
    }

    #[test]
    fn test_parse_malformed_line_is_fatal() {
        let err = parse("KEY_ALIAS=release\njust some text\n").unwrap_err();
        assert_eq!(err.code, crate::ErrorCode::ConfigParseError);
        assert!(err.message.contains("line 2"));
        assert!(err.message.contains("just some text"));
    }

    #[test]
    fn test_parse_empty_key_is_fatal() {
        let err = parse("=value\n").unwrap_err();
        assert_eq!(err.code, crate::ErrorCode::ConfigParseError);
        assert!(err.message.contains("empty key"));
    }

    #[test]
    fn test_get_nonblank_filters_whitespace_values() {
        let props = parse("STORE_PASSWORD=   \nKEY_ALIAS=release\n").unwrap();
        assert_eq!(props.get_nonblank("STORE_PASSWORD"), None);
        assert_eq!(props.get_nonblank("KEY_ALIAS"), Some("release"));
        assert_eq!(props.get_nonblank("NO_SUCH_KEY"), None);
    }

    #[test]
    fn test_require_missing_key() {
        let props = parse("KEY_ALIAS=release\n").unwrap();
        let err = props
            .require("STORE_FILE", Path::new("signing.properties"))
            .unwrap_err();
        assert_eq!(err.code, crate::ErrorCode::MissingProperty);
        assert!(err.message.contains("STORE_FILE"));
    }

    #[test]
    fn test_require_u32_rejects_non_integer() {
        let props = parse("VERSION_CODE=five\n").unwrap();
        let err = props
            .require_u32("VERSION_CODE", Path::new("gradle.properties"))
            .unwrap_err();
        assert_eq!(err.code, crate::ErrorCode::InvalidConfigValue);
        assert!(err.message.contains("VERSION_CODE"));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("signing.properties");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "STORE_FILE=release.jks").unwrap();
        writeln!(file, "STORE_PASSWORD=hunter2hunter2").unwrap();

        let props = Properties::load(&path).unwrap();
        assert_eq!(props.get("STORE_FILE"), Some("release.jks"));
        assert_eq!(props.get("STORE_PASSWORD"), Some("hunter2hunter2"));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = Properties::load(Path::new("/nonexistent/signing.properties")).unwrap_err();
        assert_eq!(err.code, crate::ErrorCode::FileNotFound);
    }

    #[test]
    fn test_load_rejects_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("signing.properties");
        std::fs::write(&path, [0x4b, 0x45, 0x59, 0xff, 0xfe, 0x3d, 0x31]).unwrap();

        let err = Properties::load(&path).unwrap_err();
        assert_eq!(err.code, crate::ErrorCode::ConfigParseError);
        assert!(err.message.contains("UTF-8"));
    }

    #[test]
    fn test_idempotent_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gradle.properties");
        std::fs::write(&path, "VERSION_NAME=5.1.0\nVERSION_CODE=42\n").unwrap();

        let first = Properties::load(&path).unwrap();
        let second = Properties::load(&path).unwrap();
        assert_eq!(first, second);
    }
}
