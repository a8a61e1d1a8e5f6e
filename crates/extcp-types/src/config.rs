//! Validated configuration values
//!
//! Values the user types in (extension, poll interval) are parsed once into
//! these newtypes so the rest of the workspace never sees an unnormalized form.

use std::fmt;
use std::time::Duration;

/// File extension to gather, always starting with `.`
///
/// Matching is done against three suffix variants: the extension as the user
/// typed it, its lowercase form and its uppercase form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct Extension(String);

impl Extension {
    /// Extension used when the user leaves the field empty
    pub const DEFAULT: &'static str = ".JPG";

    /// Parse user input, falling back to [`Extension::DEFAULT`] when empty
    pub fn parse(input: &str) -> Result<Self, String> {
        Self::parse_or(input, Self::DEFAULT)
    }

    /// Parse user input, falling back to `default` when empty
    pub fn parse_or(input: &str, default: &str) -> Result<Self, String> {
        let trimmed = input.trim();
        let raw = if trimmed.is_empty() {
            default.trim()
        } else {
            trimmed
        };

        let normalized = if raw.starts_with('.') {
            raw.to_string()
        } else {
            format!(".{}", raw)
        };

        if normalized.len() < 2 {
            return Err("Extension must contain at least one character after '.'".to_string());
        }
        if normalized.contains(['/', '\\']) {
            return Err(format!("Extension {} must not contain path separators", normalized));
        }

        Ok(Self(normalized))
    }

    /// Get the normalized extension, including the leading dot
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The suffixes a file name may end with to be selected
    pub fn variants(&self) -> [String; 3] {
        [
            self.0.clone(),
            self.0.to_lowercase(),
            self.0.to_uppercase(),
        ]
    }

    /// Check whether `file_name` ends with one of the accepted suffixes
    pub fn matches(&self, file_name: &str) -> bool {
        self.variants()
            .iter()
            .any(|suffix| file_name.ends_with(suffix.as_str()))
    }
}

impl Default for Extension {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl fmt::Display for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Extension {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Extension> for String {
    fn from(extension: Extension) -> Self {
        extension.0
    }
}

/// Interval between two polls of the progress channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u64", into = "u64"))]
pub struct PollInterval(u64);

impl PollInterval {
    /// Minimum interval in milliseconds
    pub const MIN_MS: u64 = 10;
    /// Maximum interval in milliseconds
    pub const MAX_MS: u64 = 10_000;
    /// Default interval in milliseconds
    pub const DEFAULT_MS: u64 = 100;

    /// Create a new poll interval with validation
    pub fn from_millis(millis: u64) -> Result<Self, String> {
        if millis < Self::MIN_MS {
            Err(format!("Poll interval {}ms is below minimum {}ms", millis, Self::MIN_MS))
        } else if millis > Self::MAX_MS {
            Err(format!("Poll interval {}ms exceeds maximum {}ms", millis, Self::MAX_MS))
        } else {
            Ok(Self(millis))
        }
    }

    /// Get the interval in milliseconds
    pub fn as_millis(self) -> u64 {
        self.0
    }

    /// Get the interval as a duration
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }
}

impl Default for PollInterval {
    fn default() -> Self {
        Self(Self::DEFAULT_MS)
    }
}

impl TryFrom<u64> for PollInterval {
    type Error = String;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::from_millis(value)
    }
}

impl From<PollInterval> for u64 {
    fn from(interval: PollInterval) -> Self {
        interval.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", ".JPG")]
    #[case("   ", ".JPG")]
    #[case("jpg", ".jpg")]
    #[case(".png", ".png")]
    #[case("  .Raw ", ".Raw")]
    #[case("tar.gz", ".tar.gz")]
    fn test_extension_normalization(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(Extension::parse(input).unwrap().as_str(), expected);
    }

    #[rstest]
    #[case(".")]
    #[case("./x")]
    #[case("a\\b")]
    fn test_extension_rejects_invalid(#[case] input: &str) {
        assert!(Extension::parse(input).is_err());
    }

    #[test]
    fn test_extension_custom_default() {
        let ext = Extension::parse_or("", "nef").unwrap();
        assert_eq!(ext.as_str(), ".nef");
    }

    #[test]
    fn test_extension_variants() {
        let ext = Extension::parse(".Jpg").unwrap();
        assert_eq!(ext.variants(), [".Jpg".to_string(), ".jpg".to_string(), ".JPG".to_string()]);
    }

    #[rstest]
    #[case("a.jpg", true)]
    #[case("b.JPG", true)]
    #[case("c.Jpg", true)]
    #[case("d.jPg", false)]
    #[case("e.png", false)]
    #[case("jpg", false)]
    fn test_extension_matches_three_variants(#[case] name: &str, #[case] expected: bool) {
        let ext = Extension::parse(".Jpg").unwrap();
        assert_eq!(ext.matches(name), expected);
    }

    #[test]
    fn test_poll_interval_validation() {
        assert!(PollInterval::from_millis(100).is_ok());
        assert!(PollInterval::from_millis(5).is_err());
        assert!(PollInterval::from_millis(20_000).is_err());
        assert_eq!(PollInterval::default().as_duration(), Duration::from_millis(100));
    }
}
