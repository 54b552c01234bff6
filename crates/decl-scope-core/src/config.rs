//! Configuration types for decl-scope.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::policy::config_dto::PolicyDto;
use crate::policy::loader::{self, LoadError};
use crate::policy::Policy;
use crate::types::Severity;

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Engine switches.
    #[serde(default)]
    pub options: Options,

    /// Policy table. Omitted keys use the built-in table.
    #[serde(default)]
    pub policy: PolicyDto,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Renders the configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Render {
            message: e.to_string(),
        })
    }

    /// Validates the policy section into an immutable [`Policy`].
    ///
    /// # Errors
    ///
    /// Returns an error if any policy entry is invalid.
    pub fn load_policy(&self) -> Result<Policy, LoadError> {
        loader::load(self.policy.clone())
    }
}

/// Construction-time switches for the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    /// Skip filesystem canonicalization and root raw file names instead.
    #[serde(default)]
    pub no_realpath: bool,

    /// Report rule findings as errors instead of warnings.
    #[serde(default)]
    pub warnings_as_errors: bool,
}

impl Options {
    /// Severity the downstream rule layer should report at.
    #[must_use]
    pub fn error_level(&self) -> Severity {
        if self.warnings_as_errors {
            Severity::Error
        } else {
            Severity::Warning
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// Error rendering config as TOML.
    #[error("Failed to render config: {message}")]
    Render {
        /// Serializer error message.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::CanonicalPath;
    use crate::types::Classification;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.options.no_realpath);
        assert_eq!(config.options.error_level(), Severity::Warning);
        assert_eq!(config.load_policy().unwrap(), Policy::builtin());
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[options]
no_realpath = true
warnings_as_errors = true

[policy]
banned_directories = ["/third_party/", "/out/"]
ignored_types = ["QuadF"]

[[policy.special-subset]]
directory = "/third_party/blink/"
exempt = ["/third_party/blink/browser/"]
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        assert!(config.options.no_realpath);
        assert_eq!(config.options.error_level(), Severity::Error);

        let policy = config.load_policy().expect("Failed to load policy");
        assert_eq!(policy.banned_directories().len(), 2);
        assert_eq!(policy.special_subsets().len(), 1);
        assert_eq!(policy.ignores().type_names(), vec!["QuadF"]);
        assert!(policy.ignores().is_ignored_base_class_name("IPC::NoParams"));
        assert_eq!(
            policy.classify(Some(&CanonicalPath::new("/src/out/a.h")), false),
            Classification::ThirdParty
        );
    }

    #[test]
    fn test_parse_error() {
        let err = Config::parse("[options]\nno_realpath = \"yes\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_rendered_default_parses_back() {
        let rendered = Config::default().to_toml().unwrap();
        assert!(rendered.contains("[[policy.special-subset]]"));
        assert_eq!(Config::parse(&rendered).unwrap(), Config::default());
    }

    #[test]
    fn test_missing_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let err = Config::from_file(&tmp.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
