//! Command implementations.

pub mod classify;
pub mod init;
pub mod output;
pub mod scan;
pub mod show_policy;

use anyhow::{Context, Result};
use decl_scope_core::{Config, Policy};

use crate::config_resolver::ConfigSource;
use crate::CliOptions;

/// Loads the resolved config and merges command-line switches into it.
pub fn load_config(source: &ConfigSource, flags: CliOptions) -> Result<Config> {
    let mut config = match source {
        ConfigSource::Default => Config::default(),
        other => {
            let p = other.path().context("resolved config has no path")?;
            if source.is_global() {
                tracing::info!("Using global config: {}", p.display());
            }
            Config::from_file(p)
                .with_context(|| format!("Failed to load config: {}", p.display()))?
        }
    };

    config.options.no_realpath |= flags.no_realpath;
    config.options.warnings_as_errors |= flags.warnings_as_errors;
    Ok(config)
}

/// Loads the config and validates its policy table.
pub fn load_policy(source: &ConfigSource, flags: CliOptions) -> Result<(Config, Policy)> {
    let config = load_config(source, flags)?;
    let policy = config
        .load_policy()
        .with_context(|| format!("Invalid policy in {source}"))?;
    Ok((config, policy))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn flags_are_ored_into_file_options() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("decl-scope.toml");
        fs::write(&path, "[options]\nwarnings_as_errors = true\n").unwrap();

        let config = load_config(
            &ConfigSource::Project(path),
            CliOptions {
                no_realpath: true,
                warnings_as_errors: false,
            },
        )
        .unwrap();

        assert!(config.options.no_realpath);
        assert!(config.options.warnings_as_errors);
    }

    #[test]
    fn invalid_policy_is_reported() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("decl-scope.toml");
        fs::write(&path, "[policy]\nbanned_directories = [\"/\"]\n").unwrap();

        let err = load_policy(&ConfigSource::Project(path), CliOptions::default()).unwrap_err();
        assert!(err.to_string().contains("Invalid policy"));
    }

    #[test]
    fn missing_explicit_config_fails() {
        let source = ConfigSource::Explicit("/nonexistent/decl-scope.toml".into());
        assert!(load_config(&source, CliOptions::default()).is_err());
    }
}
