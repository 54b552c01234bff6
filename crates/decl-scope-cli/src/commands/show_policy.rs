//! Show-policy command implementation.

use anyhow::{Context, Result};
use decl_scope_core::{Config, Policy};

use crate::config_resolver::ConfigSource;
use crate::CliOptions;

/// Runs the show-policy command.
pub fn run(source: &ConfigSource, flags: CliOptions) -> Result<()> {
    let (config, policy) = super::load_policy(source, flags)?;
    print!("{}", render(source, &config, &policy)?);
    Ok(())
}

/// Renders the effective configuration, with every default filled in.
fn render(source: &ConfigSource, config: &Config, policy: &Policy) -> Result<String> {
    let effective = Config {
        options: config.options,
        policy: policy.to_dto(),
    };
    let body = effective
        .to_toml()
        .context("Failed to render effective policy")?;

    Ok(format!(
        "# Source: {source}\n# Error level: {}\n\n{body}",
        config.options.error_level()
    ))
}
