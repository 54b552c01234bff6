//! Init command implementation.

use anyhow::{bail, Context, Result};
use decl_scope_core::Config;
use std::path::Path;

const HEADER: &str = "# decl-scope configuration
#
# [options]      engine switches (also settable with --no-realpath and
#                --warnings-as-errors)
# [policy]       banned directories, relaxed modules, and ignore lists.
#                Omitted keys fall back to the built-in table.

";

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new("decl-scope.toml");
    write_default(config_path, force)?;

    println!("Created {}", config_path.display());
    println!("\nNext steps:");
    println!("  1. Edit decl-scope.toml to adjust the policy");
    println!("  2. Run: decl-scope scan");

    Ok(())
}

fn write_default(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let body = Config::default().to_toml()?;
    std::fs::write(config_path, format!("{HEADER}{body}"))
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    Ok(())
}
