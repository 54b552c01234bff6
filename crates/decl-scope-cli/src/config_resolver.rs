//! Locating the policy file that governs a source tree.
//!
//! A checkout keeps one `decl-scope.toml` at its root, while `classify` and
//! `scan` usually run inside a subdirectory. Lookup order:
//!
//! 1. `--config` flag (explicit path, trusted as-is)
//! 2. nearest `decl-scope.toml` or `.decl-scope.toml` in the start directory
//!    or any of its ancestors
//! 3. `config.toml` in the global directory
//!    (`$DECL_SCOPE_CONFIG_DIR`, else `~/.decl-scope/`)
//! 4. built-in policy

use std::fmt;
use std::path::{Path, PathBuf};

/// Where the policy comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given with `--config`.
    Explicit(PathBuf),
    /// Found next to, or above, the files being classified.
    Project(PathBuf),
    /// Found in the global config directory.
    Global(PathBuf),
    /// Nothing found; the built-in policy applies.
    Default,
}

impl ConfigSource {
    /// Returns the file to load, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Returns `true` if the policy is the user-wide one.
    #[must_use]
    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global(_))
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit(p) => write!(f, "{} (--config)", p.display()),
            Self::Project(p) => write!(f, "{} (project)", p.display()),
            Self::Global(p) => write!(f, "{} (global)", p.display()),
            Self::Default => f.write_str("built-in defaults"),
        }
    }
}

/// Per-directory policy file names. Within one directory the first wins.
const PROJECT_CONFIG_NAMES: &[&str] = &["decl-scope.toml", ".decl-scope.toml"];

/// Policy file name inside the global directory.
const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Resolves the [`ConfigSource`] for a start directory.
#[derive(Debug, Clone, Default)]
pub struct ConfigLocator {
    global_dir: Option<PathBuf>,
}

impl ConfigLocator {
    /// Uses `$DECL_SCOPE_CONFIG_DIR`, falling back to `~/.decl-scope/`.
    #[must_use]
    pub fn from_env() -> Self {
        let global_dir = std::env::var_os("DECL_SCOPE_CONFIG_DIR")
            .map(PathBuf::from)
            .or_else(|| home::home_dir().map(|h| h.join(".decl-scope")));
        Self { global_dir }
    }

    /// Overrides the global directory; `None` disables the global fallback.
    #[must_use]
    pub fn global_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.global_dir = dir;
        self
    }

    /// Resolves the policy for files under `start`.
    #[must_use]
    pub fn locate(&self, start: &Path, explicit: Option<&Path>) -> ConfigSource {
        if let Some(p) = explicit {
            return ConfigSource::Explicit(p.to_path_buf());
        }

        if let Some(found) = find_in_ancestors(start) {
            tracing::debug!("Found project config: {}", found.display());
            return ConfigSource::Project(found);
        }

        if let Some(dir) = &self.global_dir {
            let candidate = dir.join(GLOBAL_CONFIG_NAME);
            if candidate.is_file() {
                tracing::debug!("Found global config: {}", candidate.display());
                return ConfigSource::Global(candidate);
            }
        }

        ConfigSource::Default
    }
}

/// Walks from `start` up to the filesystem root and returns the nearest
/// policy file.
fn find_in_ancestors(start: &Path) -> Option<PathBuf> {
    // Relative roots such as "." have no useful ancestors until made absolute.
    let start = std::fs::canonicalize(start).unwrap_or_else(|_| start.to_path_buf());
    let dir = if start.is_file() {
        start.parent()?.to_path_buf()
    } else {
        start
    };

    dir.ancestors().find_map(|ancestor| {
        PROJECT_CONFIG_NAMES
            .iter()
            .map(|name| ancestor.join(name))
            .find(|candidate| candidate.is_file())
    })
}
