//! The declarative policy table and path classification.
//!
//! # Architecture
//!
//! ```text
//! TOML text
//!   ↓ serde (DTO layer)
//! config_dto::PolicyDto
//!   ↓ loader::load (validate + normalize)
//! Policy (immutable, built once per run)
//!   ↓ Policy::classify
//! Classification
//! ```

pub mod config_dto;
pub mod defaults;
pub mod loader;
pub mod model;

pub use model::{BannedDirectoryList, DirFragment, ModelError, SpecialSubset, SubsetMatch};

use crate::path::CanonicalPath;
use crate::registry::IgnoreRegistry;
use crate::types::Classification;

/// Errors from parsing TOML and loading a policy table.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum LoadPolicyError {
    /// TOML deserialization failed.
    #[error("TOML parse error: {0}")]
    #[diagnostic(code(decl_scope::policy::toml))]
    Toml(#[from] toml::de::Error),

    /// Policy validation failed.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Load(#[from] loader::LoadError),
}

/// Parses a standalone policy document (top-level policy keys).
///
/// # Errors
///
/// Returns an error if TOML parsing or validation fails.
pub fn load_policy_from_toml(content: &str) -> Result<Policy, LoadPolicyError> {
    let dto: config_dto::PolicyDto = toml::from_str(content)?;
    Ok(loader::load(dto)?)
}

/// Immutable inclusion/exclusion policy.
///
/// Construct once per run and share by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    banned: BannedDirectoryList,
    special_subsets: Vec<SpecialSubset>,
    ignores: IgnoreRegistry,
    mock_suffix: Option<String>,
    implementation_extensions: Vec<String>,
}

impl Default for Policy {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Policy {
    /// Creates a policy with the built-in mock suffix and implementation
    /// extensions.
    #[must_use]
    pub fn new(
        banned: BannedDirectoryList,
        special_subsets: Vec<SpecialSubset>,
        ignores: IgnoreRegistry,
    ) -> Self {
        Self {
            banned,
            special_subsets,
            ignores,
            mock_suffix: Some(defaults::mock_suffix()),
            implementation_extensions: defaults::implementation_extensions(),
        }
    }

    /// The built-in tables.
    #[must_use]
    pub fn builtin() -> Self {
        let banned = BannedDirectoryList::new(
            defaults::BANNED_DIRECTORIES
                .iter()
                .map(|d| DirFragment::builtin(d)),
        );
        let special_subsets = defaults::SPECIAL_SUBSETS
            .iter()
            .map(|(dir, exempt)| {
                SpecialSubset::new(
                    DirFragment::builtin(dir),
                    exempt.iter().map(|d| DirFragment::builtin(d)).collect(),
                )
            })
            .collect();
        let ignores = IgnoreRegistry::new(
            defaults::IGNORED_TYPES.iter().copied(),
            defaults::IGNORED_BASES.iter().copied(),
        );
        Self::new(banned, special_subsets, ignores)
    }

    /// Sets the mock-helper suffix; `None` disables the check.
    #[must_use]
    pub fn with_mock_suffix(mut self, suffix: Option<String>) -> Self {
        self.mock_suffix = suffix;
        self
    }

    /// Sets the implementation-file suffixes.
    #[must_use]
    pub fn with_implementation_extensions(mut self, extensions: Vec<String>) -> Self {
        self.implementation_extensions = extensions;
        self
    }

    /// Maps a resolved path to a classification.
    ///
    /// Checks run in a fixed order and the first hit wins: system header,
    /// unresolvable path, special-subset modules, banned directories, and
    /// finally `Internal`.
    #[must_use]
    pub fn classify(&self, path: Option<&CanonicalPath>, is_system_header: bool) -> Classification {
        if is_system_header {
            return Classification::ThirdParty;
        }
        let Some(path) = path else {
            return Classification::ThirdParty;
        };

        for subset in &self.special_subsets {
            match subset.match_path(path) {
                SubsetMatch::Outside => {}
                SubsetMatch::Relaxed => return Classification::SpecialSubset,
                SubsetMatch::Exempt => return Classification::Internal,
            }
        }

        if self.banned.first_match(path).is_some() {
            return Classification::ThirdParty;
        }

        Classification::Internal
    }

    /// Banned directory fragments.
    #[must_use]
    pub fn banned_directories(&self) -> &BannedDirectoryList {
        &self.banned
    }

    /// Relaxed modules, in match order.
    #[must_use]
    pub fn special_subsets(&self) -> &[SpecialSubset] {
        &self.special_subsets
    }

    /// Name-based exclusions.
    #[must_use]
    pub fn ignores(&self) -> &IgnoreRegistry {
        &self.ignores
    }

    /// Mock-helper class-name suffix, if enabled.
    #[must_use]
    pub fn mock_suffix(&self) -> Option<&str> {
        self.mock_suffix.as_deref()
    }

    /// Implementation-file suffixes.
    #[must_use]
    pub fn implementation_extensions(&self) -> &[String] {
        &self.implementation_extensions
    }

    /// Returns true if a class with this name is a mock helper.
    #[must_use]
    pub fn is_mock_helper_name(&self, name: &str) -> bool {
        self.mock_suffix
            .as_deref()
            .is_some_and(|suffix| name.ends_with(suffix))
    }

    /// Returns true if `filename` ends with an implementation-file suffix.
    #[must_use]
    pub fn is_implementation_file(&self, filename: &str) -> bool {
        self.implementation_extensions
            .iter()
            .any(|ext| filename.ends_with(ext.as_str()))
    }

    /// Converts back to the serializable form.
    #[must_use]
    pub fn to_dto(&self) -> config_dto::PolicyDto {
        config_dto::PolicyDto {
            banned_directories: self.banned.iter().map(ToString::to_string).collect(),
            ignored_types: self
                .ignores
                .type_names()
                .into_iter()
                .map(String::from)
                .collect(),
            ignored_bases: self
                .ignores
                .base_classes()
                .into_iter()
                .map(String::from)
                .collect(),
            mock_suffix: self.mock_suffix.clone().unwrap_or_default(),
            implementation_extensions: self.implementation_extensions.clone(),
            special_subsets: self
                .special_subsets
                .iter()
                .map(|s| config_dto::SpecialSubsetDto {
                    directory: s.directory().to_string(),
                    exempt: s.exempt().iter().map(ToString::to_string).collect(),
                })
                .collect(),
        }
    }
}
