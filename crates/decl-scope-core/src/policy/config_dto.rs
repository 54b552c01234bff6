//! TOML (de)serialization types (DTO layer).
//!
//! These types exist solely for serde. They are converted to the validated
//! [`Policy`](super::Policy) via the loader. Every key is optional and falls
//! back to the built-in table, so an empty document is the built-in policy.

use serde::{Deserialize, Serialize};

use super::defaults;

/// Raw TOML representation of a policy table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyDto {
    /// Directory fragments whose contents are never checked.
    #[serde(default = "defaults::banned_directories")]
    pub banned_directories: Vec<String>,

    /// Simple type names that are never checked.
    #[serde(default = "defaults::ignored_types")]
    pub ignored_types: Vec<String>,

    /// Qualified base-class names that exempt subclasses.
    #[serde(default = "defaults::ignored_bases")]
    pub ignored_bases: Vec<String>,

    /// Class-name suffix of mock helpers. Empty disables the check.
    #[serde(default = "defaults::mock_suffix")]
    pub mock_suffix: String,

    /// File-name suffixes treated as implementation files.
    #[serde(default = "defaults::implementation_extensions")]
    pub implementation_extensions: Vec<String>,

    /// Relaxed modules.
    #[serde(rename = "special-subset", default = "special_subsets")]
    pub special_subsets: Vec<SpecialSubsetDto>,
}

impl Default for PolicyDto {
    fn default() -> Self {
        Self {
            banned_directories: defaults::banned_directories(),
            ignored_types: defaults::ignored_types(),
            ignored_bases: defaults::ignored_bases(),
            mock_suffix: defaults::mock_suffix(),
            implementation_extensions: defaults::implementation_extensions(),
            special_subsets: special_subsets(),
        }
    }
}

/// TOML representation of a relaxed module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialSubsetDto {
    /// Module directory fragment.
    pub directory: String,
    /// Subtrees that keep full strictness.
    #[serde(default)]
    pub exempt: Vec<String>,
}

fn special_subsets() -> Vec<SpecialSubsetDto> {
    defaults::SPECIAL_SUBSETS
        .iter()
        .map(|(directory, exempt)| SpecialSubsetDto {
            directory: (*directory).to_string(),
            exempt: exempt.iter().map(|s| (*s).to_string()).collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_builtin() {
        let dto: PolicyDto = toml::from_str("").unwrap();
        assert_eq!(dto, PolicyDto::default());
        assert_eq!(dto.special_subsets.len(), 2);
        assert_eq!(dto.mock_suffix, "Matcher");
    }

    #[test]
    fn explicit_keys_replace_defaults() {
        let dto: PolicyDto = toml::from_str(
            r#"
banned_directories = ["/vendor/"]
ignored_types = []
mock_suffix = ""

[[special-subset]]
directory = "/legacy/"
exempt = ["/legacy/core/"]
"#,
        )
        .unwrap();

        assert_eq!(dto.banned_directories, vec!["/vendor/"]);
        assert!(dto.ignored_types.is_empty());
        assert_eq!(dto.ignored_bases, vec!["IPC::NoParams"]);
        assert!(dto.mock_suffix.is_empty());
        assert_eq!(dto.special_subsets.len(), 1);
        assert_eq!(dto.special_subsets[0].exempt, vec!["/legacy/core/"]);
    }

    #[test]
    fn exempt_defaults_to_empty() {
        let dto: PolicyDto = toml::from_str(
            r#"
[[special-subset]]
directory = "/legacy/"
"#,
        )
        .unwrap();
        assert!(dto.special_subsets[0].exempt.is_empty());
    }
}
