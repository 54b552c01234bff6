//! DTO → domain model conversion with validation.

use crate::registry::IgnoreRegistry;

use super::config_dto::{PolicyDto, SpecialSubsetDto};
use super::model::{BannedDirectoryList, DirFragment, ModelError, SpecialSubset};
use super::Policy;

/// Errors during DTO → Policy conversion.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum LoadError {
    /// A field-level validation error.
    #[error("{context}: {source}")]
    #[diagnostic(code(decl_scope::policy::invalid))]
    Validation {
        /// Where the error occurred (e.g., "banned_directories[3]").
        context: String,
        /// The underlying model error.
        #[source]
        #[diagnostic_source]
        source: ModelError,
    },
}

/// Converts a `PolicyDto` into a validated `Policy`.
///
/// # Errors
///
/// Returns the first error encountered during conversion.
pub fn load(dto: PolicyDto) -> Result<Policy, LoadError> {
    let banned = dto
        .banned_directories
        .iter()
        .enumerate()
        .map(|(i, raw)| fragment(raw, || format!("banned_directories[{i}]")))
        .collect::<Result<Vec<_>, _>>()?;

    let special_subsets = dto
        .special_subsets
        .iter()
        .enumerate()
        .map(|(i, s)| convert_special_subset(s, i))
        .collect::<Result<Vec<_>, _>>()?;

    let ignored_types = names(dto.ignored_types, "ignored_types")?;
    let ignored_bases = names(dto.ignored_bases, "ignored_bases")?;

    let implementation_extensions = dto
        .implementation_extensions
        .into_iter()
        .enumerate()
        .map(|(i, ext)| {
            let ext = ext.trim().to_string();
            if ext.is_empty() {
                Err(LoadError::Validation {
                    context: format!("implementation_extensions[{i}]"),
                    source: ModelError::BlankExtension,
                })
            } else {
                Ok(ext)
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mock_suffix = Some(dto.mock_suffix.trim().to_string()).filter(|s| !s.is_empty());

    Ok(Policy::new(
        BannedDirectoryList::new(banned),
        special_subsets,
        IgnoreRegistry::new(ignored_types, ignored_bases),
    )
    .with_mock_suffix(mock_suffix)
    .with_implementation_extensions(implementation_extensions))
}

fn fragment(raw: &str, context: impl FnOnce() -> String) -> Result<DirFragment, LoadError> {
    DirFragment::new(raw).map_err(|e| LoadError::Validation {
        context: context(),
        source: e,
    })
}

fn convert_special_subset(dto: &SpecialSubsetDto, index: usize) -> Result<SpecialSubset, LoadError> {
    let ctx = format!("special-subset[{index}]");
    let directory = fragment(&dto.directory, || format!("{ctx}.directory"))?;
    let exempt = dto
        .exempt
        .iter()
        .enumerate()
        .map(|(j, raw)| fragment(raw, || format!("{ctx}.exempt[{j}]")))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(SpecialSubset::new(directory, exempt))
}

fn names(raw: Vec<String>, list: &'static str) -> Result<Vec<String>, LoadError> {
    raw.into_iter()
        .enumerate()
        .map(|(i, name)| {
            let name = name.trim().to_string();
            if name.is_empty() {
                Err(LoadError::Validation {
                    context: format!("{list}[{i}]"),
                    source: ModelError::BlankName { list },
                })
            } else {
                Ok(name)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::CanonicalPath;
    use crate::types::Classification;

    fn parse_and_load(toml_str: &str) -> Result<Policy, LoadError> {
        let dto: PolicyDto = toml::from_str(toml_str).unwrap();
        load(dto)
    }

    // -- Happy path --

    #[test]
    fn load_empty_document_matches_builtin() {
        let policy = parse_and_load("").unwrap();
        assert_eq!(policy, Policy::builtin());
    }

    #[test]
    fn load_normalizes_fragments() {
        let policy = parse_and_load(r#"banned_directories = ["vendor", "out\\gen"]"#).unwrap();
        let dirs: Vec<&str> = policy.banned_directories().iter().map(DirFragment::as_str).collect();
        assert_eq!(dirs, vec!["/out/gen/", "/vendor/"]);
    }

    #[test]
    fn load_custom_special_subset() {
        let policy = parse_and_load(
            r#"
banned_directories = []

[[special-subset]]
directory = "legacy"
exempt = ["legacy/core"]
"#,
        )
        .unwrap();

        assert_eq!(
            policy.classify(Some(&CanonicalPath::new("/src/legacy/ui/a.h")), false),
            Classification::SpecialSubset
        );
        assert_eq!(
            policy.classify(Some(&CanonicalPath::new("/src/legacy/core/a.h")), false),
            Classification::Internal
        );
    }

    #[test]
    fn blank_mock_suffix_disables_check() {
        let policy = parse_and_load(r#"mock_suffix = "  ""#).unwrap();
        assert_eq!(policy.mock_suffix(), None);
        assert!(!policy.is_mock_helper_name("FooMatcher"));
    }

    // -- Error cases --

    #[test]
    fn load_rejects_root_fragment() {
        let err = parse_and_load(r#"banned_directories = ["/third_party/", "/"]"#).unwrap_err();
        insta::assert_snapshot!(
            err.to_string(),
            @"banned_directories[1]: directory fragment `/` is empty and would match every path"
        );
    }

    #[test]
    fn load_rejects_blank_exemption() {
        let result = parse_and_load(
            r#"
[[special-subset]]
directory = "/legacy/"
exempt = [""]
"#,
        );
        assert!(matches!(
            result,
            Err(LoadError::Validation {
                source: ModelError::EmptyFragment { .. },
                ..
            })
        ));
    }

    #[test]
    fn load_rejects_blank_type_name() {
        let err = parse_and_load(r#"ignored_types = ["QuadF", " "]"#).unwrap_err();
        assert!(err.to_string().contains("ignored_types[1]"));
    }

    #[test]
    fn load_rejects_blank_extension() {
        let result = parse_and_load(r#"implementation_extensions = [".cc", ""]"#);
        assert!(matches!(
            result,
            Err(LoadError::Validation {
                source: ModelError::BlankExtension,
                ..
            })
        ));
    }
}
