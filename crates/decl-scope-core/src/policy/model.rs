//! Validated policy building blocks.

use std::collections::BTreeSet;

use crate::path::CanonicalPath;

/// Field-level validation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
pub enum ModelError {
    /// A directory fragment has no path segment in it.
    #[error("directory fragment `{raw}` is empty and would match every path")]
    #[diagnostic(
        code(decl_scope::policy::empty_fragment),
        help("write the directory name, e.g. \"third_party\" or \"/third_party/\"")
    )]
    EmptyFragment {
        /// The fragment as written.
        raw: String,
    },

    /// A name list contains a blank entry.
    #[error("blank entry in {list}")]
    #[diagnostic(
        code(decl_scope::policy::blank_name),
        help("remove the empty string from the list")
    )]
    BlankName {
        /// Which list the entry belongs to.
        list: &'static str,
    },

    /// An implementation-file extension is blank.
    #[error("blank implementation-file extension")]
    #[diagnostic(
        code(decl_scope::policy::blank_extension),
        help("extensions are matched as name suffixes, e.g. \".cc\"")
    )]
    BlankExtension,
}

/// A directory fragment with a leading and trailing slash.
///
/// The slashes make substring matching whole-segment: `/gen/` matches
/// `/out/gen/foo.h` but not `/src/general/foo.h`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DirFragment(String);

impl DirFragment {
    /// Normalizes `raw` to `/segment(s)/` form.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EmptyFragment`] if nothing is left but `/`.
    pub fn new(raw: &str) -> Result<Self, ModelError> {
        let normalized = normalize(raw);
        if normalized == "/" {
            return Err(ModelError::EmptyFragment {
                raw: raw.to_string(),
            });
        }
        Ok(Self(normalized))
    }

    /// For the built-in tables, which are known to be non-empty.
    pub(crate) fn builtin(raw: &str) -> Self {
        Self(normalize(raw))
    }

    /// The fragment, including both slashes.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DirFragment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn normalize(raw: &str) -> String {
    let trimmed = raw.trim().replace('\\', "/");
    let mut out = String::with_capacity(trimmed.len() + 2);
    if !trimmed.starts_with('/') {
        out.push('/');
    }
    out.push_str(&trimmed);
    if !out.ends_with('/') {
        out.push('/');
    }
    out
}

/// Directories whose contents are never checked.
///
/// Order carries no meaning: any single match excludes the path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BannedDirectoryList {
    dirs: BTreeSet<DirFragment>,
}

impl BannedDirectoryList {
    /// Creates a list from fragments.
    #[must_use]
    pub fn new(dirs: impl IntoIterator<Item = DirFragment>) -> Self {
        Self {
            dirs: dirs.into_iter().collect(),
        }
    }

    /// Returns a fragment contained in `path`, if any.
    #[must_use]
    pub fn first_match(&self, path: &CanonicalPath) -> Option<&DirFragment> {
        self.dirs.iter().find(|dir| path.contains(dir))
    }

    /// Iterates over the fragments in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &DirFragment> {
        self.dirs.iter()
    }

    /// Number of fragments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    /// Returns true if no directory is banned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }
}

/// A module checked under the relaxed rule subset, minus exempted subtrees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialSubset {
    directory: DirFragment,
    exempt: Vec<DirFragment>,
}

/// How a [`SpecialSubset`] relates to a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubsetMatch {
    /// The path is outside the module.
    Outside,
    /// The path is inside the module and relaxed.
    Relaxed,
    /// The path is inside an exempted subtree and gets full strictness.
    Exempt,
}

impl SpecialSubset {
    /// Creates a subset rule.
    #[must_use]
    pub fn new(directory: DirFragment, exempt: Vec<DirFragment>) -> Self {
        Self { directory, exempt }
    }

    /// The module directory.
    #[must_use]
    pub fn directory(&self) -> &DirFragment {
        &self.directory
    }

    /// Subtrees held to full strictness.
    #[must_use]
    pub fn exempt(&self) -> &[DirFragment] {
        &self.exempt
    }

    /// Matches `path` against this module.
    #[must_use]
    pub fn match_path(&self, path: &CanonicalPath) -> SubsetMatch {
        if !path.contains(&self.directory) {
            SubsetMatch::Outside
        } else if self.exempt.iter().any(|dir| path.contains(dir)) {
            SubsetMatch::Exempt
        } else {
            SubsetMatch::Relaxed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragments_gain_both_slashes() {
        assert_eq!(DirFragment::new("gen").unwrap().as_str(), "/gen/");
        assert_eq!(DirFragment::new("/gen").unwrap().as_str(), "/gen/");
        assert_eq!(DirFragment::new("gen/").unwrap().as_str(), "/gen/");
        assert_eq!(DirFragment::new("/gen/").unwrap().as_str(), "/gen/");
        assert_eq!(
            DirFragment::new("third_party\\blink").unwrap().as_str(),
            "/third_party/blink/"
        );
    }

    #[test]
    fn empty_fragments_are_rejected() {
        assert!(matches!(
            DirFragment::new(""),
            Err(ModelError::EmptyFragment { .. })
        ));
        assert!(DirFragment::new(" / ").is_err());
    }

    #[test]
    fn banned_match_is_whole_segment() {
        let list = BannedDirectoryList::new([DirFragment::builtin("/gen/")]);
        assert!(list
            .first_match(&CanonicalPath::new("/out/Debug/gen/foo.h"))
            .is_some());
        assert!(list
            .first_match(&CanonicalPath::new("/src/general/foo.h"))
            .is_none());
    }

    #[test]
    fn duplicate_fragments_collapse() {
        let list = BannedDirectoryList::new([
            DirFragment::builtin("v8"),
            DirFragment::builtin("/v8/"),
        ]);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn subset_exemption_wins_inside_module() {
        let subset = SpecialSubset::new(
            DirFragment::builtin("/third_party/blink/"),
            vec![DirFragment::builtin("/third_party/blink/browser/")],
        );
        assert_eq!(
            subset.match_path(&CanonicalPath::new("/src/third_party/blink/renderer/a.cc")),
            SubsetMatch::Relaxed
        );
        assert_eq!(
            subset.match_path(&CanonicalPath::new("/src/third_party/blink/browser/a.cc")),
            SubsetMatch::Exempt
        );
        assert_eq!(
            subset.match_path(&CanonicalPath::new("/src/content/browser/a.cc")),
            SubsetMatch::Outside
        );
    }
}
