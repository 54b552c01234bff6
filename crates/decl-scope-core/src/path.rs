//! Resolution of source locations to canonical, forward-slash paths.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::host::{spelled_filename, LocationOracle};
use crate::policy::DirFragment;

/// File name the host gives to its macro-expansion scratch buffer.
pub const SCRATCH_SPACE: &str = "<scratch space>";

/// A normalized absolute path, forward-slash separated.
///
/// Only ever used for substring tests against [`DirFragment`]s.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalPath(String);

impl CanonicalPath {
    /// Wraps an already-normalized path.
    ///
    /// Backslashes are still converted, so the forward-slash invariant holds
    /// regardless of input.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        let path: String = path.into();
        Self(path.replace('\\', "/"))
    }

    /// The path as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if `fragment` occurs anywhere in this path.
    #[must_use]
    pub fn contains(&self, fragment: &DirFragment) -> bool {
        self.0.contains(fragment.as_str())
    }
}

impl std::fmt::Display for CanonicalPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of resolving a location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The location maps to a real file.
    Path(CanonicalPath),
    /// The location is in the macro-expansion scratch buffer.
    ScratchSpace,
    /// The location has no presumed file (synthetic or invalid).
    Unresolvable,
}

impl Resolution {
    /// The canonical path, if the location maps to a real file.
    #[must_use]
    pub fn canonical(&self) -> Option<&CanonicalPath> {
        match self {
            Self::Path(path) => Some(path),
            Self::ScratchSpace | Self::Unresolvable => None,
        }
    }
}

/// Turns a raw file name into an absolute path.
pub trait PathCanonicalizer {
    /// Returns the absolute form of `raw`, or `None` if resolution failed.
    fn canonicalize(&self, raw: &str) -> Option<String>;
}

/// Resolves paths against the real filesystem.
///
/// On Unix this follows symlinks (the file must exist). On Windows it only
/// makes the path absolute.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsCanonicalizer;

impl PathCanonicalizer for FsCanonicalizer {
    fn canonicalize(&self, raw: &str) -> Option<String> {
        #[cfg(windows)]
        let resolved = std::path::absolute(raw);
        #[cfg(not(windows))]
        let resolved = std::fs::canonicalize(raw);

        match resolved {
            Ok(path) => Some(path.to_string_lossy().into_owned()),
            Err(e) => {
                debug!("Cannot canonicalize {}: {}", raw, e);
                None
            }
        }
    }
}

/// Fixed lookup table, for hosts and tests that must not touch the filesystem.
///
/// Names missing from the table fail to resolve.
#[derive(Debug, Clone, Default)]
pub struct MapCanonicalizer {
    entries: HashMap<String, String>,
}

impl MapCanonicalizer {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a mapping from `raw` to `resolved`.
    #[must_use]
    pub fn with(mut self, raw: impl Into<String>, resolved: impl Into<String>) -> Self {
        self.entries.insert(raw.into(), resolved.into());
        self
    }
}

impl PathCanonicalizer for MapCanonicalizer {
    fn canonicalize(&self, raw: &str) -> Option<String> {
        self.entries.get(raw).cloned()
    }
}

impl<C: PathCanonicalizer + ?Sized> PathCanonicalizer for &C {
    fn canonicalize(&self, raw: &str) -> Option<String> {
        (**self).canonicalize(raw)
    }
}

/// Resolves locations to [`CanonicalPath`]s.
#[derive(Debug, Clone)]
pub struct PathResolver<C = FsCanonicalizer> {
    canonicalizer: C,
    realpath: bool,
}

impl Default for PathResolver {
    fn default() -> Self {
        Self::new(FsCanonicalizer)
    }
}

impl<C: PathCanonicalizer> PathResolver<C> {
    /// Creates a resolver that canonicalizes through `canonicalizer`.
    #[must_use]
    pub fn new(canonicalizer: C) -> Self {
        Self {
            canonicalizer,
            realpath: true,
        }
    }

    /// Enables or disables canonicalization (default: enabled).
    ///
    /// When disabled, every name takes the leading-slash fallback.
    #[must_use]
    pub fn realpath(mut self, enabled: bool) -> Self {
        self.realpath = enabled;
        self
    }

    /// Resolves `loc` through its spelling location to a canonical path.
    pub fn resolve<O: LocationOracle + ?Sized>(&self, oracle: &O, loc: O::Location) -> Resolution {
        let Some(filename) = spelled_filename(oracle, loc) else {
            trace!("No presumed file for {:?}", loc);
            return Resolution::Unresolvable;
        };

        if filename == SCRATCH_SPACE {
            trace!("{:?} is in scratch space", loc);
            return Resolution::ScratchSpace;
        }

        Resolution::Path(self.canonicalize(&filename))
    }

    /// Makes `filename` absolute and forward-slash separated.
    ///
    /// If canonicalization is disabled or fails, a single `/` is prepended to
    /// the raw name so that `/gen/`-style fragments still have an anchor. That
    /// fallback is best effort: a relative name like `../foo/gen/x.h` keeps
    /// its `..` and may match differently than the real path would.
    #[must_use]
    pub fn canonicalize(&self, filename: &str) -> CanonicalPath {
        let absolute = if self.realpath {
            self.canonicalizer.canonicalize(filename).unwrap_or_else(|| {
                debug!("Falling back to rooted raw name for {}", filename);
                format!("/{filename}")
            })
        } else {
            format!("/{filename}")
        };
        CanonicalPath::new(absolute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source_map::SourceMap;

    fn resolver() -> PathResolver<MapCanonicalizer> {
        PathResolver::new(
            MapCanonicalizer::new()
                .with("../../base/foo.h", "/src/base/foo.h")
                .with("gen\\ui\\bar.h", "C:\\out\\gen\\ui\\bar.h"),
        )
    }

    #[test]
    fn canonicalizes_through_host_capability() {
        let r = resolver();
        assert_eq!(r.canonicalize("../../base/foo.h").as_str(), "/src/base/foo.h");
    }

    #[test]
    fn normalizes_backslashes() {
        let r = resolver();
        assert_eq!(r.canonicalize("gen\\ui\\bar.h").as_str(), "C:/out/gen/ui/bar.h");
    }

    #[test]
    fn failure_prepends_single_slash() {
        let r = resolver();
        assert_eq!(r.canonicalize("gen/dir/file.cc").as_str(), "/gen/dir/file.cc");
    }

    #[test]
    fn disabled_realpath_skips_canonicalizer() {
        let r = resolver().realpath(false);
        assert_eq!(r.canonicalize("../../base/foo.h").as_str(), "/../../base/foo.h");
    }

    #[test]
    fn resolves_macro_locations_at_spelling_site() {
        let mut map = SourceMap::new();
        let def = map.add_file("../../base/foo.h", false);
        let site = map.add_file("chrome/a.cc", false);
        let expanded = map.add_macro_expansion(def, site);

        assert_eq!(
            resolver().resolve(&map, expanded),
            Resolution::Path(CanonicalPath::new("/src/base/foo.h"))
        );
    }

    #[test]
    fn scratch_space_and_invalid_have_no_path() {
        let mut map = SourceMap::new();
        let scratch = map.add_file(SCRATCH_SPACE, false);
        let invalid = map.add_invalid();

        let r = resolver();
        assert_eq!(r.resolve(&map, scratch), Resolution::ScratchSpace);
        assert_eq!(r.resolve(&map, invalid), Resolution::Unresolvable);
        assert!(r.resolve(&map, scratch).canonical().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn filesystem_canonicalizer_follows_symlinks() {
        let tmp = tempfile::TempDir::new().unwrap();
        let real_dir = tmp.path().join("real");
        std::fs::create_dir(&real_dir).unwrap();
        std::fs::write(real_dir.join("foo.h"), "").unwrap();
        let link = tmp.path().join("link");
        std::os::unix::fs::symlink(&real_dir, &link).unwrap();

        let raw = link.join("foo.h");
        let resolved = FsCanonicalizer.canonicalize(&raw.to_string_lossy()).unwrap();
        assert!(resolved.ends_with("/real/foo.h"), "got {resolved}");
    }

    #[cfg(not(windows))]
    #[test]
    fn filesystem_canonicalizer_fails_on_missing_file() {
        assert!(FsCanonicalizer
            .canonicalize("definitely/not/here/x.h")
            .is_none());
    }
}
