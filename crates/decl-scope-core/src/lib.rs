//! # decl-scope-core
//!
//! Declaration classification and policy filtering for C++ style checkers.
//!
//! For every class-like or enum-like declaration a traversal driver finds,
//! the engine decides whether it is in scope for the style rules and, if so,
//! under which [`Classification`]. It includes:
//!
//! - [`LocationOracle`] trait, the seam to the compiler host's source manager
//! - [`PathResolver`] for macro-aware, canonical, forward-slash file paths
//! - [`Policy`] for banned directories, relaxed modules, and ignore lists
//! - [`DeclarationFilter`] combining the above per declaration
//! - [`DeclarationRule`] trait for the downstream rule layer
//! - [`SourceMap`], an in-memory host for tools and tests
//!
//! ## Example
//!
//! ```ignore
//! use decl_scope_core::{Declaration, DeclarationFilter, Policy, SourceMap};
//!
//! let policy = Policy::builtin();
//! let mut map = SourceMap::new();
//! let loc = map.add_file("chrome/browser/foo.h", false);
//!
//! let filter = DeclarationFilter::new(&policy, &map);
//! let decl = Declaration::class("FooController", loc);
//! if let Some(classification) = filter.should_check(&decl) {
//!     // run rules for `classification`
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod bases;
mod config;
mod decl;
mod filter;
mod host;
mod path;
mod registry;
mod rule;
mod source_map;
mod types;

pub mod namespace;
pub mod policy;

pub use bases::{find_ignored_base, has_ignored_base};
pub use config::{Config, ConfigError, Options};
pub use decl::{BaseRecord, Declaration, Scope};
pub use filter::{DeclarationFilter, MAX_EXPANSION_DEPTH};
pub use host::LocationOracle;
pub use namespace::qualifying_namespace;
pub use path::{
    CanonicalPath, FsCanonicalizer, MapCanonicalizer, PathCanonicalizer, PathResolver, Resolution,
    SCRATCH_SPACE,
};
pub use policy::{load_policy_from_toml, LoadPolicyError, Policy};
pub use registry::IgnoreRegistry;
pub use rule::{CheckContext, DeclarationRule, RuleBox};
pub use source_map::{SourceLoc, SourceMap};
pub use types::{Classification, DeclKind, Severity};
