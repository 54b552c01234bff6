//! Per-declaration "should this be checked, and how" decision.

use tracing::{debug, trace, warn};

use crate::bases;
use crate::config::Options;
use crate::decl::Declaration;
use crate::host::{spelled_filename, LocationOracle};
use crate::namespace;
use crate::path::{FsCanonicalizer, PathCanonicalizer, PathResolver, Resolution};
use crate::policy::Policy;
use crate::rule::{CheckContext, DeclarationRule};
use crate::types::{Classification, DeclKind, Severity};

/// Upper bound on macro-expansion levels walked for a single location.
pub const MAX_EXPANSION_DEPTH: usize = 256;

/// Entry point of the engine.
///
/// Combines path resolution, classification, and name-based exclusion. All
/// inputs are borrowed and immutable, so one filter serves a whole
/// compilation unit.
pub struct DeclarationFilter<'a, O, C = FsCanonicalizer> {
    policy: &'a Policy,
    oracle: &'a O,
    resolver: PathResolver<C>,
    options: Options,
}

impl<'a, O: LocationOracle> DeclarationFilter<'a, O> {
    /// Creates a filter that canonicalizes against the real filesystem.
    #[must_use]
    pub fn new(policy: &'a Policy, oracle: &'a O) -> Self {
        Self {
            policy,
            oracle,
            resolver: PathResolver::default(),
            options: Options::default(),
        }
    }
}

impl<'a, O: LocationOracle, C: PathCanonicalizer> DeclarationFilter<'a, O, C> {
    /// Replaces the path canonicalization capability.
    #[must_use]
    pub fn with_canonicalizer<D: PathCanonicalizer>(
        self,
        canonicalizer: D,
    ) -> DeclarationFilter<'a, O, D> {
        DeclarationFilter {
            policy: self.policy,
            oracle: self.oracle,
            resolver: PathResolver::new(canonicalizer).realpath(!self.options.no_realpath),
            options: self.options,
        }
    }

    /// Applies engine switches.
    #[must_use]
    pub fn options(mut self, options: Options) -> Self {
        self.resolver = self.resolver.realpath(!options.no_realpath);
        self.options = options;
        self
    }

    /// The policy in effect.
    #[must_use]
    pub fn policy(&self) -> &Policy {
        self.policy
    }

    /// Severity the rule layer should report at.
    #[must_use]
    pub fn error_level(&self) -> Severity {
        self.options.error_level()
    }

    /// Resolves `loc` to a canonical path.
    pub fn resolve_path(&self, loc: O::Location) -> Resolution {
        self.resolver.resolve(self.oracle, loc)
    }

    /// Classifies the code at `loc`.
    ///
    /// System headers are recognized before any path resolution, so they
    /// never touch the filesystem.
    pub fn classify_location(&self, loc: O::Location) -> Classification {
        if self.oracle.is_in_system_header(loc) {
            trace!("{:?} is in a system header", loc);
            return self.policy.classify(None, true);
        }

        let resolution = self.resolve_path(loc);
        let classification = self.policy.classify(resolution.canonical(), false);
        trace!("{:?} -> {:?} -> {}", loc, resolution, classification);
        classification
    }

    /// Decides whether `decl` goes to the rule layer, and under which
    /// classification. `None` means skip.
    ///
    /// Ignored bases are not considered here; see
    /// [`has_ignored_base`](Self::has_ignored_base).
    pub fn should_check(&self, decl: &Declaration<O::Location>) -> Option<Classification> {
        let classification = self.classify_location(decl.location);
        if classification == Classification::ThirdParty {
            debug!("Skipping {}: third-party location", decl.name);
            return None;
        }

        match decl.kind {
            DeclKind::Class => {
                if self.policy.ignores().is_ignored_type_name(&decl.name) {
                    debug!("Skipping {}: ignored type name", decl.name);
                    return None;
                }
                if self.policy.is_mock_helper_name(&decl.name) {
                    debug!("Skipping {}: mock helper", decl.name);
                    return None;
                }
            }
            DeclKind::Enum => {
                if self.policy.ignores().is_ignored_type_name(&decl.name) {
                    debug!("Skipping {}: ignored type name", decl.name);
                    return None;
                }
            }
            DeclKind::Other => {}
        }

        Some(classification)
    }

    /// Returns true if any ancestor of `decl` is an ignored base class.
    pub fn has_ignored_base(&self, decl: &Declaration<O::Location>) -> bool {
        bases::has_ignored_base(&decl.bases, self.policy.ignores())
    }

    /// Namespace label for `decl`.
    pub fn namespace_of(&self, decl: &Declaration<O::Location>) -> String {
        namespace::qualifying_namespace(&decl.scopes)
    }

    /// Returns true if `loc`, or any location it was macro-expanded at, is in
    /// an implementation file.
    pub fn is_in_implementation_file(&self, loc: O::Location) -> bool {
        let mut loc = loc;
        for _ in 0..MAX_EXPANSION_DEPTH {
            if let Some(filename) = spelled_filename(self.oracle, loc) {
                if self.policy.is_implementation_file(&filename) {
                    return true;
                }
            }
            if !self.oracle.is_macro_location(loc) {
                return false;
            }
            loc = self.oracle.immediate_expansion_location(loc);
        }
        warn!(
            "Macro expansion chain deeper than {} levels at {:?}",
            MAX_EXPANSION_DEPTH, loc
        );
        false
    }

    /// Builds the context handed to rules for a declaration that passed.
    pub fn context_for(
        &self,
        decl: &Declaration<O::Location>,
        classification: Classification,
    ) -> CheckContext<O::Location> {
        CheckContext {
            classification,
            location: decl.location,
            namespace: self.namespace_of(decl),
            in_implementation_file: self.is_in_implementation_file(decl.location),
            has_ignored_base: decl.kind == DeclKind::Class && self.has_ignored_base(decl),
            error_level: self.error_level(),
        }
    }

    /// Filters `decl` and, if it passes, hands it to `rule`.
    ///
    /// Returns the classification the rule saw, or `None` if skipped.
    pub fn dispatch(
        &self,
        decl: &Declaration<O::Location>,
        mut rule: &mut dyn DeclarationRule<O::Location>,
    ) -> Option<Classification> {
        self.dispatch_all(decl, std::slice::from_mut(&mut rule))
    }

    /// Filters `decl` once and hands it to every rule in `rules`.
    pub fn dispatch_all<R>(
        &self,
        decl: &Declaration<O::Location>,
        rules: &mut [R],
    ) -> Option<Classification>
    where
        R: DeclarationRule<O::Location>,
    {
        let classification = self.should_check(decl)?;
        let ctx = self.context_for(decl, classification);

        for rule in rules.iter_mut() {
            match decl.kind {
                DeclKind::Class => rule.check_class(&ctx, decl),
                DeclKind::Enum => rule.check_enum(&ctx, decl),
                DeclKind::Other => trace!("No callback for {} in {}", decl.name, rule.name()),
            }
        }

        Some(classification)
    }
}
