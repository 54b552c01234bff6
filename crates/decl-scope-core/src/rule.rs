//! Seam to the downstream rule-checking layer.

use crate::decl::Declaration;
use crate::types::{Classification, Severity};

/// Facts about a declaration that passed the filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckContext<L> {
    /// Which rule set applies.
    pub classification: Classification,
    /// Location the classification was computed for.
    pub location: L,
    /// Outermost enclosing namespace label (see
    /// [`qualifying_namespace`](crate::namespace::qualifying_namespace)).
    pub namespace: String,
    /// Whether the declaration sits in an implementation file (or a macro
    /// expanded from one) rather than a header.
    pub in_implementation_file: bool,
    /// Whether any ancestor is an ignored base class. Rules may use this to
    /// skip structural checks.
    pub has_ignored_base: bool,
    /// Severity findings should be reported at.
    pub error_level: Severity,
}

/// A style rule that consumes filtered declarations.
///
/// # Example
///
/// ```ignore
/// use decl_scope_core::{CheckContext, Declaration, DeclarationRule};
///
/// struct CountClasses(usize);
///
/// impl<L> DeclarationRule<L> for CountClasses {
///     fn name(&self) -> &'static str { "count-classes" }
///
///     fn check_class(&mut self, _ctx: &CheckContext<L>, _decl: &Declaration<L>) {
///         self.0 += 1;
///     }
/// }
/// ```
pub trait DeclarationRule<L> {
    /// Returns the kebab-case name of this rule.
    fn name(&self) -> &'static str;

    /// Called for every class-like declaration that should be checked.
    fn check_class(&mut self, _ctx: &CheckContext<L>, _decl: &Declaration<L>) {}

    /// Called for every enum-like declaration that should be checked.
    fn check_enum(&mut self, _ctx: &CheckContext<L>, _decl: &Declaration<L>) {}
}

/// Type alias for boxed rule trait objects.
pub type RuleBox<L> = Box<dyn DeclarationRule<L>>;

impl<L, T: DeclarationRule<L> + ?Sized> DeclarationRule<L> for &mut T {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn check_class(&mut self, ctx: &CheckContext<L>, decl: &Declaration<L>) {
        (**self).check_class(ctx, decl);
    }

    fn check_enum(&mut self, ctx: &CheckContext<L>, decl: &Declaration<L>) {
        (**self).check_enum(ctx, decl);
    }
}

impl<L, T: DeclarationRule<L> + ?Sized> DeclarationRule<L> for Box<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn check_class(&mut self, ctx: &CheckContext<L>, decl: &Declaration<L>) {
        (**self).check_class(ctx, decl);
    }

    fn check_enum(&mut self, ctx: &CheckContext<L>, decl: &Declaration<L>) {
        (**self).check_enum(ctx, decl);
    }
}
