//! Declaration model handed over by the traversal driver.
//!
//! The driver converts whatever AST it walks into these plain values, so the
//! engine never depends on a particular compiler's node types.

use crate::types::DeclKind;

/// A class-like or enum-like declaration discovered during traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration<L> {
    /// Simple (unqualified) name.
    pub name: String,
    /// Kind of declaration.
    pub kind: DeclKind,
    /// Location of the declaration's inner start.
    pub location: L,
    /// Direct bases, in declaration order. Only meaningful for classes.
    ///
    /// Bases whose type does not name a record (e.g. dependent template
    /// parameters) are left out by the driver.
    pub bases: Vec<BaseRecord>,
    /// Enclosing lexical scopes, innermost first. The translation unit is
    /// implied and never listed.
    pub scopes: Vec<Scope>,
}

impl<L> Declaration<L> {
    /// Creates a declaration with no bases at translation-unit scope.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: DeclKind, location: L) -> Self {
        Self {
            name: name.into(),
            kind,
            location,
            bases: Vec::new(),
            scopes: Vec::new(),
        }
    }

    /// Shorthand for a class-like declaration.
    #[must_use]
    pub fn class(name: impl Into<String>, location: L) -> Self {
        Self::new(name, DeclKind::Class, location)
    }

    /// Shorthand for an enum-like declaration.
    #[must_use]
    pub fn enumeration(name: impl Into<String>, location: L) -> Self {
        Self::new(name, DeclKind::Enum, location)
    }

    /// Adds a direct base.
    #[must_use]
    pub fn with_base(mut self, base: BaseRecord) -> Self {
        self.bases.push(base);
        self
    }

    /// Sets the enclosing scopes, innermost first.
    #[must_use]
    pub fn with_scopes(mut self, scopes: Vec<Scope>) -> Self {
        self.scopes = scopes;
        self
    }
}

/// A base class together with its own ancestors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseRecord {
    /// Fully qualified name (e.g. `IPC::NoParams`).
    pub qualified_name: String,
    /// The base's own direct bases.
    pub bases: Vec<BaseRecord>,
}

impl BaseRecord {
    /// Creates a base with no further ancestors.
    #[must_use]
    pub fn new(qualified_name: impl Into<String>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            bases: Vec::new(),
        }
    }

    /// Adds an ancestor to this base.
    #[must_use]
    pub fn with_base(mut self, base: BaseRecord) -> Self {
        self.bases.push(base);
        self
    }
}

/// One enclosing lexical scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// A namespace; `None` for an anonymous namespace.
    Namespace(Option<String>),
    /// An enclosing class or struct.
    Record(String),
    /// An enclosing function body.
    Function(String),
    /// Anything else (linkage specs, blocks, ...).
    Other,
}

impl Scope {
    /// Shorthand for a named namespace.
    #[must_use]
    pub fn namespace(name: impl Into<String>) -> Self {
        Self::Namespace(Some(name.into()))
    }

    /// Shorthand for an anonymous namespace.
    #[must_use]
    pub fn anonymous_namespace() -> Self {
        Self::Namespace(None)
    }
}
