//! Namespace label for a declaration's enclosing scopes.

use crate::decl::Scope;

/// Label used for anonymous namespaces.
pub const ANONYMOUS_NAMESPACE: &str = "<anonymous namespace>";

/// Returns the namespace label rules use for diagnostics and context.
///
/// Walks outward from the innermost scope. Each namespace replaces the label
/// collected so far; records, functions, and other scopes pass it through.
/// The walk ends at the translation unit, so the result is the name of the
/// outermost enclosing namespace, not a joined `a::b` path. An empty string
/// means the declaration is not inside any namespace.
#[must_use]
pub fn qualifying_namespace(scopes: &[Scope]) -> String {
    let mut candidate = "";
    for scope in scopes {
        if let Scope::Namespace(name) = scope {
            candidate = name.as_deref().unwrap_or(ANONYMOUS_NAMESPACE);
        }
    }
    candidate.to_string()
}
