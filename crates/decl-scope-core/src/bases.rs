//! Ancestor scan for ignored base classes.

use crate::decl::BaseRecord;
use crate::registry::IgnoreRegistry;

/// Returns the first ancestor (depth first, declaration order) whose
/// qualified name is an ignored base class.
///
/// Base graphs are acyclic in the analyzed language, so no visited set is
/// kept. The walk uses an explicit stack rather than recursion.
#[must_use]
pub fn find_ignored_base<'a>(
    bases: &'a [BaseRecord],
    registry: &IgnoreRegistry,
) -> Option<&'a BaseRecord> {
    let mut pending: Vec<&BaseRecord> = bases.iter().rev().collect();
    while let Some(base) = pending.pop() {
        if registry.is_ignored_base_class_name(&base.qualified_name) {
            return Some(base);
        }
        pending.extend(base.bases.iter().rev());
    }
    None
}

/// Returns true if any ancestor is an ignored base class.
#[must_use]
pub fn has_ignored_base(bases: &[BaseRecord], registry: &IgnoreRegistry) -> bool {
    find_ignored_base(bases, registry).is_some()
}
