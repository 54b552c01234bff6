//! Name-based exclusion lists.

use std::collections::HashSet;

/// Immutable sets of ignored type names and ignored base-class names.
///
/// Type names are matched against the *simple* (unqualified) declaration
/// name, so an entry like `Header` skips every `Header` in every namespace.
/// Base-class names are matched against fully qualified names
/// (e.g. `IPC::NoParams`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreRegistry {
    type_names: HashSet<String>,
    base_classes: HashSet<String>,
}

impl IgnoreRegistry {
    /// Creates a registry from the given names.
    #[must_use]
    pub fn new<T, B>(type_names: T, base_classes: B) -> Self
    where
        T: IntoIterator,
        T::Item: Into<String>,
        B: IntoIterator,
        B::Item: Into<String>,
    {
        Self {
            type_names: type_names.into_iter().map(Into::into).collect(),
            base_classes: base_classes.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true if declarations with this simple name are never checked.
    #[must_use]
    pub fn is_ignored_type_name(&self, name: &str) -> bool {
        self.type_names.contains(name)
    }

    /// Returns true if deriving from this qualified name exempts a class.
    #[must_use]
    pub fn is_ignored_base_class_name(&self, qualified_name: &str) -> bool {
        self.base_classes.contains(qualified_name)
    }

    /// Ignored type names, sorted.
    #[must_use]
    pub fn type_names(&self) -> Vec<&str> {
        sorted(&self.type_names)
    }

    /// Ignored base-class names, sorted.
    #[must_use]
    pub fn base_classes(&self) -> Vec<&str> {
        sorted(&self.base_classes)
    }
}

fn sorted(set: &HashSet<String>) -> Vec<&str> {
    let mut names: Vec<&str> = set.iter().map(String::as_str).collect();
    names.sort_unstable();
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> IgnoreRegistry {
        IgnoreRegistry::new(["QuadF", "Header"], ["IPC::NoParams"])
    }

    #[test]
    fn matches_simple_type_names_only() {
        let r = registry();
        assert!(r.is_ignored_type_name("QuadF"));
        assert!(!r.is_ignored_type_name("gfx::QuadF"));
        assert!(!r.is_ignored_type_name("quadf"));
    }

    #[test]
    fn base_classes_are_a_separate_set() {
        let r = registry();
        assert!(r.is_ignored_base_class_name("IPC::NoParams"));
        assert!(!r.is_ignored_base_class_name("NoParams"));
        assert!(!r.is_ignored_type_name("IPC::NoParams"));
        assert!(!r.is_ignored_base_class_name("QuadF"));
    }

    #[test]
    fn listings_are_sorted() {
        assert_eq!(registry().type_names(), vec!["Header", "QuadF"]);
        assert_eq!(registry().base_classes(), vec!["IPC::NoParams"]);
    }
}
