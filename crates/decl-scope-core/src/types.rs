//! Core value types shared across the engine.

use serde::{Deserialize, Serialize};

/// Where a declaration lives, as far as the style rules are concerned.
///
/// Every resolvable declaration maps to exactly one value. Locations that
/// cannot be attributed to a real file are always [`Classification::ThirdParty`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Classification {
    /// First-party code, checked with the full rule set.
    Internal,
    /// First-party code held to a historically relaxed rule subset.
    SpecialSubset,
    /// Excluded from checking.
    ThirdParty,
}

impl Classification {
    /// All classifications, in reporting order.
    pub const ALL: [Self; 3] = [Self::Internal, Self::SpecialSubset, Self::ThirdParty];

    /// Returns true if declarations with this classification are checked at all.
    #[must_use]
    pub fn is_checked(self) -> bool {
        self != Self::ThirdParty
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(match self {
            Self::Internal => "internal",
            Self::SpecialSubset => "special-subset",
            Self::ThirdParty => "third-party",
        })
    }
}

/// Severity a downstream rule layer should report its findings at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Reported, but does not fail the build.
    Warning,
    /// Fails the build.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Kind of a tag-like declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclKind {
    /// `class` / `struct` / `union` with C++ semantics.
    Class,
    /// `enum` / `enum class`.
    Enum,
    /// Any other tag declaration (e.g. a plain C record).
    Other,
}
