//! Interface to the compiler host that owns source locations.

/// Read-only view of the host's source manager.
///
/// Location handles are opaque to the engine; it only ever hands them back
/// to the oracle. A handle may point into a real file, into a macro
/// expansion, or nowhere at all (synthetic or invalid locations).
pub trait LocationOracle {
    /// The host's location handle.
    type Location: Copy + std::fmt::Debug;

    /// Whether `loc` is inside a system header.
    fn is_in_system_header(&self, loc: Self::Location) -> bool;

    /// Whether `loc` was produced by a macro expansion.
    fn is_macro_location(&self, loc: Self::Location) -> bool;

    /// The location where the text at `loc` was actually spelled.
    ///
    /// For non-macro locations this is `loc` itself.
    fn spelling_location(&self, loc: Self::Location) -> Self::Location;

    /// Presumed file name for `loc`, honoring `#line` directives.
    ///
    /// Returns `None` for invalid locations.
    fn presumed_filename(&self, loc: Self::Location) -> Option<String>;

    /// Unwinds `loc` through exactly one level of macro expansion.
    ///
    /// For non-macro locations this is `loc` itself.
    fn immediate_expansion_location(&self, loc: Self::Location) -> Self::Location;
}

impl<T: LocationOracle + ?Sized> LocationOracle for &T {
    type Location = T::Location;

    fn is_in_system_header(&self, loc: Self::Location) -> bool {
        (**self).is_in_system_header(loc)
    }

    fn is_macro_location(&self, loc: Self::Location) -> bool {
        (**self).is_macro_location(loc)
    }

    fn spelling_location(&self, loc: Self::Location) -> Self::Location {
        (**self).spelling_location(loc)
    }

    fn presumed_filename(&self, loc: Self::Location) -> Option<String> {
        (**self).presumed_filename(loc)
    }

    fn immediate_expansion_location(&self, loc: Self::Location) -> Self::Location {
        (**self).immediate_expansion_location(loc)
    }
}

/// File name of the text at `loc`, looked up at its spelling location.
pub(crate) fn spelled_filename<O: LocationOracle + ?Sized>(
    oracle: &O,
    loc: O::Location,
) -> Option<String> {
    let spelling = if oracle.is_macro_location(loc) {
        oracle.spelling_location(loc)
    } else {
        loc
    };
    oracle.presumed_filename(spelling)
}
