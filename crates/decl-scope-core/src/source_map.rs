//! In-memory [`LocationOracle`] implementation.
//!
//! Used by the CLI to push plain paths through the engine, and as the
//! deterministic host in tests. A macro location can only link to locations
//! created before it, so every macro chain terminates.

use crate::host::LocationOracle;

/// Location handle into a [`SourceMap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceLoc(usize);

#[derive(Debug, Clone)]
enum Entry {
    File { name: String, system_header: bool },
    Macro { spelling: SourceLoc, expansion: SourceLoc },
    Invalid,
}

/// A flat table of file, macro, and invalid locations.
#[derive(Debug, Clone, Default)]
pub struct SourceMap {
    entries: Vec<Entry>,
}

impl SourceMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a location inside the file `name`.
    pub fn add_file(&mut self, name: impl Into<String>, system_header: bool) -> SourceLoc {
        self.push(Entry::File {
            name: name.into(),
            system_header,
        })
    }

    /// Adds a location produced by expanding a macro.
    ///
    /// `spelling` is where the expanded text was written; `expansion` is where
    /// the macro was invoked. If either handle was not issued by this map, the
    /// new location is invalid.
    pub fn add_macro_expansion(&mut self, spelling: SourceLoc, expansion: SourceLoc) -> SourceLoc {
        let known = self.entries.len();
        if spelling.0 >= known || expansion.0 >= known {
            return self.push(Entry::Invalid);
        }
        self.push(Entry::Macro {
            spelling,
            expansion,
        })
    }

    /// Adds a location with no backing file.
    pub fn add_invalid(&mut self) -> SourceLoc {
        self.push(Entry::Invalid)
    }

    /// Number of locations in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the map holds no locations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn push(&mut self, entry: Entry) -> SourceLoc {
        self.entries.push(entry);
        SourceLoc(self.entries.len() - 1)
    }

    fn entry(&self, loc: SourceLoc) -> &Entry {
        self.entries.get(loc.0).unwrap_or(&Entry::Invalid)
    }

    /// Follows expansion links until a non-macro location is reached.
    fn expansion_root(&self, mut loc: SourceLoc) -> SourceLoc {
        while let Entry::Macro { expansion, .. } = self.entry(loc) {
            loc = *expansion;
        }
        loc
    }
}

impl LocationOracle for SourceMap {
    type Location = SourceLoc;

    fn is_in_system_header(&self, loc: SourceLoc) -> bool {
        matches!(
            self.entry(self.expansion_root(loc)),
            Entry::File {
                system_header: true,
                ..
            }
        )
    }

    fn is_macro_location(&self, loc: SourceLoc) -> bool {
        matches!(self.entry(loc), Entry::Macro { .. })
    }

    fn spelling_location(&self, mut loc: SourceLoc) -> SourceLoc {
        while let Entry::Macro { spelling, .. } = self.entry(loc) {
            loc = *spelling;
        }
        loc
    }

    fn presumed_filename(&self, loc: SourceLoc) -> Option<String> {
        match self.entry(self.expansion_root(loc)) {
            Entry::File { name, .. } => Some(name.clone()),
            Entry::Macro { .. } | Entry::Invalid => None,
        }
    }

    fn immediate_expansion_location(&self, loc: SourceLoc) -> SourceLoc {
        match self.entry(loc) {
            Entry::Macro { expansion, .. } => *expansion,
            Entry::File { .. } | Entry::Invalid => loc,
        }
    }
}
