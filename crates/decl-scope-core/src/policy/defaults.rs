//! Built-in policy tables.

/// Directories never checked.
pub const BANNED_DIRECTORIES: &[&str] = &[
    "/third_party/",
    "/native_client/",
    "/breakpad/",
    "/courgette/",
    "/ppapi/",
    "/testing/",
    "/v8/",
    "/sdch/",
    "/frameworks/",
    // Autogenerated headers: make puts them below gen and geni, ninja below
    // gen, and Xcode has a fixed output directory for everything.
    "/gen/",
    "/geni/",
    "/xcodebuild/",
];

/// Relaxed modules and their fully-checked subtrees, in match order.
///
/// `WebKit` is the pre-rename name of `blink`. It has no exemption and is
/// matched first, so it relaxes a path even below a `blink/browser` tree.
pub const SPECIAL_SUBSETS: &[(&str, &[&str])] = &[
    ("/third_party/WebKit/", &[]),
    ("/third_party/blink/", &["/third_party/blink/browser/"]),
];

/// Simple type names never checked.
pub const IGNORED_TYPES: &[&str] = &[
    // Low level threading code that probably shouldn't be out of lined.
    "ThreadLocalBoolean",
    // Pickle-derived struct that is all packed integers.
    "Header",
    // GPU code with multiple-inclusion header tricks.
    "Validators",
    // UNIT_TEST-only constructors.
    "AutocompleteController",
    "HistoryURLProvider",
    // Bundle of integers with one non-POD member, net unittests only.
    "MockTransaction",
    // Enum with _LAST members that aren't the last value.
    "ServerFieldType",
    "TestAnimationDelegate",
    // Public interface used by nacl.
    "PluginVersionInfo",
    // Measured performance improvement on cc_perftests.
    "QuadF",
    // Enum with _LAST members that aren't the last value.
    "ViewID",
];

/// Qualified base classes that exempt their subclasses.
///
/// `IPC::NoParams` structs are macro generated, so explicit constructors
/// can't be added to them.
pub const IGNORED_BASES: &[&str] = &["IPC::NoParams"];

/// Class-name suffix of mock helper types (gMock matchers).
pub const MOCK_SUFFIX: &str = "Matcher";

/// File-name suffixes of implementation (non-header) files.
pub const IMPLEMENTATION_EXTENSIONS: &[&str] = &[".cc", ".cpp", ".mm"];

pub(crate) fn banned_directories() -> Vec<String> {
    to_owned(BANNED_DIRECTORIES)
}

pub(crate) fn ignored_types() -> Vec<String> {
    to_owned(IGNORED_TYPES)
}

pub(crate) fn ignored_bases() -> Vec<String> {
    to_owned(IGNORED_BASES)
}

pub(crate) fn mock_suffix() -> String {
    MOCK_SUFFIX.to_string()
}

pub(crate) fn implementation_extensions() -> Vec<String> {
    to_owned(IMPLEMENTATION_EXTENSIONS)
}

fn to_owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}
