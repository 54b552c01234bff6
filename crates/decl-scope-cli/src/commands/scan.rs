//! Scan command implementation.

use anyhow::Result;
use std::path::{Path, PathBuf};

use super::classify::classify_files;
use super::output::{self, Report};
use crate::config_resolver::ConfigSource;
use crate::{CliOptions, OutputFormat};

/// Extensions of C, C++ and Objective-C sources and headers.
const SOURCE_EXTENSIONS: &[&str] = &[
    "c", "cc", "cpp", "cxx", "h", "hh", "hpp", "hxx", "inc", "m", "mm",
];

/// Runs the scan command.
pub fn run(
    root: &Path,
    summary_only: bool,
    format: OutputFormat,
    source: &ConfigSource,
    flags: CliOptions,
) -> Result<()> {
    let (config, policy) = super::load_policy(source, flags)?;

    let paths = collect_sources(root)?;
    tracing::info!("Classifying {} file(s) under {}", paths.len(), root.display());

    let files = classify_files(paths.iter().map(PathBuf::as_path), false, &config, &policy);
    let report = Report::new(source.to_string(), config.options.error_level(), files);

    output::print(&report, format, summary_only)
}

/// Walks `root` honoring ignore files and returns source files in sorted order.
fn collect_sources(root: &Path) -> Result<Vec<PathBuf>> {
    let mut builder = ignore::WalkBuilder::new(root);
    builder.hidden(false).git_ignore(true);

    let mut files = Vec::new();
    for entry in builder.build() {
        let entry = entry?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let is_source = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| SOURCE_EXTENSIONS.contains(&e));
        if is_source {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use decl_scope_core::{Classification, Config};
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn only_sources_are_collected() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "chrome/foo.cc");
        touch(tmp.path(), "chrome/foo.h");
        touch(tmp.path(), "chrome/BUILD.gn");
        touch(tmp.path(), "ios/bar.mm");

        let files = collect_sources(tmp.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(tmp.path()).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();
        assert_eq!(names, vec!["chrome/foo.cc", "chrome/foo.h", "ios/bar.mm"]);
    }

    #[test]
    fn tree_is_classified() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "chrome/foo.cc");
        touch(tmp.path(), "third_party/zlib/zlib.h");
        touch(tmp.path(), "third_party/blink/renderer/node.cc");
        touch(tmp.path(), "third_party/blink/browser/host.cc");

        let config = Config::default();
        let policy = config.load_policy().unwrap();
        let paths = collect_sources(tmp.path()).unwrap();
        let report = Report::new(
            "test".to_string(),
            config.options.error_level(),
            classify_files(paths.iter().map(PathBuf::as_path), false, &config, &policy),
        );

        let by_name = |suffix: &str| {
            report
                .files
                .iter()
                .find(|f| f.file.replace('\\', "/").ends_with(suffix))
                .map(|f| f.classification)
        };
        assert_eq!(by_name("chrome/foo.cc"), Some(Classification::Internal));
        assert_eq!(by_name("zlib/zlib.h"), Some(Classification::ThirdParty));
        assert_eq!(by_name("renderer/node.cc"), Some(Classification::SpecialSubset));
        assert_eq!(by_name("browser/host.cc"), Some(Classification::Internal));
        assert_eq!(report.counts.internal, 2);
    }
}
