//! Classify command implementation.

use anyhow::Result;
use decl_scope_core::{Config, DeclarationFilter, Policy, SourceMap};
use std::path::{Path, PathBuf};

use super::output::{self, FileReport, Report};
use crate::config_resolver::ConfigSource;
use crate::{CliOptions, OutputFormat};

/// Runs the classify command.
pub fn run(
    paths: &[PathBuf],
    system_header: bool,
    format: OutputFormat,
    source: &ConfigSource,
    flags: CliOptions,
) -> Result<()> {
    let (config, policy) = super::load_policy(source, flags)?;

    let files = classify_files(paths.iter().map(PathBuf::as_path), system_header, &config, &policy);
    let report = Report::new(source.to_string(), config.options.error_level(), files);

    output::print(&report, format, false)
}

/// Classifies each file as if a declaration were spelled at its start.
pub fn classify_files<'p>(
    paths: impl IntoIterator<Item = &'p Path>,
    system_header: bool,
    config: &Config,
    policy: &Policy,
) -> Vec<FileReport> {
    let mut map = SourceMap::new();
    let entries: Vec<_> = paths
        .into_iter()
        .map(|p| {
            let name = p.to_string_lossy().into_owned();
            let loc = map.add_file(name.clone(), system_header);
            (name, loc)
        })
        .collect();

    let filter = DeclarationFilter::new(policy, &map).options(config.options);

    entries
        .into_iter()
        .map(|(file, loc)| {
            let classification = filter.classify_location(loc);
            let canonical = filter.resolve_path(loc).canonical().map(ToString::to_string);
            tracing::debug!("{} -> {}", file, classification);
            FileReport {
                file,
                canonical,
                classification,
                implementation_file: filter.is_in_implementation_file(loc),
            }
        })
        .collect()
}
