//! Shared output formatting for classification reports.

use anyhow::Result;
use decl_scope_core::{Classification, Severity};
use serde::Serialize;
use std::fmt::Write as _;

use crate::OutputFormat;

/// Classification of one file.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    /// File name as given or found.
    pub file: String,
    /// Canonical path the policy saw, if resolvable.
    pub canonical: Option<String>,
    /// Resulting classification.
    pub classification: Classification,
    /// Whether the file has an implementation-file suffix.
    pub implementation_file: bool,
}

/// Number of files per classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Counts {
    /// `internal` files.
    pub internal: usize,
    /// `special-subset` files.
    pub special_subset: usize,
    /// `third-party` files.
    pub third_party: usize,
}

impl Counts {
    fn add(&mut self, classification: Classification) {
        match classification {
            Classification::Internal => self.internal += 1,
            Classification::SpecialSubset => self.special_subset += 1,
            Classification::ThirdParty => self.third_party += 1,
        }
    }

    fn get(&self, classification: Classification) -> usize {
        match classification {
            Classification::Internal => self.internal,
            Classification::SpecialSubset => self.special_subset,
            Classification::ThirdParty => self.third_party,
        }
    }

    fn total(&self) -> usize {
        self.internal + self.special_subset + self.third_party
    }
}

/// Result of a classify or scan run.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Where the policy came from.
    pub config: String,
    /// Severity the rule layer would report at.
    pub error_level: Severity,
    /// Per-file results, in discovery order.
    pub files: Vec<FileReport>,
    /// Totals over `files`.
    pub counts: Counts,
}

impl Report {
    /// Builds a report and computes its totals.
    #[must_use]
    pub fn new(config: String, error_level: Severity, files: Vec<FileReport>) -> Self {
        let mut counts = Counts::default();
        for file in &files {
            counts.add(file.classification);
        }
        Self {
            config,
            error_level,
            files,
            counts,
        }
    }
}

/// Print a report in the specified format.
pub fn print(report: &Report, format: OutputFormat, summary_only: bool) -> Result<()> {
    let rendered = match format {
        OutputFormat::Text => render_text(report, summary_only),
        OutputFormat::Json => render_json(report, summary_only)?,
        OutputFormat::Compact => render_compact(report, summary_only),
    };
    print!("{rendered}");
    Ok(())
}

fn summary_line(counts: &Counts) -> String {
    let parts: Vec<String> = Classification::ALL
        .iter()
        .map(|c| format!("{} {}", counts.get(*c), c))
        .collect();
    format!("{} file(s): {}", counts.total(), parts.join(", "))
}

fn render_text(report: &Report, summary_only: bool) -> String {
    let mut out = String::new();

    if !summary_only {
        for file in &report.files {
            let canonical = file.canonical.as_deref().unwrap_or("(unresolved)");
            let marker = if file.implementation_file { " [impl]" } else { "" };
            let _ = writeln!(
                out,
                "{:<14} {} -> {}{}",
                file.classification, file.file, canonical, marker
            );
        }
        if !report.files.is_empty() {
            out.push('\n');
        }
    }

    let _ = writeln!(out, "{}", summary_line(&report.counts));
    out
}

fn render_json(report: &Report, summary_only: bool) -> Result<String> {
    let json = if summary_only {
        serde_json::to_string_pretty(&report.counts)?
    } else {
        serde_json::to_string_pretty(report)?
    };
    Ok(format!("{json}\n"))
}

fn render_compact(report: &Report, summary_only: bool) -> String {
    let mut out = String::new();
    if summary_only {
        for c in Classification::ALL {
            let _ = writeln!(out, "{c}: {}", report.counts.get(c));
        }
    } else {
        for file in &report.files {
            let _ = writeln!(out, "{}: {}", file.file, file.classification);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Report {
        Report::new(
            "built-in defaults".to_string(),
            Severity::Warning,
            vec![
                FileReport {
                    file: "chrome/foo.cc".to_string(),
                    canonical: Some("/src/chrome/foo.cc".to_string()),
                    classification: Classification::Internal,
                    implementation_file: true,
                },
                FileReport {
                    file: "third_party/zlib/zlib.h".to_string(),
                    canonical: Some("/src/third_party/zlib/zlib.h".to_string()),
                    classification: Classification::ThirdParty,
                    implementation_file: false,
                },
                FileReport {
                    file: "<scratch space>".to_string(),
                    canonical: None,
                    classification: Classification::ThirdParty,
                    implementation_file: false,
                },
            ],
        )
    }

    #[test]
    fn counts_are_totalled() {
        let report = sample();
        assert_eq!(
            report.counts,
            Counts {
                internal: 1,
                special_subset: 0,
                third_party: 2,
            }
        );
    }

    #[test]
    fn text_output() {
        insta::assert_snapshot!(render_text(&sample(), false), @r"
        internal       chrome/foo.cc -> /src/chrome/foo.cc [impl]
        third-party    third_party/zlib/zlib.h -> /src/third_party/zlib/zlib.h
        third-party    <scratch space> -> (unresolved)

        3 file(s): 1 internal, 0 special-subset, 2 third-party
        ");
    }

    #[test]
    fn text_summary_only() {
        assert_eq!(
            render_text(&sample(), true),
            "3 file(s): 1 internal, 0 special-subset, 2 third-party\n"
        );
    }

    #[test]
    fn compact_output() {
        insta::assert_snapshot!(render_compact(&sample(), false), @r"
        chrome/foo.cc: internal
        third_party/zlib/zlib.h: third-party
        <scratch space>: third-party
        ");
        assert_eq!(
            render_compact(&sample(), true),
            "internal: 1\nspecial-subset: 0\nthird-party: 2\n"
        );
    }

    #[test]
    fn json_uses_kebab_case_names() {
        let json = render_json(&sample(), false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["files"][1]["classification"], "third-party");
        assert_eq!(value["counts"]["third-party"], 2);
        assert_eq!(value["error_level"], "warning");
        assert!(value["files"][2]["canonical"].is_null());

        let summary: serde_json::Value =
            serde_json::from_str(&render_json(&sample(), true).unwrap()).unwrap();
        assert_eq!(summary["special-subset"], 0);
    }
}
