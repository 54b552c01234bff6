//! decl-scope CLI tool.
//!
//! Usage:
//! ```bash
//! decl-scope classify [OPTIONS] <PATH>...
//! decl-scope scan [OPTIONS] [ROOT]
//! decl-scope show-policy
//! decl-scope init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Classify C++ source locations against a first-party/third-party policy
#[derive(Parser)]
#[command(name = "decl-scope")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Do not canonicalize paths through the filesystem
    #[arg(long, global = true)]
    no_realpath: bool,

    /// Report findings as errors instead of warnings
    #[arg(long, global = true)]
    warnings_as_errors: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify individual files
    Classify {
        /// Files to classify
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Treat every path as a system header
        #[arg(long)]
        system_header: bool,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Classify every C, C++ and Objective-C file under a directory
    Scan {
        /// Directory to walk (default: current directory)
        #[arg(default_value = ".")]
        root: PathBuf,

        /// Only print counts per classification
        #[arg(long)]
        summary: bool,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Print the effective policy and options
    ShowPolicy,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for classification reports.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-file compact format.
    Compact,
}

/// Engine switches given on the command line.
#[derive(Clone, Copy, Debug, Default)]
pub struct CliOptions {
    /// `--no-realpath`
    pub no_realpath: bool,
    /// `--warnings-as-errors`
    pub warnings_as_errors: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let flags = CliOptions {
        no_realpath: cli.no_realpath,
        warnings_as_errors: cli.warnings_as_errors,
    };

    let locator = config_resolver::ConfigLocator::from_env();

    match cli.command {
        Commands::Classify {
            paths,
            system_header,
            format,
        } => {
            let source = locator.locate(&std::env::current_dir()?, cli.config.as_deref());
            commands::classify::run(&paths, system_header, format, &source, flags)
        }
        Commands::Scan {
            root,
            summary,
            format,
        } => {
            let source = locator.locate(&root, cli.config.as_deref());
            commands::scan::run(&root, summary, format, &source, flags)
        }
        Commands::ShowPolicy => {
            let source = locator.locate(&std::env::current_dir()?, cli.config.as_deref());
            commands::show_policy::run(&source, flags)
        }
        Commands::Init { force } => commands::init::run(force),
    }
}
