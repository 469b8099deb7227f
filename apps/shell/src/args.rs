//! # CLI Argument Definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// The main CLI structure parsing command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "tessera")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Inspect the Tessera feature registry")]
pub struct Cli {
    /// Configuration file (TOML, JSON or YAML). Defaults to `./tessera.*` when present.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List declared features with their registry keys and member counts
    Features {},
    /// List the entities registered under a registry key
    Entities {
        /// Registry key (e.g. 'global_search_models')
        key: String,

        /// Treat KEY as a feature name and use its current registry key
        #[arg(short, long)]
        feature: bool,
    },
    /// List entities waiting for undeclared features
    Pending {},
    /// Selectable (value, label) pairs for a registry key
    Choices {
        /// Registry key (e.g. 'report_models')
        key: String,
    },
    /// Full registry snapshot
    Summary {},
}
