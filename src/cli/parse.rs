//! CLI parse: clap types for Anvil. No behavior; definitions only.

use clap::Parser;
use std::path::PathBuf;

/// Anvil CLI - site-oriented tooling for the Anvil web framework
#[derive(Parser)]
#[command(name = "anvil")]
#[command(about = "Site-oriented command line tooling for the Anvil web framework")]
#[command(version)]
pub struct Cli {
    /// Site to operate on (repeatable; first one is used by site-bound commands)
    #[arg(long = "site")]
    pub sites: Vec<String>,

    /// Profile the command and print a report
    #[arg(long)]
    pub profile: bool,

    /// Bench root directory containing the sites
    #[arg(long, default_value = ".")]
    pub sites_path: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long)]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long)]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stderr, stdout, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Command to run (omit to list available commands)
    pub command: Option<String>,

    /// Arguments for the command
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}
