//! Anvil: site-oriented command line tooling for the Anvil web framework.
//!
//! A bench directory holds one subdirectory per configured site; the CLI
//! dispatches registered subcommands against sites selected with `--site`,
//! with optional per-invocation profiling.

pub mod cli;
pub mod commands;
pub mod context;
pub mod error;
pub mod logging;
pub mod process;
pub mod profile;
pub mod registry;
pub mod settings;
pub mod sites;
