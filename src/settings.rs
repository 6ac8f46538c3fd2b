//! Tool configuration.
//!
//! Layered sources, lowest to highest precedence: built-in defaults, the
//! global `$XDG_CONFIG_HOME/anvil/config.toml` (or `~/.config/anvil/`),
//! `anvil.toml` in the bench root, and `ANVIL_*` environment variables.
//! CLI flags are applied on top by the binary.

use crate::error::CliError;
use crate::logging::LoggingConfig;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Name of the bench-level configuration file.
pub const BENCH_CONFIG_FILE: &str = "anvil.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnvilConfig {
    /// Site used when no `--site` flag is given.
    pub default_site: Option<String>,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Path to the user-global config file.
fn global_config_path() -> Option<PathBuf> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(xdg).join("anvil").join("config.toml"));
    }
    std::env::var("HOME").ok().map(|home| {
        PathBuf::from(home)
            .join(".config")
            .join("anvil")
            .join("config.toml")
    })
}

fn base_builder() -> ConfigBuilder<DefaultState> {
    let mut builder = Config::builder();
    if let Some(global) = global_config_path() {
        if global.exists() {
            builder = builder.add_source(File::from(global).required(false));
        }
    }
    builder
}

/// Loader for [`AnvilConfig`].
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a bench root.
    pub fn load(sites_path: &Path) -> Result<AnvilConfig, CliError> {
        let bench_file = sites_path.join(BENCH_CONFIG_FILE);
        let mut builder = base_builder();
        if bench_file.exists() {
            builder = builder.add_source(File::from(bench_file).required(false));
        }
        let settings = builder
            .add_source(Environment::with_prefix("ANVIL").separator("__"))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    /// Load configuration from an explicit file, skipping layering.
    pub fn load_from_file(path: &Path) -> Result<AnvilConfig, CliError> {
        if !path.exists() {
            warn!(path = %path.display(), "configuration file not found");
        }
        let settings = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(true))
            .build()?;
        Ok(settings.try_deserialize()?)
    }
}
