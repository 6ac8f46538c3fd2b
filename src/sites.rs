//! Bench directory access: site enumeration and per-site configuration.
//!
//! A bench root holds one directory per site; a directory counts as a site
//! when it carries a `site_config.json`. The store is file-level only —
//! provisioning (creating or dropping sites) happens outside this tool.

use crate::error::CliError;
use crate::profile;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name of the per-site configuration file.
pub const SITE_CONFIG_FILE: &str = "site_config.json";

/// Name of the bench file recording the default site.
pub const CURRENT_SITE_FILE: &str = "currentsite.txt";

/// Accessor for a bench root and the sites beneath it.
#[derive(Debug, Clone)]
pub struct SiteStore {
    root: PathBuf,
}

impl SiteStore {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory of one site.
    pub fn site_dir(&self, site: &str) -> PathBuf {
        self.root.join(site)
    }

    /// Path of a site's `site_config.json`.
    pub fn config_path(&self, site: &str) -> PathBuf {
        self.site_dir(site).join(SITE_CONFIG_FILE)
    }

    /// True when `site` exists under the bench root.
    pub fn site_exists(&self, site: &str) -> bool {
        self.config_path(site).is_file()
    }

    /// All configured sites, sorted by name.
    pub fn list_sites(&self) -> Result<Vec<String>, CliError> {
        let mut sites = Vec::new();
        if !self.root.is_dir() {
            return Ok(sites);
        }
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.path().is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_string();
            if self.site_exists(&name) {
                sites.push(name);
            }
        }
        sites.sort();
        Ok(sites)
    }

    /// Load a site's configuration object.
    pub fn load_config(&self, site: &str) -> Result<Map<String, Value>, CliError> {
        profile::scope("sites::load_config", || {
            if !self.site_exists(site) {
                return Err(CliError::SiteNotFound(site.to_string()));
            }
            let raw = fs::read_to_string(self.config_path(site))?;
            let value: Value = serde_json::from_str(&raw)?;
            match value {
                Value::Object(map) => Ok(map),
                _ => Err(CliError::ConfigError(format!(
                    "{} for site '{}' is not a JSON object",
                    SITE_CONFIG_FILE, site
                ))),
            }
        })
    }

    /// Persist a site's configuration object.
    pub fn save_config(&self, site: &str, config: &Map<String, Value>) -> Result<(), CliError> {
        profile::scope("sites::save_config", || {
            if !self.site_exists(site) {
                return Err(CliError::SiteNotFound(site.to_string()));
            }
            let rendered = serde_json::to_string_pretty(&Value::Object(config.clone()))?;
            fs::write(self.config_path(site), rendered + "\n")?;
            debug!(site, "site config written");
            Ok(())
        })
    }

    /// Set one key in a site's configuration.
    pub fn update_config(&self, site: &str, key: &str, value: Value) -> Result<(), CliError> {
        let mut config = self.load_config(site)?;
        config.insert(key.to_string(), value);
        self.save_config(site, &config)
    }

    /// Default site recorded in the bench, if any.
    pub fn read_current_site(&self) -> Option<String> {
        let raw = fs::read_to_string(self.root.join(CURRENT_SITE_FILE)).ok()?;
        let site = raw.trim();
        if site.is_empty() {
            None
        } else {
            Some(site.to_string())
        }
    }

    /// Record `site` as the bench default.
    pub fn write_current_site(&self, site: &str) -> Result<(), CliError> {
        if !self.site_exists(site) {
            return Err(CliError::SiteNotFound(site.to_string()));
        }
        fs::write(self.root.join(CURRENT_SITE_FILE), format!("{}\n", site))?;
        Ok(())
    }
}
