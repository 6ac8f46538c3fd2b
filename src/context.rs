//! Execution context: the typed, per-invocation option set handed to every
//! command handler, and site resolution over it.
//!
//! The context is built once by the binary entry point and never mutated
//! afterwards; handlers receive it by shared reference.

use crate::error::CliError;
use crate::settings::AnvilConfig;
use crate::sites::SiteStore;
use std::path::PathBuf;

/// Per-invocation execution context. Immutable after construction.
#[derive(Debug, Clone)]
pub struct ExecContext {
    /// Sites selected with `--site`, in the order given.
    pub sites: Vec<String>,
    /// Emit a profiling report after the command finishes.
    pub profile: bool,
    /// Verbose output requested.
    pub verbose: bool,
    /// Bench root directory containing the site directories.
    pub sites_path: PathBuf,
}

impl ExecContext {
    /// Build the context from CLI globals and loaded configuration.
    ///
    /// Site selection precedence: explicit `--site` flags, then the
    /// configured `default_site`, then the bench `currentsite.txt` file.
    /// An empty `sites` list is valid here; commands that need a site go
    /// through [`first_site`].
    pub fn new(
        cli_sites: Vec<String>,
        profile: bool,
        verbose: bool,
        sites_path: PathBuf,
        config: &AnvilConfig,
    ) -> Self {
        let sites = if !cli_sites.is_empty() {
            cli_sites
        } else if let Some(ref site) = config.default_site {
            vec![site.clone()]
        } else {
            let store = SiteStore::new(&sites_path);
            store.read_current_site().into_iter().collect()
        };

        Self {
            sites,
            profile,
            verbose,
            sites_path,
        }
    }

    /// Accessor for the bench site store rooted at this context's path.
    pub fn site_store(&self) -> SiteStore {
        SiteStore::new(&self.sites_path)
    }
}

/// Return the first selected site, or `MissingSite` when none was given.
///
/// Side-effect-free: the top-level dispatcher is the only place that turns
/// the error into a printed hint and exit code 1.
pub fn first_site(context: &ExecContext) -> Result<&str, CliError> {
    context
        .sites
        .first()
        .map(|s| s.as_str())
        .ok_or(CliError::MissingSite)
}
