//! Shared helpers for integration tests: temporary benches and contexts.

use anvil::context::ExecContext;
use anvil::sites::SiteStore;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Create a temporary bench root with the given sites configured.
pub fn temp_bench(sites: &[&str]) -> TempDir {
    let temp = TempDir::new().unwrap();
    let store = SiteStore::new(temp.path());
    for site in sites {
        fs::create_dir_all(store.site_dir(site)).unwrap();
        fs::write(store.config_path(site), "{}\n").unwrap();
    }
    temp
}

/// Execution context selecting `sites` against a bench root.
pub fn exec_context(root: &Path, sites: &[&str], profile: bool) -> ExecContext {
    ExecContext {
        sites: sites.iter().map(|s| s.to_string()).collect(),
        profile,
        verbose: false,
        sites_path: root.to_path_buf(),
    }
}
