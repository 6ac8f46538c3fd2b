//! Utility commands: version, backup, arbitrary command execution, doctor.

use crate::context::{first_site, ExecContext};
use crate::error::CliError;
use crate::process::{run, RunOptions};
use crate::profile;
use crate::registry::{CommandArgs, CommandSpec, OptSpec, Registry};
use std::fs;
use tracing::info;

/// Subdirectory of the bench root receiving backup archives.
pub const BACKUPS_DIR: &str = "backups";

pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "version",
        group: "utils",
        about: "Print the anvil version",
        positionals: &[],
        variadic: false,
        options: &[],
        run: run_version,
    },
    CommandSpec {
        name: "backup",
        group: "utils",
        about: "Archive a site directory into the bench backups directory",
        positionals: &[],
        variadic: false,
        options: &[],
        run: run_backup,
    },
    CommandSpec {
        name: "exec",
        group: "utils",
        about: "Run a shell command in the site directory",
        positionals: &["cmd"],
        variadic: true,
        options: &[OptSpec {
            name: "quiet",
            takes_value: false,
            required: false,
            help: "Capture child output instead of inheriting the terminal",
        }],
        run: run_exec,
    },
    CommandSpec {
        name: "doctor",
        group: "utils",
        about: "Report bench health for a site",
        positionals: &[],
        variadic: false,
        options: &[],
        run: run_doctor,
    },
];

fn run_version(
    _registry: &Registry,
    _context: &ExecContext,
    _args: &CommandArgs,
) -> Result<String, CliError> {
    Ok(format!("anvil {}", env!("CARGO_PKG_VERSION")))
}

fn run_backup(
    _registry: &Registry,
    context: &ExecContext,
    _args: &CommandArgs,
) -> Result<String, CliError> {
    let site = first_site(context)?;
    let store = context.site_store();
    if !store.site_exists(site) {
        return Err(CliError::SiteNotFound(site.to_string()));
    }

    let backups = context.sites_path.join(BACKUPS_DIR);
    fs::create_dir_all(&backups)?;
    let stamp = chrono::Utc::now().format("%Y%m%d-%H%M%S");
    let archive = backups.join(format!("{}-{}.tar.gz", site, stamp));

    let command = format!(
        "tar -czf '{}' '{}'",
        archive.display(),
        site
    );
    let options = RunOptions {
        output: false,
        cwd: Some(context.sites_path.clone()),
        check: true,
        ..Default::default()
    };
    profile::scope("utils::archive", || run(&command, &options))?;

    info!(site, archive = %archive.display(), "site backup created");
    Ok(format!("Backed up site {} to {}", site, archive.display()))
}

fn run_exec(
    _registry: &Registry,
    context: &ExecContext,
    args: &CommandArgs,
) -> Result<String, CliError> {
    let command = args.positionals().join(" ");
    // Run inside the selected site when one was given, else the bench root.
    let cwd = match context.sites.first() {
        Some(site) => {
            let store = context.site_store();
            if !store.site_exists(site) {
                return Err(CliError::SiteNotFound(site.clone()));
            }
            store.site_dir(site)
        }
        None => context.sites_path.clone(),
    };

    let options = RunOptions {
        output: !args.flag("quiet"),
        cwd: Some(cwd),
        check: true,
        ..Default::default()
    };
    run(&command, &options)?;
    Ok(String::new())
}

fn run_doctor(
    registry: &Registry,
    context: &ExecContext,
    _args: &CommandArgs,
) -> Result<String, CliError> {
    // Scheduler state comes from the scheduler group via the forwarder.
    let scheduler = registry.forward("scheduler-status", context, &CommandArgs::empty())?;
    let store = context.site_store();
    let total = store.list_sites()?.len();
    Ok(format!("Sites configured: {}\n{}", total, scheduler))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{parse_args, Registry};
    use crate::sites::SiteStore;
    use tempfile::TempDir;

    fn bench_context(site: &str) -> (TempDir, ExecContext) {
        let temp = TempDir::new().unwrap();
        let store = SiteStore::new(temp.path());
        fs::create_dir_all(store.site_dir(site)).unwrap();
        fs::write(store.config_path(site), "{}\n").unwrap();
        let context = ExecContext {
            sites: vec![site.to_string()],
            profile: false,
            verbose: false,
            sites_path: temp.path().to_path_buf(),
        };
        (temp, context)
    }

    #[test]
    fn test_version_output() {
        let (_temp, context) = bench_context("demo");
        let registry = Registry::load();
        let out = registry
            .invoke("version", &context, &CommandArgs::empty())
            .unwrap();
        assert!(out.starts_with("anvil "));
    }

    #[test]
    fn test_backup_creates_archive() {
        let (_temp, context) = bench_context("demo");
        let registry = Registry::load();
        let out = registry
            .invoke("backup", &context, &CommandArgs::empty())
            .unwrap();
        assert!(out.contains("Backed up site demo"));

        let backups = context.sites_path.join(BACKUPS_DIR);
        let archives: Vec<_> = fs::read_dir(&backups).unwrap().collect();
        assert_eq!(archives.len(), 1);
    }

    #[test]
    fn test_exec_runs_in_site_dir() {
        let (_temp, context) = bench_context("demo");
        let registry = Registry::load();
        let spec = registry.get("exec").unwrap();
        let args = parse_args(
            spec,
            &[
                "test".to_string(),
                "-f".to_string(),
                "site_config.json".to_string(),
                "--quiet".to_string(),
            ],
        )
        .unwrap();
        assert!(registry.invoke("exec", &context, &args).is_ok());
    }

    #[test]
    fn test_exec_nonzero_exit_is_process_failed() {
        let (_temp, context) = bench_context("demo");
        let registry = Registry::load();
        let spec = registry.get("exec").unwrap();
        let args = parse_args(
            spec,
            &["exit".to_string(), "4".to_string(), "--quiet".to_string()],
        )
        .unwrap();
        match registry.invoke("exec", &context, &args) {
            Err(CliError::ProcessFailed { code, .. }) => assert_eq!(code, 4),
            other => panic!("expected ProcessFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_doctor_forwards_scheduler_status() {
        let (_temp, context) = bench_context("demo");
        let registry = Registry::load();
        let out = registry
            .invoke("doctor", &context, &CommandArgs::empty())
            .unwrap();
        assert!(out.contains("Sites configured: 1"));
        assert!(out.contains("Scheduler is disabled for site demo"));
    }
}
