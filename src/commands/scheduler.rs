//! Scheduler commands: toggle and report the per-site scheduler flag.

use crate::context::{first_site, ExecContext};
use crate::error::CliError;
use crate::registry::{CommandArgs, CommandSpec, Registry};
use serde_json::json;
use tracing::info;

/// Site config key holding the scheduler state. Absent reads as disabled.
pub const SCHEDULER_KEY: &str = "scheduler_enabled";

pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "enable-scheduler",
        group: "scheduler",
        about: "Enable the background scheduler for a site",
        positionals: &[],
        variadic: false,
        options: &[],
        run: run_enable,
    },
    CommandSpec {
        name: "disable-scheduler",
        group: "scheduler",
        about: "Disable the background scheduler for a site",
        positionals: &[],
        variadic: false,
        options: &[],
        run: run_disable,
    },
    CommandSpec {
        name: "scheduler-status",
        group: "scheduler",
        about: "Show whether the scheduler is enabled for a site",
        positionals: &[],
        variadic: false,
        options: &[],
        run: run_status,
    },
];

fn set_scheduler(context: &ExecContext, enabled: bool) -> Result<String, CliError> {
    let site = first_site(context)?;
    let store = context.site_store();
    store.update_config(site, SCHEDULER_KEY, json!(enabled))?;
    info!(site, enabled, "scheduler flag updated");
    Ok(format!(
        "Scheduler {} for site {}",
        if enabled { "enabled" } else { "disabled" },
        site
    ))
}

fn run_enable(
    _registry: &Registry,
    context: &ExecContext,
    _args: &CommandArgs,
) -> Result<String, CliError> {
    set_scheduler(context, true)
}

fn run_disable(
    _registry: &Registry,
    context: &ExecContext,
    _args: &CommandArgs,
) -> Result<String, CliError> {
    set_scheduler(context, false)
}

fn run_status(
    _registry: &Registry,
    context: &ExecContext,
    _args: &CommandArgs,
) -> Result<String, CliError> {
    let site = first_site(context)?;
    let store = context.site_store();
    let config = store.load_config(site)?;
    let enabled = scheduler_enabled(&config);
    Ok(format!(
        "Scheduler is {} for site {}",
        if enabled { "enabled" } else { "disabled" },
        site
    ))
}

/// Read the scheduler flag from a loaded site config.
pub fn scheduler_enabled(config: &serde_json::Map<String, serde_json::Value>) -> bool {
    config
        .get(SCHEDULER_KEY)
        .and_then(|v| v.as_bool())
        .unwrap_or(false)
}
