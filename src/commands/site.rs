//! Site commands: default-site selection and site configuration access.
//!
//! Provisioning (creating or dropping sites) is out of scope; everything
//! here is file-level against the bench directory.

use crate::commands::scheduler::scheduler_enabled;
use crate::context::{first_site, ExecContext};
use crate::error::CliError;
use crate::registry::{CommandArgs, CommandSpec, OptSpec, Registry};
use comfy_table::Table;
use serde_json::Value;
use tracing::info;

const FORMAT_OPT: OptSpec = OptSpec {
    name: "format",
    takes_value: true,
    required: false,
    help: "Output format (text or json)",
};

pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "use",
        group: "site",
        about: "Record a site as the bench default",
        positionals: &["site"],
        variadic: false,
        options: &[],
        run: run_use,
    },
    CommandSpec {
        name: "list-sites",
        group: "site",
        about: "List configured sites",
        positionals: &[],
        variadic: false,
        options: &[FORMAT_OPT],
        run: run_list_sites,
    },
    CommandSpec {
        name: "show-config",
        group: "site",
        about: "Print a site's configuration",
        positionals: &[],
        variadic: false,
        options: &[],
        run: run_show_config,
    },
    CommandSpec {
        name: "set-config",
        group: "site",
        about: "Set one key in a site's configuration",
        positionals: &["key", "value"],
        variadic: false,
        options: &[],
        run: run_set_config,
    },
];

fn run_use(
    _registry: &Registry,
    context: &ExecContext,
    args: &CommandArgs,
) -> Result<String, CliError> {
    let site = args.positional(0).unwrap_or_default();
    let store = context.site_store();
    store.write_current_site(site)?;
    info!(site, "default site recorded");
    Ok(format!("Current site set to {}", site))
}

fn run_list_sites(
    _registry: &Registry,
    context: &ExecContext,
    args: &CommandArgs,
) -> Result<String, CliError> {
    let store = context.site_store();
    let sites = store.list_sites()?;
    let format = args.value("format").unwrap_or("text");

    if format == "json" {
        let rows: Vec<Value> = sites
            .iter()
            .map(|site| {
                let scheduler = store
                    .load_config(site)
                    .map(|c| scheduler_enabled(&c))
                    .unwrap_or(false);
                serde_json::json!({ "site": site, "scheduler_enabled": scheduler })
            })
            .collect();
        return Ok(serde_json::to_string_pretty(&rows)?);
    }

    if sites.is_empty() {
        return Ok("No sites configured.".to_string());
    }
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec!["Site", "Scheduler"]);
    for site in &sites {
        let scheduler = store
            .load_config(site)
            .map(|c| scheduler_enabled(&c))
            .unwrap_or(false);
        table.add_row(vec![
            site.clone(),
            if scheduler { "enabled" } else { "disabled" }.to_string(),
        ]);
    }
    Ok(table.to_string())
}

fn run_show_config(
    _registry: &Registry,
    context: &ExecContext,
    _args: &CommandArgs,
) -> Result<String, CliError> {
    let site = first_site(context)?;
    let config = context.site_store().load_config(site)?;
    Ok(serde_json::to_string_pretty(&Value::Object(config))?)
}

fn run_set_config(
    _registry: &Registry,
    context: &ExecContext,
    args: &CommandArgs,
) -> Result<String, CliError> {
    let site = first_site(context)?;
    let key = args.positional(0).unwrap_or_default();
    let raw = args.positional(1).unwrap_or_default();
    // Store JSON scalars as their parsed form, anything else as a string.
    let value = serde_json::from_str::<Value>(raw).unwrap_or(Value::String(raw.to_string()));
    context.site_store().update_config(site, key, value)?;
    Ok(format!("Set {} for site {}", key, site))
}
