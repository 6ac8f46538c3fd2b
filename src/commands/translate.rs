//! Translation commands: install and list per-site translation catalogs.
//!
//! Catalogs are `source,translated` CSV files kept under the site's
//! `translations/` directory. Building message catalogs from application
//! code belongs to the framework and is not done here.

use crate::context::{first_site, ExecContext};
use crate::error::CliError;
use crate::profile;
use crate::registry::{CommandArgs, CommandSpec, OptSpec, Registry};
use comfy_table::Table;
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// Subdirectory of a site holding translation catalogs.
pub const TRANSLATIONS_DIR: &str = "translations";

pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "import-translations",
        group: "translate",
        about: "Install a translation catalog for a site",
        positionals: &["lang", "path"],
        variadic: false,
        options: &[OptSpec {
            name: "force",
            takes_value: false,
            required: false,
            help: "Overwrite an existing catalog without confirmation",
        }],
        run: run_import,
    },
    CommandSpec {
        name: "list-languages",
        group: "translate",
        about: "List installed translation catalogs for a site",
        positionals: &[],
        variadic: false,
        options: &[OptSpec {
            name: "format",
            takes_value: true,
            required: false,
            help: "Output format (text or json)",
        }],
        run: run_list,
    },
];

/// Parse catalog lines, returning the entry count.
/// Every non-empty line must be `source,translated`.
fn validate_catalog(raw: &str) -> Result<usize, CliError> {
    let mut entries = 0;
    for (idx, line) in raw.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        if !line.contains(',') {
            return Err(CliError::ConfigError(format!(
                "invalid catalog line {}: expected `source,translated`",
                idx + 1
            )));
        }
        entries += 1;
    }
    Ok(entries)
}

fn catalog_dir(context: &ExecContext, site: &str) -> PathBuf {
    context.site_store().site_dir(site).join(TRANSLATIONS_DIR)
}

fn run_import(
    _registry: &Registry,
    context: &ExecContext,
    args: &CommandArgs,
) -> Result<String, CliError> {
    let site = first_site(context)?;
    let store = context.site_store();
    if !store.site_exists(site) {
        return Err(CliError::SiteNotFound(site.to_string()));
    }

    let lang = args.positional(0).unwrap_or_default();
    let source = PathBuf::from(args.positional(1).unwrap_or_default());

    let raw = fs::read_to_string(&source)?;
    let entries = profile::scope("translate::validate", || validate_catalog(&raw))?;

    let dir = catalog_dir(context, site);
    let target = dir.join(format!("{}.csv", lang));

    if target.exists() && !args.flag("force") {
        use dialoguer::Confirm;
        let confirmed = Confirm::new()
            .with_prompt(format!("Overwrite existing catalog '{}'?", lang))
            .interact()
            .map_err(|e| CliError::ConfigError(format!("Failed to get user input: {}", e)))?;
        if !confirmed {
            return Ok("Import cancelled".to_string());
        }
    }

    fs::create_dir_all(&dir)?;
    fs::write(&target, raw)?;
    info!(site, lang, entries, "translation catalog installed");
    Ok(format!(
        "Imported {} entries for language {} into site {}",
        entries, lang, site
    ))
}

fn run_list(
    _registry: &Registry,
    context: &ExecContext,
    args: &CommandArgs,
) -> Result<String, CliError> {
    let site = first_site(context)?;
    let store = context.site_store();
    if !store.site_exists(site) {
        return Err(CliError::SiteNotFound(site.to_string()));
    }

    let dir = catalog_dir(context, site);
    let mut rows: Vec<(String, usize)> = Vec::new();
    if dir.is_dir() {
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("csv") {
                continue;
            }
            let lang = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default()
                .to_string();
            let entries = validate_catalog(&fs::read_to_string(&path)?).unwrap_or(0);
            rows.push((lang, entries));
        }
    }
    rows.sort();

    if args.value("format") == Some("json") {
        let out: Vec<serde_json::Value> = rows
            .iter()
            .map(|(lang, entries)| serde_json::json!({ "lang": lang, "entries": entries }))
            .collect();
        return Ok(serde_json::to_string_pretty(&out)?);
    }

    if rows.is_empty() {
        return Ok(format!("No translations installed for site {}.", site));
    }
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec!["Language", "Entries"]);
    for (lang, entries) in &rows {
        table.add_row(vec![lang.clone(), entries.to_string()]);
    }
    Ok(table.to_string())
}
