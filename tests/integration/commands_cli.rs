//! End-to-end command dispatch through RunContext.
//!
//! Covers scheduler toggling, site selection and configuration, translation
//! import, doctor forwarding, and the error surface of the dispatcher.

use anvil::cli::RunContext;
use anvil::error::CliError;
use anvil::registry::Registry;
use std::fs;

use crate::integration::test_utils::{exec_context, temp_bench};

fn run_context(root: &std::path::Path, sites: &[&str], profile: bool) -> RunContext {
    RunContext::new(Registry::load(), exec_context(root, sites, profile))
}

#[test]
fn test_scheduler_enable_disable_status() {
    let bench = temp_bench(&["demo"]);
    let rc = run_context(bench.path(), &["demo"], false);

    let out = rc.execute("enable-scheduler", &[]).unwrap();
    assert_eq!(out, "Scheduler enabled for site demo");
    let out = rc.execute("scheduler-status", &[]).unwrap();
    assert_eq!(out, "Scheduler is enabled for site demo");

    rc.execute("disable-scheduler", &[]).unwrap();
    let out = rc.execute("scheduler-status", &[]).unwrap();
    assert_eq!(out, "Scheduler is disabled for site demo");
}

#[test]
fn test_missing_site_never_returns_a_value() {
    let bench = temp_bench(&["demo"]);
    let rc = run_context(bench.path(), &[], false);
    for command in ["scheduler-status", "show-config", "backup"] {
        match rc.execute(command, &[]) {
            Err(CliError::MissingSite) => {}
            other => panic!("{} should need a site, got {:?}", command, other),
        }
    }
}

#[test]
fn test_use_then_list_sites() {
    let bench = temp_bench(&["alpha", "beta"]);
    let rc = run_context(bench.path(), &[], false);

    rc.execute("use", &["beta".to_string()]).unwrap();
    let recorded = fs::read_to_string(bench.path().join("currentsite.txt")).unwrap();
    assert_eq!(recorded.trim(), "beta");

    let listed = rc
        .execute(
            "list-sites",
            &["--format".to_string(), "json".to_string()],
        )
        .unwrap();
    let parsed: Vec<serde_json::Value> = serde_json::from_str(&listed).unwrap();
    assert_eq!(parsed.len(), 2);
}

#[test]
fn test_set_config_show_config_round_trip() {
    let bench = temp_bench(&["demo"]);
    let rc = run_context(bench.path(), &["demo"], false);

    rc.execute(
        "set-config",
        &["maintenance_mode".to_string(), "true".to_string()],
    )
    .unwrap();
    let shown = rc.execute("show-config", &[]).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&shown).unwrap();
    assert_eq!(parsed["maintenance_mode"], serde_json::json!(true));
}

#[test]
fn test_import_translations_and_list() {
    let bench = temp_bench(&["demo"]);
    let csv = bench.path().join("de.csv");
    fs::write(&csv, "hello,hallo\nworld,welt\n").unwrap();

    let rc = run_context(bench.path(), &["demo"], false);
    let out = rc
        .execute(
            "import-translations",
            &[
                "de".to_string(),
                csv.to_string_lossy().to_string(),
                "--force".to_string(),
            ],
        )
        .unwrap();
    assert!(out.contains("2 entries"));

    let listed = rc
        .execute(
            "list-languages",
            &["--format".to_string(), "json".to_string()],
        )
        .unwrap();
    assert!(listed.contains("\"de\""));
}

#[test]
fn test_doctor_forwards_to_scheduler_status() {
    let bench = temp_bench(&["demo"]);
    let rc = run_context(bench.path(), &["demo"], false);
    let out = rc.execute("doctor", &[]).unwrap();
    assert!(out.contains("Sites configured: 1"));
    assert!(out.contains("Scheduler is disabled for site demo"));
}

#[test]
fn test_profiled_execution_is_transparent() {
    let bench = temp_bench(&["demo"]);
    let rc = run_context(bench.path(), &["demo"], true);
    // Same output with profiling on; the report goes to stdout separately.
    let out = rc.execute("scheduler-status", &[]).unwrap();
    assert_eq!(out, "Scheduler is disabled for site demo");
}

#[test]
fn test_profiled_failure_still_propagates() {
    let bench = temp_bench(&["demo"]);
    let rc = run_context(bench.path(), &["ghost"], true);
    assert!(matches!(
        rc.execute("scheduler-status", &[]),
        Err(CliError::SiteNotFound(_))
    ));
}

#[test]
fn test_exec_propagates_child_exit_code() {
    let bench = temp_bench(&["demo"]);
    let rc = run_context(bench.path(), &["demo"], false);
    match rc.execute(
        "exec",
        &["exit".to_string(), "7".to_string(), "--quiet".to_string()],
    ) {
        Err(e @ CliError::ProcessFailed { .. }) => assert_eq!(e.exit_code(), 7),
        other => panic!("expected ProcessFailed, got {:?}", other),
    }
}

#[test]
fn test_unknown_command_and_bad_option() {
    let bench = temp_bench(&["demo"]);
    let rc = run_context(bench.path(), &["demo"], false);
    assert!(matches!(
        rc.execute("provision-site", &[]),
        Err(CliError::UnknownCommand(_))
    ));
    assert!(matches!(
        rc.execute("scheduler-status", &["--format".to_string()]),
        Err(CliError::UnknownOption { .. })
    ));
}
