//! Property-based tests for site resolution and argument parsing.

use anvil::context::{first_site, ExecContext};
use anvil::error::CliError;
use proptest::prelude::*;
use std::path::PathBuf;

fn context_with_sites(sites: Vec<String>) -> ExecContext {
    ExecContext {
        sites,
        profile: false,
        verbose: false,
        sites_path: PathBuf::from("."),
    }
}

/// Any non-empty site list resolves to its first element, unchanged.
#[test]
fn test_first_site_identity_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &proptest::collection::vec("[a-z][a-z0-9.-]{0,20}", 1..8),
            |sites| {
                let ctx = context_with_sites(sites.clone());
                let resolved = first_site(&ctx).expect("non-empty sites must resolve");
                assert_eq!(resolved, sites[0]);
                Ok(())
            },
        )
        .unwrap();
}

/// Empty site lists always fail with MissingSite, never some other error.
#[test]
fn test_empty_sites_always_missing_site() {
    let ctx = context_with_sites(vec![]);
    assert!(matches!(first_site(&ctx), Err(CliError::MissingSite)));
}

/// Resolution never mutates the context's site list.
#[test]
fn test_first_site_does_not_consume_sites() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &proptest::collection::vec("[a-z]{1,10}", 1..5),
            |sites| {
                let ctx = context_with_sites(sites.clone());
                let _ = first_site(&ctx);
                let _ = first_site(&ctx);
                assert_eq!(ctx.sites, sites);
                Ok(())
            },
        )
        .unwrap();
}
