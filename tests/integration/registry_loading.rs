//! Registry composition: group union, dedup, and listing coverage.

use anvil::cli::render_command_table;
use anvil::commands;
use anvil::registry::Registry;
use std::collections::HashSet;

#[test]
fn test_registry_contains_each_name_exactly_once() {
    let registry = Registry::load();
    let mut seen = HashSet::new();
    for spec in registry.iter() {
        assert!(seen.insert(spec.name), "duplicate command {}", spec.name);
    }
    assert!(!registry.is_empty());
}

#[test]
fn test_every_group_command_is_registered() {
    let registry = Registry::load();
    for group in commands::command_groups() {
        for spec in group.iter() {
            assert!(
                registry.get(spec.name).is_some(),
                "{} missing from registry",
                spec.name
            );
        }
    }
}

#[test]
fn test_all_four_groups_contribute() {
    let registry = Registry::load();
    let groups: HashSet<&str> = registry.iter().map(|spec| spec.group).collect();
    for expected in ["scheduler", "site", "translate", "utils"] {
        assert!(groups.contains(expected), "group {} missing", expected);
    }
}

#[test]
fn test_command_table_covers_registry() {
    let registry = Registry::load();
    let rendered = render_command_table(&registry);
    for spec in registry.iter() {
        assert!(rendered.contains(spec.name));
    }
}
