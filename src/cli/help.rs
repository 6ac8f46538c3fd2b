//! CLI help: grouped command listing shown when no command is given.

use crate::registry::Registry;
use comfy_table::Table;
use owo_colors::OwoColorize;

/// Render the registered commands as a grouped table.
/// Registry iteration is unordered; rows are sorted here for display only.
pub fn render_command_table(registry: &Registry) -> String {
    let mut rows: Vec<(&str, String, &str)> = registry
        .iter()
        .map(|spec| (spec.group, spec.usage(), spec.about))
        .collect();
    rows.sort();

    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec!["Group", "Usage", "Description"]);
    for (group, usage, about) in rows {
        table.add_row(vec![group.to_string(), usage, about.to_string()]);
    }

    format!(
        "{}\n{}\nGlobal options: --site <name> --profile --sites-path <dir>",
        "Available commands".bold(),
        table
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_lists_every_registered_command() {
        let registry = Registry::load();
        let rendered = render_command_table(&registry);
        for spec in registry.iter() {
            assert!(rendered.contains(spec.name), "missing {}", spec.name);
        }
    }
}
