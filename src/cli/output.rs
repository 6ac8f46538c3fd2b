//! CLI output: error mapping from CLI errors to the terminal surface.

use crate::error::CliError;
use owo_colors::OwoColorize;

/// Map an error to a string for terminal display.
/// Keeps the dispatcher thin; extend with stable categories if needed.
pub fn map_error(e: &CliError) -> String {
    format!("{} {}", "error:".red(), e)
}
