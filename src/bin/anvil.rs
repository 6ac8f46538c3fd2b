//! Anvil CLI Binary
//!
//! Command-line entry point for the Anvil site tooling.

use anvil::cli::{map_error, render_command_table, Cli, RunContext};
use anvil::context::ExecContext;
use anvil::error::CliError;
use anvil::logging::{self, init_logging, LoggingConfig};
use anvil::registry::Registry;
use anvil::settings::{AnvilConfig, ConfigLoader};
use clap::Parser;
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    let config = load_config(&cli);
    let logging_config = build_logging_config(&cli, &config);

    // Initialize logging early
    if let Err(e) = init_logging(&logging_config) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("Anvil CLI starting");

    let context = ExecContext::new(
        cli.sites.clone(),
        cli.profile,
        cli.verbose,
        cli.sites_path.clone(),
        &config,
    );

    // The registry is built exactly once and passed by reference from here on.
    let registry = Registry::load();

    let Some(ref command) = cli.command else {
        println!("{}", render_command_table(&registry));
        return;
    };

    let run_context = RunContext::new(registry, context);
    match run_context.execute(command, &cli.args) {
        Ok(output) => {
            info!(command = %command, "command completed successfully");
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        // Usage convention: the missing-site hint goes to stdout, exit 1.
        Err(CliError::MissingSite) => {
            println!("{}", CliError::MissingSite);
            process::exit(1);
        }
        Err(e) => {
            error!(command = %command, "command failed: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(e.exit_code());
        }
    }
}

fn load_config(cli: &Cli) -> AnvilConfig {
    let loaded = if let Some(ref config_path) = cli.config {
        ConfigLoader::load_from_file(config_path)
    } else {
        ConfigLoader::load(&cli.sites_path)
    };
    match loaded {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    }
}

/// Build logging configuration from CLI args, environment, and config file.
/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli, config: &AnvilConfig) -> LoggingConfig {
    let mut logging = config.logging.clone();

    if cli.quiet {
        logging.level = "off".to_string();
    }
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        logging.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        logging.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        logging.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        logging.file = Some(file.clone());
    } else if logging.output == "file" && logging.file.is_none() {
        logging.file = Some(logging::default_log_file(&cli.sites_path));
    }

    logging
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_logging_config_default() {
        let cli = Cli::try_parse_from(["anvil", "version"]).unwrap();
        let config = AnvilConfig::default();
        let logging = build_logging_config(&cli, &config);
        assert_eq!(logging.level, "info");
        assert_eq!(logging.output, "stderr");
    }

    #[test]
    fn test_build_logging_config_quiet() {
        let cli = Cli::try_parse_from(["anvil", "--quiet", "version"]).unwrap();
        let logging = build_logging_config(&cli, &AnvilConfig::default());
        assert_eq!(logging.level, "off");
    }

    #[test]
    fn test_build_logging_config_verbose() {
        let cli = Cli::try_parse_from(["anvil", "--verbose", "version"]).unwrap();
        let logging = build_logging_config(&cli, &AnvilConfig::default());
        assert_eq!(logging.level, "debug");
    }

    #[test]
    fn test_build_logging_config_explicit_level_wins() {
        let cli = Cli::try_parse_from([
            "anvil",
            "--verbose",
            "--log-level",
            "warn",
            "version",
        ])
        .unwrap();
        let logging = build_logging_config(&cli, &AnvilConfig::default());
        assert_eq!(logging.level, "warn");
    }

    #[test]
    fn test_file_output_gets_default_path() {
        let cli = Cli::try_parse_from([
            "anvil",
            "--sites-path",
            "/bench",
            "--log-output",
            "file",
            "version",
        ])
        .unwrap();
        let logging = build_logging_config(&cli, &AnvilConfig::default());
        assert_eq!(
            logging.file,
            Some(std::path::PathBuf::from("/bench/logs/anvil.log"))
        );
    }
}
