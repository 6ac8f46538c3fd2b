//! Error types for the Anvil site CLI.

use thiserror::Error;

/// CLI-level errors surfaced to the dispatcher.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Please specify --site <name>")]
    MissingSite,

    #[error("Site not found: {0}")]
    SiteNotFound(String),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Unknown option for `{command}`: --{option}")]
    UnknownOption { command: String, option: String },

    #[error("Missing argument for `{command}`: {name}")]
    MissingArgument { command: String, name: String },

    #[error("Unexpected argument for `{command}`: {value}")]
    UnexpectedArgument { command: String, value: String },

    #[error("Cannot forward to `{target}`: {detail}")]
    ForwardMismatch { target: String, detail: String },

    #[error("Command `{command}` exited with code {code}")]
    ProcessFailed { command: String, code: i32 },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<config::ConfigError> for CliError {
    fn from(err: config::ConfigError) -> Self {
        CliError::ConfigError(err.to_string())
    }
}

impl CliError {
    /// Process exit status for this error. Usage errors exit 1; a failed
    /// child process propagates its own exit code.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::ProcessFailed { code, .. } if *code > 0 => *code,
            _ => 1,
        }
    }
}
