//! Synchronous subprocess helper.
//!
//! Spawns a child process, blocks until it terminates, and returns its exit
//! status. No timeout and no cancellation: the only way to interrupt the
//! child is an external signal handled by the operating system.

use crate::error::CliError;
use crate::profile;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tracing::debug;

/// Options for [`run`].
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Inherit the parent's stdout/stderr (true) or pipe them (false).
    pub output: bool,
    /// Working directory for the child.
    pub cwd: Option<PathBuf>,
    /// Interpret the command string through `sh -c`. When false the command
    /// is split on whitespace into program and arguments.
    pub shell: bool,
    /// Fail with `ProcessFailed` on a nonzero exit instead of returning it.
    pub check: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            output: true,
            cwd: None,
            shell: true,
            check: false,
        }
    }
}

/// Run `command` to completion and return its exit code.
///
/// With `check` set, a nonzero exit becomes `CliError::ProcessFailed`
/// carrying the exit code and the original command string. A child killed
/// by a signal reports exit code -1.
pub fn run(command: &str, options: &RunOptions) -> Result<i32, CliError> {
    let mut cmd = if options.shell {
        let mut c = Command::new("sh");
        c.arg("-c").arg(command);
        c
    } else {
        let mut parts = command.split_whitespace();
        let program = parts.next().ok_or_else(|| {
            CliError::ConfigError("empty command".to_string())
        })?;
        let mut c = Command::new(program);
        c.args(parts);
        c
    };

    if !options.output {
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
    }
    if let Some(ref cwd) = options.cwd {
        cmd.current_dir(cwd);
    }

    debug!(command, shell = options.shell, "spawning child process");

    let status = profile::scope("process::run", || {
        let mut child = cmd.spawn()?;
        child.wait().map_err(CliError::Io)
    })?;
    let code = status.code().unwrap_or(-1);

    if code != 0 && options.check {
        return Err(CliError::ProcessFailed {
            command: command.to_string(),
            code,
        });
    }

    Ok(code)
}
