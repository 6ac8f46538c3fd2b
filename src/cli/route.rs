//! CLI route: run context dispatching through the command registry.

use crate::context::ExecContext;
use crate::error::CliError;
use crate::profile;
use crate::registry::{parse_args, Registry};
use tracing::info;

/// Runtime context for CLI execution: the loaded registry plus the
/// per-invocation execution context. Built once by the binary entry point.
pub struct RunContext {
    registry: Registry,
    context: ExecContext,
}

impl RunContext {
    pub fn new(registry: Registry, context: ExecContext) -> Self {
        Self { registry, context }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn context(&self) -> &ExecContext {
        &self.context
    }

    /// Execute one command: resolve the descriptor, parse its arguments,
    /// and run the handler under the profiling wrapper. With `--profile`
    /// the report is printed after the handler finishes, on success and
    /// failure alike; the handler's result passes through unchanged.
    pub fn execute(&self, name: &str, raw_args: &[String]) -> Result<String, CliError> {
        let spec = self
            .registry
            .get(name)
            .ok_or_else(|| CliError::UnknownCommand(name.to_string()))?;
        let args = parse_args(spec, raw_args)?;

        info!(command = name, "dispatching command");
        profile::profiled(self.context.profile, name, || {
            (spec.run)(&self.registry, &self.context, &args)
        })
    }
}
