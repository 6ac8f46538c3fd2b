//! Command registry: descriptors, argument parsing, and forwarding.
//!
//! The registry is built once by [`Registry::load`] as the union of the four
//! sibling command groups, deduplicated by command name, and passed by
//! reference to the dispatcher. Iteration order is not a contract.

use crate::context::ExecContext;
use crate::error::CliError;
use std::collections::HashMap;

/// Handler signature shared by every registered command.
pub type Handler = fn(&Registry, &ExecContext, &CommandArgs) -> Result<String, CliError>;

/// One accepted option of a command.
#[derive(Debug, Clone, Copy)]
pub struct OptSpec {
    pub name: &'static str,
    /// Takes a value (`--name value`) rather than acting as a flag.
    pub takes_value: bool,
    pub required: bool,
    pub help: &'static str,
}

/// A registered subcommand. Identity is the `name` field: two specs with
/// the same name collapse to one in the registry.
#[derive(Debug, Clone, Copy)]
pub struct CommandSpec {
    pub name: &'static str,
    pub group: &'static str,
    pub about: &'static str,
    /// Required positional parameters, in order.
    pub positionals: &'static [&'static str],
    /// Accept extra positionals beyond the named ones.
    pub variadic: bool,
    pub options: &'static [OptSpec],
    pub run: Handler,
}

impl CommandSpec {
    fn option(&self, name: &str) -> Option<&OptSpec> {
        self.options.iter().find(|o| o.name == name)
    }

    /// One-line usage string for listings and error hints.
    pub fn usage(&self) -> String {
        let mut usage = self.name.to_string();
        for pos in self.positionals {
            usage.push_str(&format!(" <{}>", pos));
        }
        if self.variadic {
            usage.push_str(" [...]");
        }
        for opt in self.options {
            let rendered = if opt.takes_value {
                format!("--{} <value>", opt.name)
            } else {
                format!("--{}", opt.name)
            };
            if opt.required {
                usage.push_str(&format!(" {}", rendered));
            } else {
                usage.push_str(&format!(" [{}]", rendered));
            }
        }
        usage
    }
}

/// Arguments parsed against one command's spec.
#[derive(Debug, Clone, Default)]
pub struct CommandArgs {
    positionals: Vec<String>,
    flags: Vec<String>,
    values: HashMap<String, String>,
}

impl CommandArgs {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn positionals(&self) -> &[String] {
        &self.positionals
    }

    pub fn positional(&self, index: usize) -> Option<&str> {
        self.positionals.get(index).map(|s| s.as_str())
    }

    pub fn flag(&self, name: &str) -> bool {
        self.flags.iter().any(|f| f == name)
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(|s| s.as_str())
    }

    fn option_names(&self) -> impl Iterator<Item = &str> {
        self.flags
            .iter()
            .map(|f| f.as_str())
            .chain(self.values.keys().map(|k| k.as_str()))
    }
}

/// Parse raw tokens against `spec`.
///
/// Recognizes `--name` flags, `--name value` options, and positionals.
/// Unknown options, missing required options or positionals, and extra
/// positionals (unless the spec is variadic) are typed errors.
pub fn parse_args(spec: &CommandSpec, raw: &[String]) -> Result<CommandArgs, CliError> {
    let mut args = CommandArgs::default();
    let mut tokens = raw.iter().peekable();

    while let Some(token) = tokens.next() {
        if let Some(name) = token.strip_prefix("--") {
            let opt = spec.option(name).ok_or_else(|| CliError::UnknownOption {
                command: spec.name.to_string(),
                option: name.to_string(),
            })?;
            if opt.takes_value {
                let value = tokens.next().ok_or_else(|| CliError::MissingArgument {
                    command: spec.name.to_string(),
                    name: format!("--{} <value>", opt.name),
                })?;
                args.values.insert(opt.name.to_string(), value.clone());
            } else {
                args.flags.push(opt.name.to_string());
            }
        } else {
            args.positionals.push(token.clone());
        }
    }

    if args.positionals.len() < spec.positionals.len() {
        let name = spec.positionals[args.positionals.len()];
        return Err(CliError::MissingArgument {
            command: spec.name.to_string(),
            name: name.to_string(),
        });
    }
    if !spec.variadic && args.positionals.len() > spec.positionals.len() {
        return Err(CliError::UnexpectedArgument {
            command: spec.name.to_string(),
            value: args.positionals[spec.positionals.len()].clone(),
        });
    }
    for opt in spec.options {
        if opt.required && !args.flags.iter().any(|f| f == opt.name) && !args.values.contains_key(opt.name) {
            return Err(CliError::MissingArgument {
                command: spec.name.to_string(),
                name: format!("--{}", opt.name),
            });
        }
    }

    Ok(args)
}

/// Immutable registry of all exposed commands.
pub struct Registry {
    commands: HashMap<&'static str, CommandSpec>,
}

impl Registry {
    /// Build the registry from the four sibling command groups.
    pub fn load() -> Self {
        Self::from_groups(crate::commands::command_groups())
    }

    /// Union the given groups, deduplicating by command name.
    pub fn from_groups(groups: &[&'static [CommandSpec]]) -> Self {
        let mut commands = HashMap::new();
        for group in groups {
            for spec in group.iter() {
                // First registration of a name wins; later duplicates collapse.
                commands.entry(spec.name).or_insert(*spec);
            }
        }
        Self { commands }
    }

    pub fn get(&self, name: &str) -> Option<&CommandSpec> {
        self.commands.get(name)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// All registered specs. Unordered.
    pub fn iter(&self) -> impl Iterator<Item = &CommandSpec> {
        self.commands.values()
    }

    /// Dispatch `name` with already-parsed arguments.
    pub fn invoke(
        &self,
        name: &str,
        context: &ExecContext,
        args: &CommandArgs,
    ) -> Result<String, CliError> {
        let spec = self
            .get(name)
            .ok_or_else(|| CliError::UnknownCommand(name.to_string()))?;
        (spec.run)(self, context, args)
    }

    /// Forward execution to another command, reusing parsed arguments.
    ///
    /// The reused arguments are validated against the target's declared
    /// options and positional arity; a mismatch is an error rather than
    /// silent passthrough.
    pub fn forward(
        &self,
        target: &str,
        context: &ExecContext,
        args: &CommandArgs,
    ) -> Result<String, CliError> {
        let spec = self
            .get(target)
            .ok_or_else(|| CliError::UnknownCommand(target.to_string()))?;

        for name in args.option_names() {
            if spec.option(name).is_none() {
                return Err(CliError::ForwardMismatch {
                    target: target.to_string(),
                    detail: format!("target does not accept --{}", name),
                });
            }
        }
        if args.positionals.len() < spec.positionals.len()
            || (!spec.variadic && args.positionals.len() > spec.positionals.len())
        {
            return Err(CliError::ForwardMismatch {
                target: target.to_string(),
                detail: format!(
                    "target expects {} positional argument(s), got {}",
                    spec.positionals.len(),
                    args.positionals.len()
                ),
            });
        }

        (spec.run)(self, context, args)
    }
}
