//! Command table and dispatch.
//!
//! The `CommandTable` maps command names to their definitions and tracks
//! per-command usage. It is filled once by the builder and read-only after.

use super::binder::Invocable;
use super::metadata::ParameterDescriptor;
use super::module::ModuleInfo;
use super::types::ArgValue;
use crate::error::{BuildError, HandlerError, HandlerResult};
use crate::telemetry::CommandTimer;
use slashsync_proto::CommandPayload;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use tracing::{Instrument, debug, debug_span};

/// A built command: metadata plus the bound handler.
pub struct CommandDefinition {
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) parameters: Vec<ParameterDescriptor>,
    pub(crate) invocable: Invocable,
    pub(crate) module_name: String,
    /// Introspection only; the table never keeps a module alive.
    pub(crate) module: Weak<ModuleInfo>,
}

impl CommandDefinition {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Parameters in positional-call order.
    pub fn parameters(&self) -> &[ParameterDescriptor] {
        &self.parameters
    }

    pub fn invocable(&self) -> &Invocable {
        &self.invocable
    }

    /// Name of the module that declared this command.
    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    /// The owning module, if its registration pass is still alive.
    pub fn module(&self) -> Option<Arc<ModuleInfo>> {
        self.module.upgrade()
    }

    /// Wire payload for creating this command remotely.
    pub fn to_payload(&self) -> CommandPayload {
        self.parameters
            .iter()
            .fold(CommandPayload::new(&self.name, &self.description), |payload, p| {
                payload.with_option(p.to_option())
            })
    }
}

impl fmt::Debug for CommandDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDefinition")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("parameters", &self.parameters)
            .field("module", &self.module_name)
            .finish_non_exhaustive()
    }
}

/// Commands keyed by name.
#[derive(Debug, Default)]
pub struct CommandTable {
    commands: BTreeMap<String, CommandDefinition>,
    /// Usage counters, one per command.
    usage: HashMap<String, AtomicU64>,
}

impl CommandTable {
    /// Insert a definition. An existing entry with the same name is kept.
    pub(crate) fn insert(&mut self, definition: CommandDefinition) -> Result<(), BuildError> {
        if self.commands.contains_key(&definition.name) {
            return Err(BuildError::DuplicateCommandName(definition.name));
        }
        self.usage.insert(definition.name.clone(), AtomicU64::new(0));
        self.commands.insert(definition.name.clone(), definition);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&CommandDefinition> {
        self.commands.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Command names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandDefinition> {
        self.commands.values()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Get command usage statistics, most used first.
    pub fn command_stats(&self) -> Vec<(&str, u64)> {
        let mut stats: Vec<_> = self
            .usage
            .iter()
            .map(|(cmd, count)| (cmd.as_str(), count.load(Ordering::Relaxed)))
            .filter(|(_, count)| *count > 0)
            .collect();

        stats.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        stats
    }

    /// Dispatch a command invocation to its bound handler.
    pub async fn dispatch(&self, name: &str, args: Vec<ArgValue>) -> HandlerResult {
        let Some(definition) = self.commands.get(name) else {
            // Caller-supplied names never become label values.
            crate::metrics::record_command_error(crate::metrics::UNKNOWN_COMMAND, "unknown_command");
            debug!(command = %name, "Unknown command");
            return Err(HandlerError::UnknownCommand(name.to_string()));
        };

        if let Some(counter) = self.usage.get(name) {
            counter.fetch_add(1, Ordering::Relaxed);
        }

        let span = debug_span!(
            "slash.command",
            command = %name,
            module = %definition.module_name,
            args = args.len(),
        );

        let _timer = CommandTimer::new(name);
        let result = definition.invocable.invoke(args).instrument(span).await;

        if let Err(ref e) = result {
            crate::metrics::record_command_error(name, e.error_code());
            debug!(command = %name, error = %e, "Command error");
        }

        result
    }
}
