//! Command table construction.
//!
//! Turns discovered modules into a [`CommandTable`]. Failures are collected
//! in the [`BuildReport`] and abort only the smallest affected unit:
//!
//! - a method with two or more command markers aborts its whole module,
//!   before any of that module's commands are inserted;
//! - a bad parameter, an unsupported type, a binding failure or an invalid
//!   definition drops that one command;
//! - a name collision rejects the later definition and keeps the first.

use super::metadata::{CommandMarker, MethodSignature, extract};
use super::module::{ModuleDescriptor, ModuleInfo, TypeSource};
use super::table::{CommandDefinition, CommandTable};
use crate::error::BuildError;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// One failed unit of a build.
#[derive(Debug)]
pub struct BuildFailure {
    pub module: String,
    /// `None` when the whole module failed before method scanning.
    pub method: Option<String>,
    pub error: BuildError,
}

impl fmt::Display for BuildFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.method {
            Some(method) => write!(f, "{}::{}: {}", self.module, method, self.error),
            None => write!(f, "{}: {}", self.module, self.error),
        }
    }
}

/// Output of a build: the table plus every failure encountered.
#[derive(Debug, Default)]
pub struct BuildReport {
    pub table: CommandTable,
    pub failures: Vec<BuildFailure>,
}

impl BuildReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Construct one instance per discovered module.
///
/// Modules that cannot be constructed are reported and left out.
pub fn instantiate(
    source: &dyn TypeSource,
    descriptors: &[ModuleDescriptor],
) -> (Vec<Arc<ModuleInfo>>, Vec<BuildFailure>) {
    let mut modules = Vec::with_capacity(descriptors.len());
    let mut failures = Vec::new();

    for descriptor in descriptors {
        let Some(entry) = source.find(&descriptor.name) else {
            warn!(module = %descriptor.name, "Discovered module vanished from type source");
            continue;
        };
        match ModuleInfo::instantiate(descriptor.clone(), entry) {
            Ok(info) => modules.push(Arc::new(info)),
            Err(error) => {
                warn!(module = %descriptor.name, error = %error, "Module instantiation failed");
                failures.push(BuildFailure {
                    module: descriptor.name.clone(),
                    method: None,
                    error,
                });
            }
        }
    }

    (modules, failures)
}

/// Build the command table from discovered modules and their instances.
///
/// Descriptors without a matching instance are skipped.
pub fn build(descriptors: &[ModuleDescriptor], instances: &[Arc<ModuleInfo>]) -> BuildReport {
    let mut report = BuildReport::default();

    for descriptor in descriptors {
        let Some(module) = instances.iter().find(|m| m.name() == descriptor.name) else {
            debug!(module = %descriptor.name, "No instance for module; skipping");
            continue;
        };
        build_module(module, &mut report);
    }

    info!(
        commands = report.table.len(),
        failures = report.failures.len(),
        "Built command table"
    );
    report
}

fn build_module(module: &Arc<ModuleInfo>, report: &mut BuildReport) {
    let signatures = module.object().signatures();

    let contradictory: Vec<&MethodSignature> = signatures
        .iter()
        .copied()
        .filter(|s| s.markers.len() > 1)
        .collect();
    if !contradictory.is_empty() {
        for signature in contradictory {
            let error = BuildError::DuplicateCommandMarker {
                method: signature.name.clone(),
                count: signature.markers.len(),
            };
            warn!(module = %module.name(), method = %signature.name, "{error}; module rejected");
            report.failures.push(BuildFailure {
                module: module.name().to_string(),
                method: Some(signature.name.clone()),
                error,
            });
        }
        return;
    }

    for (index, signature) in signatures.iter().enumerate() {
        let [marker] = signature.markers.as_slice() else {
            continue;
        };

        let outcome = define(module, index, signature, marker)
            .and_then(|definition| report.table.insert(definition));

        match outcome {
            Ok(()) => debug!(module = %module.name(), command = %marker.name, "Registered command"),
            Err(error) => {
                warn!(
                    module = %module.name(),
                    method = %signature.name,
                    error = %error,
                    "Command rejected"
                );
                report.failures.push(BuildFailure {
                    module: module.name().to_string(),
                    method: Some(signature.name.clone()),
                    error,
                });
            }
        }
    }
}

fn define(
    module: &Arc<ModuleInfo>,
    index: usize,
    signature: &MethodSignature,
    marker: &CommandMarker,
) -> Result<CommandDefinition, BuildError> {
    let parameters = extract(signature)?;
    let invocable = module.object().bind(index)?;

    let definition = CommandDefinition {
        name: marker.name.clone(),
        description: marker.description.clone(),
        parameters,
        invocable,
        module_name: module.name().to_string(),
        module: Arc::downgrade(module),
    };

    definition
        .to_payload()
        .validate()
        .map_err(|source| BuildError::InvalidDefinition {
            command: marker.name.clone(),
            source,
        })?;

    Ok(definition)
}
