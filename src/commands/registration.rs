//! One registration pass: discover, instantiate, build.

use super::builder::{BuildFailure, build, instantiate};
use super::discovery::{DiscoveryWarning, discover};
use super::module::{ModuleInfo, TypeSource};
use super::table::CommandTable;
use crate::error::DiscoveryError;
use std::sync::Arc;
use tracing::info;

/// Everything a registration pass produces.
///
/// `modules` owns the module instances; command definitions only hold weak
/// references back to them.
#[derive(Debug)]
pub struct Registration {
    pub table: CommandTable,
    pub modules: Vec<Arc<ModuleInfo>>,
    pub warnings: Vec<DiscoveryWarning>,
    pub failures: Vec<BuildFailure>,
}

impl Registration {
    /// Run discovery and build over `source`.
    ///
    /// Only a structural scan failure is returned as an error; everything
    /// else is collected in `warnings` and `failures`.
    pub fn run(source: &dyn TypeSource) -> Result<Self, DiscoveryError> {
        let discovery = discover(source)?;
        let (modules, mut failures) = instantiate(source, &discovery.modules);
        let mut report = build(&discovery.modules, &modules);
        failures.append(&mut report.failures);

        info!(
            modules = modules.len(),
            commands = report.table.len(),
            warnings = discovery.warnings.len(),
            failures = failures.len(),
            "Registration pass complete"
        );

        Ok(Self {
            table: report.table,
            modules,
            warnings: discovery.warnings,
            failures,
        })
    }

    /// No warnings and no failures.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty() && self.failures.is_empty()
    }
}
