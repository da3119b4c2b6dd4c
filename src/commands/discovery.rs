//! Module discovery.
//!
//! Scans a [`TypeSource`] for types whose declared supertype carries the
//! command-module capability. Qualifying types that are not externally
//! visible, or whose name was already taken by an earlier type, are skipped
//! with a warning; discovery itself still succeeds.

use super::module::{Capability, ModuleDescriptor, TypeSource, Visibility};
use crate::error::DiscoveryError;
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, warn};

/// Why a command module was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The type itself is not public.
    NotPublic(Visibility),
    /// The type is public but an enclosing scope is not.
    HiddenByEnclosing,
    /// An earlier type was registered under the same name.
    DuplicateName,
}

/// Non-fatal discovery finding: a command module that cannot be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryWarning {
    pub module: String,
    pub reason: SkipReason,
}

impl fmt::Display for DiscoveryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason {
            SkipReason::NotPublic(visibility) => {
                write!(f, "command module {} is not public ({visibility:?})", self.module)
            }
            SkipReason::HiddenByEnclosing => {
                write!(f, "command module {} is nested in a non-public scope", self.module)
            }
            SkipReason::DuplicateName => {
                write!(f, "command module {} shares its name with an earlier type", self.module)
            }
        }
    }
}

/// Result of a discovery scan.
#[derive(Debug, Clone, Default)]
pub struct Discovery {
    pub modules: Vec<ModuleDescriptor>,
    pub warnings: Vec<DiscoveryWarning>,
}

/// Find every usable command module in `source`, in registration order.
pub fn discover(source: &dyn TypeSource) -> Result<Discovery, DiscoveryError> {
    let mut discovery = Discovery::default();
    let mut seen = HashSet::new();

    for entry in source.types()? {
        // The first type under a name is the one lookups resolve to.
        let first = seen.insert(entry.name.as_str());
        if !entry.has_capability(Capability::COMMAND_MODULE) {
            continue;
        }

        let reason = if !first {
            Some(SkipReason::DuplicateName)
        } else if entry.visibility != Visibility::Public {
            Some(SkipReason::NotPublic(entry.visibility))
        } else if !entry.is_externally_visible() {
            Some(SkipReason::HiddenByEnclosing)
        } else {
            None
        };

        if let Some(reason) = reason {
            let warning = DiscoveryWarning {
                module: entry.name.clone(),
                reason,
            };
            warn!(module = %entry.name, "{warning}; skipping");
            discovery.warnings.push(warning);
            continue;
        }

        debug!(module = %entry.name, "Discovered command module");
        discovery.modules.push(ModuleDescriptor {
            name: entry.name.clone(),
            visible: true,
        });
    }

    Ok(discovery)
}
