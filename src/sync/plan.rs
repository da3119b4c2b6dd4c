//! Reconciliation planning.
//!
//! [`plan`] is pure: it decides every registry operation up front from the
//! local table, the remote snapshot and the policy. Executing the plan is
//! left to the synchronizer.

use super::policy::{ExistingCommands, OldCommands, RegistrationPolicy};
use super::snapshot::RemoteCommandSnapshot;
use crate::commands::CommandTable;
use slashsync_proto::{CommandPayload, RemoteCommand};
use std::collections::HashSet;
use std::fmt;

/// Why a remote command is scheduled for deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletionReason {
    /// The policy wipes the scope.
    Wipe,
    /// No local command has this name.
    Unused,
}

#[derive(Debug, Clone)]
pub struct Deletion {
    pub command: RemoteCommand,
    pub reason: DeletionReason,
}

#[derive(Debug, Clone)]
pub struct Creation {
    pub payload: CommandPayload,
    /// A remote command of the same name survives the deletion phase and
    /// will be replaced.
    pub overwrite: bool,
}

/// Every operation one reconciliation will issue, by phase.
#[derive(Debug, Clone, Default)]
pub struct SyncPlan {
    pub deletions: Vec<Deletion>,
    pub creations: Vec<Creation>,
    /// Remote commands left untouched by the deletion phase.
    pub retained: Vec<String>,
    /// Local commands not created because they already exist remotely.
    pub skipped: Vec<String>,
}

impl SyncPlan {
    /// Number of registry writes the plan issues.
    pub fn operation_count(&self) -> usize {
        self.deletions.len() + self.creations.len()
    }

    pub fn is_noop(&self) -> bool {
        self.operation_count() == 0
    }
}

impl fmt::Display for SyncPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} delete, {} create, {} retained, {} skipped",
            self.deletions.len(),
            self.creations.len(),
            self.retained.len(),
            self.skipped.len()
        )
    }
}

/// Decide the operations aligning `snapshot` with `table` under `policy`.
///
/// Deletions come from the snapshot in registry order; creations follow the
/// table's name order. A remote command only counts as existing for the
/// creation phase if the deletion phase keeps it.
pub fn plan(
    table: &CommandTable,
    snapshot: &RemoteCommandSnapshot,
    policy: RegistrationPolicy,
) -> SyncPlan {
    let mut out = SyncPlan::default();
    let mut surviving: HashSet<&str> = HashSet::new();

    for remote in snapshot.commands() {
        let reason = match policy.old_commands {
            OldCommands::Wipe => Some(DeletionReason::Wipe),
            OldCommands::DeleteUnused if !table.contains(&remote.name) => {
                Some(DeletionReason::Unused)
            }
            _ => None,
        };

        match reason {
            Some(reason) => out.deletions.push(Deletion {
                command: remote.clone(),
                reason,
            }),
            None => {
                surviving.insert(remote.name.as_str());
                out.retained.push(remote.name.clone());
            }
        }
    }

    for definition in table.iter() {
        let exists = surviving.contains(definition.name());
        if exists && policy.existing_commands == ExistingCommands::KeepExisting {
            out.skipped.push(definition.name().to_string());
            continue;
        }
        out.creations.push(Creation {
            payload: definition.to_payload(),
            overwrite: exists,
        });
    }

    out
}
