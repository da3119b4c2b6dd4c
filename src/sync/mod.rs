//! Sync Module - Registry Reconciliation.
//!
//! Aligns the commands registered remotely with the local command table.
//!
//! - [`policy`]: what to do with stale and already-existing commands
//! - [`snapshot`]: the remote state, fetched once per pass
//! - [`plan`]: pure diff producing the operation list
//! - [`report`]: per-entry outcome of executing a plan
//!
//! Execution is best-effort: a failed call is recorded and the remaining
//! operations still run. Every deletion completes before the first creation
//! is issued. Cancellation stops new calls from being issued; calls already
//! in flight run to completion.

pub mod plan;
pub mod policy;
pub mod report;
pub mod snapshot;


pub use plan::{Creation, Deletion, DeletionReason, SyncPlan, plan};
pub use policy::{ExistingCommands, OldCommands, RegistrationPolicy};
pub use report::{SyncEntry, SyncOp, SyncOutcome, SyncReport};
pub use snapshot::RemoteCommandSnapshot;

use crate::commands::CommandTable;
use crate::error::RegistryError;
use crate::registry::{CommandRegistryClient, Scope};
use crate::telemetry::spans;
use futures_util::stream::{self, StreamExt};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, info, warn};

/// Reconciles a command table against one registry scope.
pub struct Synchronizer {
    client: Arc<dyn CommandRegistryClient>,
    scope: Scope,
    policy: RegistrationPolicy,
    concurrency: usize,
}

impl Synchronizer {
    pub fn new(client: Arc<dyn CommandRegistryClient>, scope: Scope) -> Self {
        Self {
            client,
            scope,
            policy: RegistrationPolicy::default(),
            concurrency: 1,
        }
    }

    pub fn with_policy(mut self, policy: RegistrationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Maximum registry calls in flight within one phase. Zero is treated
    /// as one.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn policy(&self) -> RegistrationPolicy {
        self.policy
    }

    pub async fn fetch_snapshot(&self) -> Result<RemoteCommandSnapshot, RegistryError> {
        RemoteCommandSnapshot::fetch(self.client.as_ref(), self.scope).await
    }

    /// Operations a sync of `table` against `snapshot` would issue.
    pub fn plan(&self, table: &CommandTable, snapshot: &RemoteCommandSnapshot) -> SyncPlan {
        plan(table, snapshot, self.policy)
    }

    /// Plan and execute against an already fetched snapshot.
    pub async fn synchronize(
        &self,
        table: &CommandTable,
        snapshot: &RemoteCommandSnapshot,
        cancel: &CancellationToken,
    ) -> SyncReport {
        let plan = self.plan(table, snapshot);
        self.execute(plan, cancel).await
    }

    /// Issue every operation of `plan`.
    pub async fn execute(&self, plan: SyncPlan, cancel: &CancellationToken) -> SyncReport {
        execute(self.client.as_ref(), self.scope, plan, self.concurrency, cancel)
            .instrument(spans::sync(self.scope, self.concurrency))
            .await
    }

    /// Fetch the snapshot, then synchronize.
    ///
    /// Only a failure to list the remote commands is returned as an error.
    pub async fn run(
        &self,
        table: &CommandTable,
        cancel: &CancellationToken,
    ) -> Result<SyncReport, RegistryError> {
        let snapshot = self.fetch_snapshot().await?;
        Ok(self.synchronize(table, &snapshot, cancel).await)
    }
}

/// Reconcile `table` against `snapshot` in `scope`, one call at a time.
pub async fn synchronize(
    table: &CommandTable,
    snapshot: &RemoteCommandSnapshot,
    policy: RegistrationPolicy,
    client: &dyn CommandRegistryClient,
    scope: Scope,
    cancel: &CancellationToken,
) -> SyncReport {
    let plan = plan(table, snapshot, policy);
    execute(client, scope, plan, 1, cancel)
        .instrument(spans::sync(scope, 1))
        .await
}

async fn execute(
    client: &dyn CommandRegistryClient,
    scope: Scope,
    plan: SyncPlan,
    concurrency: usize,
    cancel: &CancellationToken,
) -> SyncReport {
    info!(
        deletions = plan.deletions.len(),
        creations = plan.creations.len(),
        "Starting reconciliation"
    );

    let SyncPlan {
        deletions,
        creations,
        retained,
        skipped,
    } = plan;

    let mut report = SyncReport::new(scope);
    report.retained = retained;
    report.skipped = skipped;

    // Deletion phase. Collecting drives every deletion to completion before
    // the creation stream is built.
    let deleted: Vec<SyncEntry> = stream::iter(deletions)
        .map(|deletion| async move {
            let name = deletion.command.name.clone();
            let outcome = if cancel.is_cancelled() {
                SyncOutcome::Cancelled
            } else {
                client
                    .delete_command(scope, &deletion.command)
                    .instrument(spans::registry_op("delete", &name))
                    .await
                    .map_or_else(SyncOutcome::Failed, |()| SyncOutcome::Applied)
            };
            settle(SyncEntry {
                name,
                op: SyncOp::Delete,
                outcome,
            })
        })
        .buffered(concurrency.max(1))
        .collect()
        .await;
    report.entries.extend(deleted);

    let created: Vec<SyncEntry> = stream::iter(creations)
        .map(|creation| async move {
            let op = if creation.overwrite {
                SyncOp::Overwrite
            } else {
                SyncOp::Create
            };
            let outcome = if cancel.is_cancelled() {
                SyncOutcome::Cancelled
            } else {
                client
                    .create_command(scope, &creation.payload)
                    .instrument(spans::registry_op(op.as_str(), &creation.payload.name))
                    .await
                    .map_or_else(SyncOutcome::Failed, |_| SyncOutcome::Applied)
            };
            settle(SyncEntry {
                name: creation.payload.name,
                op,
                outcome,
            })
        })
        .buffered(concurrency.max(1))
        .collect()
        .await;
    report.entries.extend(created);

    info!(report = %report, "Reconciliation finished");
    report
}

fn settle(entry: SyncEntry) -> SyncEntry {
    crate::metrics::record_sync_operation(entry.op.as_str(), entry.outcome.as_str());
    match &entry.outcome {
        SyncOutcome::Applied => info!(command = %entry.name, op = %entry.op, "Registry operation applied"),
        SyncOutcome::Failed(e) => warn!(
            command = %entry.name,
            op = %entry.op,
            code = e.error_code(),
            error = %e,
            "Registry operation failed"
        ),
        SyncOutcome::Cancelled => debug!(command = %entry.name, op = %entry.op, "Registry operation cancelled"),
    }
    entry
}
