//! Per-entry outcome of a reconciliation.

use crate::error::RegistryError;
use crate::registry::Scope;
use std::fmt;

/// Registry operation kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOp {
    Delete,
    Create,
    /// Create over a remote command of the same name.
    Overwrite,
}

impl SyncOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Delete => "delete",
            Self::Create => "create",
            Self::Overwrite => "overwrite",
        }
    }
}

impl fmt::Display for SyncOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug)]
pub enum SyncOutcome {
    Applied,
    Failed(RegistryError),
    /// Never issued: cancellation was requested first.
    Cancelled,
}

impl SyncOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Applied => "applied",
            Self::Failed(_) => "failed",
            Self::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug)]
pub struct SyncEntry {
    pub name: String,
    pub op: SyncOp,
    pub outcome: SyncOutcome,
}

/// Result of one reconciliation. Entries are in issue order, so every
/// deletion precedes every creation.
#[derive(Debug)]
pub struct SyncReport {
    pub scope: Scope,
    pub entries: Vec<SyncEntry>,
    pub retained: Vec<String>,
    pub skipped: Vec<String>,
}

impl SyncReport {
    pub fn new(scope: Scope) -> Self {
        Self {
            scope,
            entries: Vec::new(),
            retained: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub fn applied(&self) -> impl Iterator<Item = &SyncEntry> {
        self.entries
            .iter()
            .filter(|e| matches!(e.outcome, SyncOutcome::Applied))
    }

    pub fn failures(&self) -> impl Iterator<Item = (&SyncEntry, &RegistryError)> {
        self.entries.iter().filter_map(|e| match &e.outcome {
            SyncOutcome::Failed(err) => Some((e, err)),
            _ => None,
        })
    }

    pub fn cancelled(&self) -> impl Iterator<Item = &SyncEntry> {
        self.entries
            .iter()
            .filter(|e| matches!(e.outcome, SyncOutcome::Cancelled))
    }

    pub fn was_cancelled(&self) -> bool {
        self.cancelled().next().is_some()
    }

    /// Every planned operation was applied.
    pub fn is_success(&self) -> bool {
        self.entries
            .iter()
            .all(|e| matches!(e.outcome, SyncOutcome::Applied))
    }

    /// `(op, name)` pairs in issue order.
    pub fn operations(&self) -> Vec<(SyncOp, &str)> {
        self.entries.iter().map(|e| (e.op, e.name.as_str())).collect()
    }
}

impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} applied, {} failed, {} cancelled, {} retained, {} skipped",
            self.scope,
            self.applied().count(),
            self.failures().count(),
            self.cancelled().count(),
            self.retained.len(),
            self.skipped.len()
        )
    }
}
