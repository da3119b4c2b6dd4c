//! Integration tests for registry reconciliation.

mod common;

use common::{Event, RecordingRegistry, SCOPE, fixture_universe};
use slashsync::commands::Registration;
use slashsync::sync::{
    ExistingCommands, OldCommands, RegistrationPolicy, SyncOp, Synchronizer,
};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

fn local() -> Registration {
    Registration::run(&fixture_universe()).unwrap()
}

#[tokio::test]
async fn test_remote_converges_to_local_table() {
    let registration = local();
    let registry = Arc::new(RecordingRegistry::new().seeded(&["hello", "legacy", "old_help"]));

    let sync = Synchronizer::new(registry.clone(), SCOPE);
    let report = sync.run(&registration.table, &CancellationToken::new()).await.unwrap();

    assert!(report.is_success(), "{report}");
    assert_eq!(
        registry.sorted_names(),
        vec!["explode", "fail", "hello", "shout"]
    );
    let ops = report.operations();
    assert!(ops.contains(&(SyncOp::Overwrite, "hello")));
    assert!(ops.contains(&(SyncOp::Delete, "legacy")));
    assert!(ops.contains(&(SyncOp::Delete, "old_help")));

    // A second pass that keeps existing commands has nothing to do.
    let again = Synchronizer::new(registry.clone(), SCOPE)
        .with_policy(RegistrationPolicy::new(OldCommands::DeleteUnused, ExistingCommands::KeepExisting));
    let report = again.run(&registration.table, &CancellationToken::new()).await.unwrap();
    assert!(report.entries.is_empty());
    assert_eq!(report.skipped.len(), 4);
}

#[tokio::test]
async fn test_deletions_finish_before_creations_under_concurrency() {
    let registration = local();
    let registry = Arc::new(
        RecordingRegistry::new()
            .with_latency(Duration::from_millis(5))
            .seeded(&["one", "two", "three", "four"]),
    );

    let sync = Synchronizer::new(registry.clone(), SCOPE)
        .with_policy(RegistrationPolicy::new(OldCommands::Wipe, ExistingCommands::Overwrite))
        .with_concurrency(3);
    let report = sync.run(&registration.table, &CancellationToken::new()).await.unwrap();
    assert!(report.is_success());

    let events = registry.events();
    let last_delete_end = events
        .iter()
        .rposition(|e| matches!(e, Event::DeleteEnd(_)))
        .unwrap();
    let first_create_start = events
        .iter()
        .position(|e| matches!(e, Event::CreateStart(_)))
        .unwrap();
    assert!(last_delete_end < first_create_start);

    // Calls within a phase did overlap.
    let second_start = events
        .iter()
        .filter(|e| matches!(e, Event::DeleteStart(_)))
        .nth(1)
        .and_then(|second| events.iter().position(|e| e == second))
        .unwrap();
    let first_end = events
        .iter()
        .position(|e| matches!(e, Event::DeleteEnd(_)))
        .unwrap();
    assert!(second_start < first_end);
}

#[tokio::test]
async fn test_remote_failures_do_not_stop_the_batch() {
    let registration = local();
    let registry = Arc::new(RecordingRegistry::new().seeded(&["legacy"]));
    registry.fail_on("legacy");
    registry.fail_on("shout");

    let report = Synchronizer::new(registry.clone(), SCOPE)
        .run(&registration.table, &CancellationToken::new())
        .await
        .unwrap();

    let mut failed: Vec<_> = report.failures().map(|(e, _)| e.name.as_str()).collect();
    failed.sort();
    assert_eq!(failed, vec!["legacy", "shout"]);
    assert_eq!(report.applied().count(), 3);
    assert_eq!(
        registry.sorted_names(),
        vec!["explode", "fail", "hello", "legacy"]
    );
}

#[tokio::test]
async fn test_cancelled_before_start_issues_nothing() {
    let registration = local();
    let registry = Arc::new(RecordingRegistry::new().seeded(&["legacy"]));
    let cancel = CancellationToken::new();
    cancel.cancel();

    let report = Synchronizer::new(registry.clone(), SCOPE)
        .run(&registration.table, &cancel)
        .await
        .unwrap();

    assert!(report.was_cancelled());
    assert_eq!(report.cancelled().count(), 5);
    assert!(registry.events().is_empty());
    assert_eq!(registry.sorted_names(), vec!["legacy"]);
}
