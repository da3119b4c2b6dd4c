//! slashsync - register the built-in slash commands with a remote registry.

use slashsync::config::{self, Config};
use slashsync::registry::HttpRegistryClient;
use slashsync::sync::{SyncOutcome, Synchronizer};
use slashsync::{Registration, builtin, metrics};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "slashsync.toml".to_string());

    let config = Config::load(&config_path).map_err(|e| {
        error!(path = %config_path, error = %e, "Failed to load config");
        e
    })?;

    if let Err(errors) = config::validate(&config) {
        for e in &errors {
            error!(error = %e, "Invalid configuration");
        }
        anyhow::bail!("{} configuration error(s) in {}", errors.len(), config_path);
    }

    let scope = config.scope();
    info!(
        application_id = %config.registry.application_id,
        scope = %scope,
        old_commands = %config.policy.old_commands,
        existing_commands = %config.policy.existing_commands,
        dry_run = config.sync.dry_run,
        "Starting slashsync"
    );

    metrics::init();

    // Registration pass over the built-in modules
    let registration = Registration::run(&builtin::universe())?;
    for warning in &registration.warnings {
        warn!(%warning, "Module skipped");
    }
    for failure in &registration.failures {
        warn!(%failure, code = failure.error.error_code(), "Command not registered");
    }
    if config.sync.strict && !registration.failures.is_empty() {
        anyhow::bail!(
            "registration reported {} failure(s); refusing to sync in strict mode",
            registration.failures.len()
        );
    }

    let client = Arc::new(HttpRegistryClient::from_config(&config.registry)?);
    let synchronizer = Synchronizer::new(client, scope)
        .with_policy(config.policy)
        .with_concurrency(config.sync.concurrency);

    let snapshot = synchronizer.fetch_snapshot().await?;
    info!(remote = snapshot.len(), local = registration.table.len(), "Fetched remote commands");

    let plan = synchronizer.plan(&registration.table, &snapshot);
    if config.sync.dry_run {
        for deletion in &plan.deletions {
            info!(command = %deletion.command.name, reason = ?deletion.reason, "Would delete");
        }
        for creation in &plan.creations {
            info!(command = %creation.payload.name, overwrite = creation.overwrite, "Would create");
        }
        info!(plan = %plan, "Dry run complete");
        return Ok(());
    }

    // Ctrl-C stops new registry calls; in-flight calls finish.
    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received; cancelling remaining registry operations");
            on_signal.cancel();
        }
    });

    let report = synchronizer.execute(plan, &cancel).await;
    for entry in &report.entries {
        if let SyncOutcome::Failed(e) = &entry.outcome {
            error!(command = %entry.name, op = %entry.op, error = %e, "Sync operation failed");
        }
    }
    info!(report = %report, "Sync complete");

    if !report.is_success() {
        anyhow::bail!("sync did not complete: {report}");
    }
    Ok(())
}
