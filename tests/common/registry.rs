//! Recording registry client.

use async_trait::async_trait;
use parking_lot::Mutex;
use slashsync::error::RegistryError;
use slashsync::registry::{CommandRegistryClient, MemoryRegistry, Scope};
use slashsync_proto::{ApplicationId, CommandPayload, GuildId, RemoteCommand};
use std::collections::HashSet;
use std::time::Duration;

#[allow(dead_code)]
pub const SCOPE: Scope = Scope::Guild(GuildId::new(300));

/// Start or end of one write call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    DeleteStart(String),
    DeleteEnd(String),
    CreateStart(String),
    CreateEnd(String),
}

/// Wraps a [`MemoryRegistry`], logging every write and failing calls for
/// configured names.
pub struct RecordingRegistry {
    pub inner: MemoryRegistry,
    events: Mutex<Vec<Event>>,
    failing: Mutex<HashSet<String>>,
    latency: Duration,
}

#[allow(dead_code)]
impl RecordingRegistry {
    pub fn new() -> Self {
        Self {
            inner: MemoryRegistry::new(ApplicationId::new(1)),
            events: Mutex::new(Vec::new()),
            failing: Mutex::new(HashSet::new()),
            latency: Duration::ZERO,
        }
    }

    /// Delay each write, so concurrent calls overlap.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn seeded(self, names: &[&str]) -> Self {
        for name in names {
            self.inner
                .seed(SCOPE, &CommandPayload::new(*name, "Seeded remotely"));
        }
        self
    }

    pub fn fail_on(&self, name: &str) {
        self.failing.lock().insert(name.to_string());
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().clone()
    }

    pub fn sorted_names(&self) -> Vec<String> {
        let mut names = self.inner.names(SCOPE);
        names.sort();
        names
    }

    fn failure(&self, name: &str) -> Option<RegistryError> {
        self.failing.lock().contains(name).then(|| RegistryError::Status {
            status: 503,
            body: format!("{name} unavailable"),
        })
    }

    async fn pause(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[async_trait]
impl CommandRegistryClient for RecordingRegistry {
    async fn list_commands(&self, scope: Scope) -> Result<Vec<RemoteCommand>, RegistryError> {
        self.inner.list_commands(scope).await
    }

    async fn create_command(
        &self,
        scope: Scope,
        payload: &CommandPayload,
    ) -> Result<RemoteCommand, RegistryError> {
        self.events.lock().push(Event::CreateStart(payload.name.clone()));
        self.pause().await;
        let result = match self.failure(&payload.name) {
            Some(e) => Err(e),
            None => self.inner.create_command(scope, payload).await,
        };
        self.events.lock().push(Event::CreateEnd(payload.name.clone()));
        result
    }

    async fn delete_command(&self, scope: Scope, command: &RemoteCommand) -> Result<(), RegistryError> {
        self.events.lock().push(Event::DeleteStart(command.name.clone()));
        self.pause().await;
        let result = match self.failure(&command.name) {
            Some(e) => Err(e),
            None => self.inner.delete_command(scope, command).await,
        };
        self.events.lock().push(Event::DeleteEnd(command.name.clone()));
        result
    }
}
