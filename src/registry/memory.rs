use super::{CommandRegistryClient, Scope};
use crate::error::RegistryError;
use async_trait::async_trait;
use parking_lot::Mutex;
use slashsync_proto::{
    ApplicationId, CommandId, CommandPayload, RemoteCommand, RemoteOption, Snowflake,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// A call observed by [`MemoryRegistry`], in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryCall {
    List(Scope),
    Create { scope: Scope, name: String },
    Delete { scope: Scope, name: String },
}

/// In-process command registry.
///
/// Behaves like the remote registry: creating a command whose name exists
/// overwrites it in place and bumps its version.
#[derive(Debug)]
pub struct MemoryRegistry {
    application_id: ApplicationId,
    next_id: AtomicU64,
    scopes: Mutex<HashMap<Scope, Vec<RemoteCommand>>>,
    calls: Mutex<Vec<RegistryCall>>,
}

impl MemoryRegistry {
    pub fn new(application_id: ApplicationId) -> Self {
        Self {
            application_id,
            next_id: AtomicU64::new(1),
            scopes: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Store `payload` in `scope` without recording a call.
    pub fn seed(&self, scope: Scope, payload: &CommandPayload) -> RemoteCommand {
        self.upsert(scope, payload)
    }

    /// Store a record exactly as given, as if another tool had registered it.
    pub fn seed_record(&self, scope: Scope, command: RemoteCommand) {
        self.scopes.lock().entry(scope).or_default().push(command);
    }

    /// Names registered in `scope`, in registry order.
    pub fn names(&self, scope: Scope) -> Vec<String> {
        self.scopes
            .lock()
            .get(&scope)
            .map(|cmds| cmds.iter().map(|c| c.name.clone()).collect())
            .unwrap_or_default()
    }

    pub fn get(&self, scope: Scope, name: &str) -> Option<RemoteCommand> {
        self.scopes
            .lock()
            .get(&scope)
            .and_then(|cmds| cmds.iter().find(|c| c.name == name).cloned())
    }

    /// Every call made so far.
    pub fn calls(&self) -> Vec<RegistryCall> {
        self.calls.lock().clone()
    }

    fn next_snowflake(&self) -> Snowflake {
        Snowflake(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    fn upsert(&self, scope: Scope, payload: &CommandPayload) -> RemoteCommand {
        let version = self.next_snowflake();
        let mut scopes = self.scopes.lock();
        let commands = scopes.entry(scope).or_default();

        if let Some(existing) = commands.iter_mut().find(|c| c.name == payload.name) {
            existing.description = payload.description.clone();
            existing.options = payload.options.iter().map(RemoteOption::from).collect();
            existing.version = Some(version);
            return existing.clone();
        }

        let command = RemoteCommand {
            id: CommandId(self.next_snowflake()),
            application_id: self.application_id,
            guild_id: match scope {
                Scope::Global => None,
                Scope::Guild(id) => Some(id),
            },
            name: payload.name.clone(),
            description: payload.description.clone(),
            options: payload.options.iter().map(RemoteOption::from).collect(),
            version: Some(version),
        };
        commands.push(command.clone());
        command
    }
}

#[async_trait]
impl CommandRegistryClient for MemoryRegistry {
    async fn list_commands(&self, scope: Scope) -> Result<Vec<RemoteCommand>, RegistryError> {
        self.calls.lock().push(RegistryCall::List(scope));
        Ok(self.scopes.lock().get(&scope).cloned().unwrap_or_default())
    }

    async fn create_command(
        &self,
        scope: Scope,
        payload: &CommandPayload,
    ) -> Result<RemoteCommand, RegistryError> {
        self.calls.lock().push(RegistryCall::Create {
            scope,
            name: payload.name.clone(),
        });
        payload.validate()?;
        Ok(self.upsert(scope, payload))
    }

    async fn delete_command(&self, scope: Scope, command: &RemoteCommand) -> Result<(), RegistryError> {
        self.calls.lock().push(RegistryCall::Delete {
            scope,
            name: command.name.clone(),
        });
        let mut scopes = self.scopes.lock();
        let commands = scopes.entry(scope).or_default();
        let before = commands.len();
        commands.retain(|c| c.id != command.id);
        if commands.len() == before {
            return Err(RegistryError::NotFound(command.name.clone()));
        }
        Ok(())
    }
}
