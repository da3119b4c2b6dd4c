//! Point-in-time view of the commands registered remotely.

use crate::error::RegistryError;
use crate::registry::{CommandRegistryClient, Scope};
use slashsync_proto::RemoteCommand;
use tracing::debug;

/// The remote commands of one scope, fetched once and never refreshed.
#[derive(Debug, Clone, Default)]
pub struct RemoteCommandSnapshot {
    commands: Vec<RemoteCommand>,
}

impl RemoteCommandSnapshot {
    /// List every command in `scope`.
    pub async fn fetch(
        client: &dyn CommandRegistryClient,
        scope: Scope,
    ) -> Result<Self, RegistryError> {
        let commands = client.list_commands(scope).await?;
        debug!(scope = %scope, commands = commands.len(), "Fetched remote snapshot");
        Ok(Self { commands })
    }

    pub fn commands(&self) -> &[RemoteCommand] {
        &self.commands
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().map(|c| c.name.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.iter().any(|c| c.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&RemoteCommand> {
        self.commands.iter().find(|c| c.name == name)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl From<Vec<RemoteCommand>> for RemoteCommandSnapshot {
    fn from(commands: Vec<RemoteCommand>) -> Self {
        Self { commands }
    }
}
