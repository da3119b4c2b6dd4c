//! Remote command registry clients.
//!
//! - [`CommandRegistryClient`]: the list/create/delete capability the
//!   synchronizer needs
//! - [`HttpRegistryClient`]: REST client for Discord-style registries
//! - [`MemoryRegistry`]: in-process registry for dry runs and tests

mod http;
mod memory;

pub use http::HttpRegistryClient;
pub use memory::{MemoryRegistry, RegistryCall};

use crate::error::RegistryError;
use async_trait::async_trait;
use slashsync_proto::{CommandPayload, GuildId, RemoteCommand};
use std::fmt;

/// Destination commands are registered against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Available everywhere the application is installed.
    Global,
    /// Available in one guild only.
    Guild(GuildId),
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global => f.write_str("global"),
            Self::Guild(id) => write!(f, "guild:{id}"),
        }
    }
}

/// Access to a remote command registry.
///
/// Calls are independent; implementations must not retry on their own.
#[async_trait]
pub trait CommandRegistryClient: Send + Sync {
    /// Every command currently registered in `scope`.
    async fn list_commands(&self, scope: Scope) -> Result<Vec<RemoteCommand>, RegistryError>;

    /// Create a command, overwriting any command with the same name.
    async fn create_command(
        &self,
        scope: Scope,
        payload: &CommandPayload,
    ) -> Result<RemoteCommand, RegistryError>;

    /// Delete a previously listed command.
    async fn delete_command(&self, scope: Scope, command: &RemoteCommand) -> Result<(), RegistryError>;
}
