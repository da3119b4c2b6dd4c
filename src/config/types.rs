//! Core configuration types and loading.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use super::defaults::{
    default_api_base, default_concurrency, default_request_timeout, default_token_env,
    default_true,
};
use crate::registry::Scope;
use crate::sync::RegistrationPolicy;
use slashsync_proto::{ApplicationId, GuildId};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Remote registry access.
    pub registry: RegistryConfig,
    /// Where commands are registered.
    #[serde(default)]
    pub scope: ScopeConfig,
    /// Treatment of stale and existing remote commands.
    #[serde(default)]
    pub policy: RegistrationPolicy,
    /// Reconciliation behavior.
    #[serde(default)]
    pub sync: SyncConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Registry scope selected by `[scope]`.
    pub fn scope(&self) -> Scope {
        match self.scope.guild_id {
            Some(guild) => Scope::Guild(guild),
            None => Scope::Global,
        }
    }
}

/// Remote registry connection settings.
#[derive(Debug, Clone, Deserialize)]
pub struct RegistryConfig {
    /// REST API base URL, without trailing slash.
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Application that owns the commands.
    pub application_id: ApplicationId,
    /// Environment variable holding the bot token.
    #[serde(default = "default_token_env")]
    pub token_env: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl RegistryConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Registration scope. No guild means global.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScopeConfig {
    pub guild_id: Option<GuildId>,
}

/// Reconciliation settings.
#[derive(Debug, Clone, Deserialize)]
pub struct SyncConfig {
    /// Registry calls in flight per phase.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    /// Refuse to sync if the registration pass reported any failure.
    #[serde(default = "default_true")]
    pub strict: bool,
    /// Log the plan instead of writing to the registry.
    #[serde(default)]
    pub dry_run: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            strict: true,
            dry_run: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::{ExistingCommands, OldCommands};
    use std::io::Write;

    #[test]
    fn minimal_config_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
[registry]
application_id = "112233445566778899"
"#,
        )
        .unwrap();

        assert_eq!(config.registry.application_id.get(), 112233445566778899);
        assert_eq!(config.registry.api_base, "https://discord.com/api/v10");
        assert_eq!(config.registry.token_env, "SLASHSYNC_TOKEN");
        assert_eq!(config.registry.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.scope(), Scope::Global);
        assert_eq!(config.policy, RegistrationPolicy::default());
        assert_eq!(config.sync.concurrency, 1);
        assert!(config.sync.strict);
        assert!(!config.sync.dry_run);
    }

    #[test]
    fn full_config_parses() {
        let config: Config = toml::from_str(
            r#"
[registry]
api_base = "http://127.0.0.1:8080/api"
application_id = 42
token_env = "BOT_TOKEN"
request_timeout_secs = 3

[scope]
guild_id = "9001"

[policy]
old_commands = "keep_all"
existing_commands = "keep_existing"

[sync]
concurrency = 4
strict = false
dry_run = true
"#,
        )
        .unwrap();

        assert_eq!(config.scope(), Scope::Guild(GuildId::new(9001)));
        assert_eq!(config.policy.old_commands, OldCommands::KeepAll);
        assert_eq!(config.policy.existing_commands, ExistingCommands::KeepExisting);
        assert_eq!(config.sync.concurrency, 4);
        assert!(!config.sync.strict);
        assert!(config.sync.dry_run);
    }

    #[test]
    fn missing_application_id_is_a_parse_error() {
        let result: Result<Config, _> = toml::from_str("[registry]\n");
        assert!(result.is_err());
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[registry]\napplication_id = \"5\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.registry.application_id, ApplicationId::new(5));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load(dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
