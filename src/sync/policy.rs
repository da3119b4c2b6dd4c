//! Registration policy: what to do with commands already in the registry.

use serde::Deserialize;
use std::fmt;

/// Treatment of remote commands with no local definition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OldCommands {
    /// Leave them alone.
    KeepAll,
    /// Delete them.
    #[default]
    DeleteUnused,
    /// Delete every remote command, local or not, before creating.
    Wipe,
}

/// Treatment of local commands already present remotely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExistingCommands {
    /// Skip them.
    KeepExisting,
    /// Create them again, replacing the remote definition.
    #[default]
    Overwrite,
}

/// The pair of choices governing a reconciliation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct RegistrationPolicy {
    #[serde(default)]
    pub old_commands: OldCommands,
    #[serde(default)]
    pub existing_commands: ExistingCommands,
}

impl RegistrationPolicy {
    pub fn new(old_commands: OldCommands, existing_commands: ExistingCommands) -> Self {
        Self {
            old_commands,
            existing_commands,
        }
    }
}

impl fmt::Display for OldCommands {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::KeepAll => "keep_all",
            Self::DeleteUnused => "delete_unused",
            Self::Wipe => "wipe",
        })
    }
}

impl fmt::Display for ExistingCommands {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::KeepExisting => "keep_existing",
            Self::Overwrite => "overwrite",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = RegistrationPolicy::default();
        assert_eq!(policy.old_commands, OldCommands::DeleteUnused);
        assert_eq!(policy.existing_commands, ExistingCommands::Overwrite);
    }

    #[test]
    fn test_policy_from_toml() {
        let policy: RegistrationPolicy = toml::from_str(
            r#"
old_commands = "wipe"
existing_commands = "keep_existing"
"#,
        )
        .unwrap();
        assert_eq!(
            policy,
            RegistrationPolicy::new(OldCommands::Wipe, ExistingCommands::KeepExisting)
        );
    }

    #[test]
    fn test_unknown_policy_rejected() {
        let result: Result<RegistrationPolicy, _> = toml::from_str(r#"old_commands = "purge""#);
        assert!(result.is_err());
    }
}
