//! Command payloads and registry records.

use crate::error::{ProtoError, Result};
use crate::id::{ApplicationId, CommandId, GuildId, Snowflake};
use crate::name::{NameExt, MAX_OPTIONS};
use crate::option::OptionType;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Command kind code for chat-input (slash) commands.
pub const COMMAND_KIND_CHAT_INPUT: u8 = 1;

fn chat_input() -> u8 {
    COMMAND_KIND_CHAT_INPUT
}

/// One option (parameter) of a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandOption {
    /// Option kind.
    #[serde(rename = "type")]
    pub kind: OptionType,
    /// Option name.
    pub name: String,
    /// Option description shown to users.
    pub description: String,
    /// Whether the user must supply a value. The registry omits it when false.
    #[serde(default)]
    pub required: bool,
}

impl CommandOption {
    /// Create a required option.
    pub fn new(name: impl Into<String>, description: impl Into<String>, kind: OptionType) -> Self {
        Self {
            kind,
            name: name.into(),
            description: description.into(),
            required: true,
        }
    }
}

/// Body sent to the registry to create (or overwrite) a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandPayload {
    /// Command name, unique within a scope.
    pub name: String,
    /// Command description.
    pub description: String,
    /// Positional options, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<CommandOption>,
    /// Command kind; always chat-input here.
    #[serde(rename = "type", default = "chat_input")]
    pub kind: u8,
}

impl CommandPayload {
    /// Create a chat-input command payload with no options.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            options: Vec::new(),
            kind: COMMAND_KIND_CHAT_INPUT,
        }
    }

    /// Append an option.
    #[must_use]
    pub fn with_option(mut self, option: CommandOption) -> Self {
        self.options.push(option);
        self
    }

    /// Check the payload against registry limits.
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<()> {
        check_name(&self.name)?;
        check_description(&self.name, &self.description)?;

        if self.options.len() > MAX_OPTIONS {
            return Err(ProtoError::TooManyOptions {
                name: self.name.clone(),
                count: self.options.len(),
                max: MAX_OPTIONS,
            });
        }

        let mut seen = HashSet::new();
        for option in &self.options {
            check_name(&option.name)?;
            check_description(&option.name, &option.description)?;
            if !seen.insert(option.name.as_str()) {
                return Err(ProtoError::DuplicateOption {
                    command: self.name.clone(),
                    option: option.name.clone(),
                });
            }
        }
        Ok(())
    }
}

fn check_name(name: &str) -> Result<()> {
    match name.name_violation() {
        Some(reason) => Err(ProtoError::InvalidName {
            name: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

fn check_description(name: &str, description: &str) -> Result<()> {
    match description.description_violation() {
        Some(reason) => Err(ProtoError::InvalidDescription {
            name: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

/// One option of a command already stored by the registry.
///
/// The kind is kept as its raw wire code: remote commands may have been
/// registered by other tools using kinds this library never emits
/// (sub-commands, numbers, attachments).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteOption {
    /// Raw option kind code.
    #[serde(rename = "type")]
    pub kind: u8,
    /// Option name.
    pub name: String,
    /// Option description.
    #[serde(default)]
    pub description: String,
    /// Whether the user must supply a value.
    #[serde(default)]
    pub required: bool,
}

impl RemoteOption {
    /// The option kind, if it is one this library models.
    pub fn option_type(&self) -> Option<OptionType> {
        OptionType::try_from(self.kind).ok()
    }
}

impl From<&CommandOption> for RemoteOption {
    fn from(option: &CommandOption) -> Self {
        Self {
            kind: option.kind.code(),
            name: option.name.clone(),
            description: option.description.clone(),
            required: option.required,
        }
    }
}

/// A command as stored by the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteCommand {
    /// Registry-assigned id; the handle used for deletion.
    pub id: CommandId,
    /// Owning application.
    pub application_id: ApplicationId,
    /// Guild the command is registered in, or `None` for global commands.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<GuildId>,
    /// Command name.
    pub name: String,
    /// Command description.
    #[serde(default)]
    pub description: String,
    /// Registered options.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<RemoteOption>,
    /// Auto-incrementing version bumped by the registry on every update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<Snowflake>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roll() -> CommandPayload {
        CommandPayload::new("roll", "Roll some dice")
            .with_option(CommandOption::new("count", "How many", OptionType::Integer))
            .with_option(CommandOption::new("label", "What for", OptionType::String))
    }

    #[test]
    fn test_payload_json_shape() {
        let value = serde_json::to_value(roll()).unwrap();
        assert_eq!(value["name"], "roll");
        assert_eq!(value["type"], 1);
        assert_eq!(value["options"][0]["name"], "count");
        assert_eq!(value["options"][0]["type"], 4);
        assert_eq!(value["options"][0]["required"], true);
        assert_eq!(value["options"][1]["type"], 3);
    }

    #[test]
    fn test_empty_options_omitted() {
        let value = serde_json::to_value(CommandPayload::new("ping", "Pong")).unwrap();
        assert!(value.get("options").is_none());
    }

    #[test]
    fn test_validate_ok() {
        assert_eq!(roll().validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_duplicate_option() {
        let payload = roll().with_option(CommandOption::new("count", "again", OptionType::Integer));
        assert_eq!(
            payload.validate(),
            Err(ProtoError::DuplicateOption {
                command: "roll".to_string(),
                option: "count".to_string(),
            })
        );
    }

    #[test]
    fn test_validate_rejects_bad_option_name() {
        let payload = roll().with_option(CommandOption::new("Bad Name", "x", OptionType::User));
        assert!(matches!(payload.validate(), Err(ProtoError::InvalidName { .. })));
    }

    #[test]
    fn test_validate_rejects_too_many_options() {
        let mut payload = CommandPayload::new("many", "Lots of options");
        for i in 0..=MAX_OPTIONS {
            payload = payload.with_option(CommandOption::new(
                format!("opt{i}"),
                "x",
                OptionType::Boolean,
            ));
        }
        assert!(matches!(payload.validate(), Err(ProtoError::TooManyOptions { count: 26, .. })));
    }

    #[test]
    fn test_remote_command_decodes_registry_json() {
        let raw = r#"{
            "id": "1100000000000000001",
            "application_id": "900000000000000000",
            "guild_id": "800000000000000000",
            "name": "ping",
            "description": "Check latency",
            "type": 1,
            "version": "1100000000000000002",
            "default_member_permissions": null
        }"#;
        let cmd: RemoteCommand = serde_json::from_str(raw).unwrap();
        assert_eq!(cmd.name, "ping");
        assert_eq!(cmd.id, CommandId::new(1100000000000000001));
        assert_eq!(cmd.guild_id, Some(GuildId::new(800000000000000000)));
        assert!(cmd.options.is_empty());
    }

    #[test]
    fn test_absent_required_means_optional() {
        let raw = r#"{ "type": 3, "name": "label", "description": "What for" }"#;
        let option: CommandOption = serde_json::from_str(raw).unwrap();
        assert!(!option.required);
    }

    #[test]
    fn test_remote_option_keeps_unmodelled_kind() {
        let raw = r#"{ "type": 10, "name": "ratio", "description": "A number" }"#;
        let option: RemoteOption = serde_json::from_str(raw).unwrap();
        assert_eq!(option.kind, 10);
        assert_eq!(option.option_type(), None);
        assert!(!option.required);
    }
}
