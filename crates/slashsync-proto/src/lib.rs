//! # slashsync-proto
//!
//! Wire types for application command registries (Discord-style slash
//! commands).
//!
//! ## Features
//!
//! - The fixed set of option kinds understood by the registry ([`OptionType`])
//! - JSON payload shapes for creating commands ([`CommandPayload`], [`CommandOption`])
//! - Registry-side command records ([`RemoteCommand`])
//! - Snowflake id newtypes for channels, roles, users, guilds and commands
//! - Name and description validation matching registry limits
//!
//! ## Quick Start
//!
//! ```rust
//! use slashsync_proto::{CommandOption, CommandPayload, OptionType};
//!
//! let payload = CommandPayload::new("roll", "Roll some dice")
//!     .with_option(CommandOption::new("count", "How many dice", OptionType::Integer))
//!     .with_option(CommandOption::new("label", "Label for the roll", OptionType::String));
//!
//! assert!(payload.validate().is_ok());
//! let json = serde_json::to_string(&payload).unwrap();
//! assert!(json.contains("\"type\":4"));
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod command;
pub mod error;
pub mod id;
pub mod name;
pub mod option;

pub use self::command::{
    CommandOption, CommandPayload, RemoteCommand, RemoteOption, COMMAND_KIND_CHAT_INPUT,
};
pub use self::error::{ProtoError, Result};
pub use self::id::{ApplicationId, ChannelId, CommandId, GuildId, RoleId, Snowflake, UserId};
pub use self::name::{NameExt, MAX_DESCRIPTION_LEN, MAX_NAME_LEN, MAX_OPTIONS};
pub use self::option::OptionType;
