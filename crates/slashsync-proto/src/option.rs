//! Command option kinds.
//!
//! The registry understands a fixed enumeration of option kinds, sent on the
//! wire as small integers. Only the six primitive kinds are modelled; the
//! sub-command and attachment kinds are not part of this library.

use crate::error::ProtoError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Wire option type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum OptionType {
    /// Free text.
    String,
    /// Signed integer.
    Integer,
    /// `true`/`false`.
    Boolean,
    /// A user (member) reference.
    User,
    /// A channel reference.
    Channel,
    /// A role reference.
    Role,
}

impl OptionType {
    /// All supported option kinds, in wire-code order.
    pub const ALL: [OptionType; 6] = [
        OptionType::String,
        OptionType::Integer,
        OptionType::Boolean,
        OptionType::User,
        OptionType::Channel,
        OptionType::Role,
    ];

    /// Numeric code used on the wire.
    #[inline]
    pub const fn code(self) -> u8 {
        match self {
            Self::String => 3,
            Self::Integer => 4,
            Self::Boolean => 5,
            Self::User => 6,
            Self::Channel => 7,
            Self::Role => 8,
        }
    }

    /// Lower-case name, as used in logs and config.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::User => "user",
            Self::Channel => "channel",
            Self::Role => "role",
        }
    }
}

impl From<OptionType> for u8 {
    fn from(kind: OptionType) -> Self {
        kind.code()
    }
}

impl TryFrom<u8> for OptionType {
    type Error = ProtoError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        OptionType::ALL
            .into_iter()
            .find(|kind| kind.code() == code)
            .ok_or(ProtoError::UnknownOptionType(code))
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
