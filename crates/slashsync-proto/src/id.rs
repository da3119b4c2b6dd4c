//! Snowflake identifiers.
//!
//! Registries identify every entity with a 64-bit snowflake that travels as a
//! decimal string in JSON. Typed newtypes keep channel, role and user ids from
//! being mixed up at call sites.

use crate::error::ProtoError;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Raw 64-bit snowflake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Snowflake(pub u64);

impl Snowflake {
    /// Numeric value.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Snowflake {
    type Err = ProtoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>()
            .map(Snowflake)
            .map_err(|_| ProtoError::InvalidSnowflake(s.to_string()))
    }
}

impl Serialize for Snowflake {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

struct SnowflakeVisitor;

impl<'de> Visitor<'de> for SnowflakeVisitor {
    type Value = Snowflake;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a snowflake as a decimal string or unsigned integer")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Snowflake(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        u64::try_from(v)
            .map(Snowflake)
            .map_err(|_| E::custom(ProtoError::InvalidSnowflake(v.to_string())))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        v.parse().map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Snowflake {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(SnowflakeVisitor)
    }
}

macro_rules! snowflake_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Snowflake);

        impl $name {
            /// Build from a raw numeric id.
            #[inline]
            pub const fn new(id: u64) -> Self {
                Self(Snowflake(id))
            }

            /// Numeric value.
            #[inline]
            pub const fn get(self) -> u64 {
                self.0 .0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = ProtoError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse().map(Self)
            }
        }
    };
}

snowflake_id!(
    /// Channel id, the value of a `channel` option.
    ChannelId
);
snowflake_id!(
    /// Role id, the value of a `role` option.
    RoleId
);
snowflake_id!(
    /// User id, the value of a `user` option.
    UserId
);
snowflake_id!(
    /// Guild id; a guild is the usual registration scope.
    GuildId
);
snowflake_id!(
    /// Application id owning the registered commands.
    ApplicationId
);
snowflake_id!(
    /// Registry-assigned id of a registered command.
    CommandId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snowflake_string_encoding() {
        let id = ChannelId::new(175928847299117063);
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"175928847299117063\"");
    }

    #[test]
    fn test_snowflake_accepts_string_or_number() {
        let a: RoleId = serde_json::from_str("\"42\"").unwrap();
        let b: RoleId = serde_json::from_str("42").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.get(), 42);
    }

    #[test]
    fn test_invalid_snowflake() {
        assert_eq!(
            "12ab".parse::<UserId>(),
            Err(ProtoError::InvalidSnowflake("12ab".to_string()))
        );
        assert!(serde_json::from_str::<UserId>("\"-1\"").is_err());
    }
}
