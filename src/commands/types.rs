//! Parameter types and argument values.
//!
//! [`ParamType`] is the semantic type a handler declares for a parameter;
//! [`map_type`] turns it into the wire [`OptionType`]. [`ArgValue`] is a
//! single positional argument passed to a bound handler.

use crate::error::BuildError;
use slashsync_proto::{ChannelId, OptionType, RoleId, UserId};
use std::any::{TypeId, type_name};
use std::fmt;
use thiserror::Error;

/// Semantic type of a declared handler parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamType {
    Integer,
    String,
    Boolean,
    Channel,
    Role,
    User,
    /// Any other host type, by its type name.
    Other(&'static str),
}

impl ParamType {
    /// Semantic type of the host type `T`.
    ///
    /// Signed integers and unsigned integers up to 32 bits are `Integer`.
    /// `String`, `str` and `&'static str` are `String`. `u64`, floats and
    /// everything else fall through to `Other`.
    pub fn of<T: ?Sized + 'static>() -> Self {
        let id = TypeId::of::<T>();
        let integers = [
            TypeId::of::<i64>(),
            TypeId::of::<i32>(),
            TypeId::of::<i16>(),
            TypeId::of::<i8>(),
            TypeId::of::<u32>(),
            TypeId::of::<u16>(),
            TypeId::of::<u8>(),
        ];

        if integers.contains(&id) {
            Self::Integer
        } else if id == TypeId::of::<String>()
            || id == TypeId::of::<str>()
            || id == TypeId::of::<&'static str>()
        {
            Self::String
        } else if id == TypeId::of::<bool>() {
            Self::Boolean
        } else if id == TypeId::of::<ChannelId>() {
            Self::Channel
        } else if id == TypeId::of::<RoleId>() {
            Self::Role
        } else if id == TypeId::of::<UserId>() {
            Self::User
        } else {
            Self::Other(type_name::<T>())
        }
    }

    /// Wire kind, or `None` when the type has no representation.
    #[inline]
    pub fn wire_type(self) -> Option<OptionType> {
        match self {
            Self::Integer => Some(OptionType::Integer),
            Self::String => Some(OptionType::String),
            Self::Boolean => Some(OptionType::Boolean),
            Self::Channel => Some(OptionType::Channel),
            Self::Role => Some(OptionType::Role),
            Self::User => Some(OptionType::User),
            Self::Other(_) => None,
        }
    }

    fn type_name(self) -> &'static str {
        match self.wire_type() {
            Some(kind) => kind.as_str(),
            None => match self {
                Self::Other(name) => name,
                _ => "unknown",
            },
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Map a declared parameter's type to its wire option kind.
///
/// Fails closed with [`BuildError::UnsupportedParameterType`] naming the
/// parameter.
pub fn map_type(parameter: &str, ty: ParamType) -> Result<OptionType, BuildError> {
    ty.wire_type().ok_or_else(|| BuildError::UnsupportedParameterType {
        parameter: parameter.to_string(),
        type_name: ty.type_name(),
    })
}

/// A positional argument value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    Integer(i64),
    String(String),
    Boolean(bool),
    Channel(ChannelId),
    Role(RoleId),
    User(UserId),
}

impl ArgValue {
    /// Wire kind carried by this value.
    pub fn option_type(&self) -> OptionType {
        match self {
            Self::Integer(_) => OptionType::Integer,
            Self::String(_) => OptionType::String,
            Self::Boolean(_) => OptionType::Boolean,
            Self::Channel(_) => OptionType::Channel,
            Self::Role(_) => OptionType::Role,
            Self::User(_) => OptionType::User,
        }
    }
}

impl From<i64> for ArgValue {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<&str> for ArgValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<bool> for ArgValue {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<ChannelId> for ArgValue {
    fn from(v: ChannelId) -> Self {
        Self::Channel(v)
    }
}

impl From<RoleId> for ArgValue {
    fn from(v: RoleId) -> Self {
        Self::Role(v)
    }
}

impl From<UserId> for ArgValue {
    fn from(v: UserId) -> Self {
        Self::User(v)
    }
}

/// Error reading a typed argument out of [`Args`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgError {
    #[error("missing argument {0}")]
    Missing(usize),
    #[error("argument {index} is {found}, not {expected}")]
    Kind {
        index: usize,
        expected: OptionType,
        found: OptionType,
    },
}

/// Positional arguments handed to a handler, in parameter declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Args {
    values: Vec<ArgValue>,
}

macro_rules! typed_getter {
    ($(#[$meta:meta])* $fn:ident, $variant:ident, $ty:ty) => {
        $(#[$meta])*
        pub fn $fn(&self, index: usize) -> Result<$ty, ArgError> {
            match self.values.get(index) {
                Some(ArgValue::$variant(v)) => Ok(v.clone()),
                Some(other) => Err(ArgError::Kind {
                    index,
                    expected: OptionType::$variant,
                    found: other.option_type(),
                }),
                None => Err(ArgError::Missing(index)),
            }
        }
    };
}

impl Args {
    pub fn new(values: Vec<ArgValue>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ArgValue> {
        self.values.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ArgValue> {
        self.values.iter()
    }

    typed_getter!(
        /// Integer argument at `index`.
        integer, Integer, i64
    );
    typed_getter!(
        /// String argument at `index`.
        string, String, String
    );
    typed_getter!(boolean, Boolean, bool);
    typed_getter!(channel, Channel, ChannelId);
    typed_getter!(role, Role, RoleId);
    typed_getter!(user, User, UserId);
}

impl From<Vec<ArgValue>> for Args {
    fn from(values: Vec<ArgValue>) -> Self {
        Self::new(values)
    }
}
