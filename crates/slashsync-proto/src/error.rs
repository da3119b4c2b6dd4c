//! Error types for the wire protocol library.

use thiserror::Error;

/// Convenience type alias for Results using [`ProtoError`].
pub type Result<T, E = ProtoError> = std::result::Result<T, E>;

/// Protocol-level validation and decoding errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ProtoError {
    /// Option type code not known to this library.
    #[error("unknown option type code: {0}")]
    UnknownOptionType(u8),

    /// Snowflake string did not parse as an unsigned 64-bit integer.
    #[error("invalid snowflake: {0:?}")]
    InvalidSnowflake(String),

    /// Command or option name violates registry naming rules.
    #[error("invalid name {name:?}: {reason}")]
    InvalidName {
        /// The offending name.
        name: String,
        /// Which rule it broke.
        reason: &'static str,
    },

    /// Description empty or too long.
    #[error("invalid description for {name:?}: {reason}")]
    InvalidDescription {
        /// Name of the command or option owning the description.
        name: String,
        /// Which rule it broke.
        reason: &'static str,
    },

    /// More options than the registry accepts on one command.
    #[error("command {name:?} declares {count} options (max {max})")]
    TooManyOptions {
        /// Command name.
        name: String,
        /// Declared option count.
        count: usize,
        /// Registry limit.
        max: usize,
    },

    /// Two options on one command share a name.
    #[error("command {command:?} declares option {option:?} more than once")]
    DuplicateOption {
        /// Command name.
        command: String,
        /// Repeated option name.
        option: String,
    },
}
