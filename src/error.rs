//! Unified error handling for slashsync.
//!
//! This module provides the error hierarchy for the registration pipeline,
//! command dispatch and registry reconciliation, with static codes for
//! metric labeling.

use slashsync_proto::{OptionType, ProtoError};
use thiserror::Error;

// ============================================================================
// Build Errors (metadata extraction, binding, table construction)
// ============================================================================

/// Errors raised while turning module method tables into command definitions.
///
/// Each error is fatal to the smallest affected unit only: the method, the
/// module or the table insertion. The rest of the build continues.
#[derive(Debug, Error)]
pub enum BuildError {
    /// A method carries more than one command marker. Fatal to the module.
    #[error("method {method} carries {count} command markers")]
    DuplicateCommandMarker { method: String, count: usize },

    /// A parameter carries more than one description annotation.
    #[error("parameter {parameter} of method {method} has more than one description")]
    DuplicateAnnotation { method: String, parameter: String },

    /// Two methods declare the same command name.
    #[error("command name {0:?} is declared more than once")]
    DuplicateCommandName(String),

    /// A parameter type has no wire representation.
    #[error("parameter {parameter} has unsupported type {type_name}")]
    UnsupportedParameterType {
        parameter: String,
        type_name: &'static str,
    },

    /// The dispatch handle could not be bound.
    #[error("cannot bind method {method}: {reason}")]
    Binding { method: String, reason: &'static str },

    /// The module has no nullary constructor.
    #[error("module {module} cannot be constructed without arguments")]
    NoNullaryConstructor { module: String },

    /// The definition violates registry limits.
    #[error("command {command} is not a valid registry definition: {source}")]
    InvalidDefinition {
        command: String,
        #[source]
        source: ProtoError,
    },
}

impl BuildError {
    /// Get a static error code string for metrics labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateCommandMarker { .. } => "duplicate_command_marker",
            Self::DuplicateAnnotation { .. } => "duplicate_annotation",
            Self::DuplicateCommandName(_) => "duplicate_command_name",
            Self::UnsupportedParameterType { .. } => "unsupported_parameter_type",
            Self::Binding { .. } => "binding_error",
            Self::NoNullaryConstructor { .. } => "no_nullary_constructor",
            Self::InvalidDefinition { .. } => "invalid_definition",
        }
    }
}

// ============================================================================
// Discovery Errors (type universe scan)
// ============================================================================

/// Structural failures of the module scan. Individual disqualified types
/// never produce these.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("type source could not be enumerated: {0}")]
    Enumeration(String),
}

// ============================================================================
// Handler Errors (dispatch time)
// ============================================================================

/// Fault raised by host handler code.
pub type HandlerFault = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced when dispatching a command to its bound handler.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("command {command} takes {expected} arguments, got {got}")]
    ArgumentCount {
        command: String,
        expected: usize,
        got: usize,
    },

    #[error("argument {index} of command {command} must be {expected}, got {got}")]
    ArgumentType {
        command: String,
        index: usize,
        expected: OptionType,
        got: OptionType,
    },

    /// The handler returned an error; the original fault is the source.
    #[error("handler for command {command} failed: {source}")]
    Invocation {
        command: String,
        #[source]
        source: HandlerFault,
    },

    #[error("handler for command {command} panicked: {message}")]
    Panicked { command: String, message: String },
}

impl HandlerError {
    /// Get a static error code string for metrics labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownCommand(_) => "unknown_command",
            Self::ArgumentCount { .. } => "argument_count",
            Self::ArgumentType { .. } => "argument_type",
            Self::Invocation { .. } => "invocation_error",
            Self::Panicked { .. } => "panicked",
        }
    }
}

/// Result type for dispatched handlers.
pub type HandlerResult = Result<Option<serde_json::Value>, HandlerError>;

// ============================================================================
// Registry Errors (remote calls)
// ============================================================================

/// Failures of individual calls against the remote command registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("registry returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("command {0} not found in registry")]
    NotFound(String),

    #[error("registry rejected payload: {0}")]
    Rejected(#[from] ProtoError),

    #[error("bot token environment variable {0} is not set")]
    MissingToken(String),

    #[error("bot token is not a valid header value")]
    InvalidToken,
}

impl RegistryError {
    /// Get a static error code string for metrics labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Http(_) => "http",
            Self::Status { .. } => "status",
            Self::NotFound(_) => "not_found",
            Self::Rejected(_) => "rejected",
            Self::MissingToken(_) => "missing_token",
            Self::InvalidToken => "invalid_token",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invocation_error_keeps_source() {
        let fault: HandlerFault = "database unavailable".into();
        let err = HandlerError::Invocation {
            command: "roll".to_string(),
            source: fault,
        };
        let source = std::error::Error::source(&err).map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("database unavailable"));
        assert_eq!(err.error_code(), "invocation_error");
    }

    #[test]
    fn test_build_error_messages_name_the_unit() {
        let err = BuildError::DuplicateAnnotation {
            method: "roll".to_string(),
            parameter: "count".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("roll") && text.contains("count"));
    }
}
