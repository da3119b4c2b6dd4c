//! Declared command metadata and parameter extraction.
//!
//! A [`MethodSignature`] is the structured stand-in for an annotated handler
//! method: its name, the command markers attached to it, and its declared
//! parameters with their description annotations. [`extract`] validates the
//! parameters and produces the ordered [`ParameterDescriptor`] list.

use super::types::{ParamType, map_type};
use crate::error::BuildError;
use slashsync_proto::{CommandOption, OptionType};

/// Description used for parameters without a description annotation.
pub const DEFAULT_DESCRIPTION: &str = "No description provided";

/// Marker declaring a method as a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandMarker {
    pub name: String,
    pub description: String,
}

impl CommandMarker {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// A declared handler parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    name: String,
    ty: ParamType,
    descriptions: Vec<String>,
}

impl ParamSpec {
    /// Declare a parameter of host type `T`.
    pub fn new<T: ?Sized + 'static>(name: impl Into<String>) -> Self {
        Self::with_type(name, ParamType::of::<T>())
    }

    /// Declare a parameter with an explicit semantic type.
    pub fn with_type(name: impl Into<String>, ty: ParamType) -> Self {
        Self {
            name: name.into(),
            ty,
            descriptions: Vec::new(),
        }
    }

    /// Attach a description annotation.
    #[must_use]
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.descriptions.push(description.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn param_type(&self) -> ParamType {
        self.ty
    }

    pub fn descriptions(&self) -> &[String] {
        &self.descriptions
    }
}

/// Metadata of one module method, marked or not.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MethodSignature {
    pub name: String,
    pub markers: Vec<CommandMarker>,
    pub params: Vec<ParamSpec>,
}

impl MethodSignature {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// A validated parameter, ready for the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDescriptor {
    pub name: String,
    pub description: String,
    pub wire_type: OptionType,
}

impl ParameterDescriptor {
    /// Wire option for this parameter. Every parameter is positional, so
    /// every option is required.
    pub fn to_option(&self) -> CommandOption {
        CommandOption::new(&self.name, &self.description, self.wire_type)
    }
}

/// Extract the ordered parameter descriptors of a handler.
///
/// Names are copied verbatim. Description: none → [`DEFAULT_DESCRIPTION`],
/// one → its text, more → [`BuildError::DuplicateAnnotation`]. Type mapping
/// failures propagate unchanged.
pub fn extract(signature: &MethodSignature) -> Result<Vec<ParameterDescriptor>, BuildError> {
    signature
        .params
        .iter()
        .map(|param| {
            let description = match param.descriptions.as_slice() {
                [] => DEFAULT_DESCRIPTION.to_string(),
                [only] => only.clone(),
                _ => {
                    return Err(BuildError::DuplicateAnnotation {
                        method: signature.name.clone(),
                        parameter: param.name.clone(),
                    });
                }
            };
            let wire_type = map_type(&param.name, param.ty)?;
            Ok(ParameterDescriptor {
                name: param.name.clone(),
                description,
                wire_type,
            })
        })
        .collect()
}
