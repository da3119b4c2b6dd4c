//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Config struct definitions and file loading
//! - [`defaults`]: serde default value functions
//! - [`validation`]: startup checks collecting every problem at once

pub mod defaults;
mod types;
pub mod validation;

pub use types::{Config, ConfigError, RegistryConfig, ScopeConfig, SyncConfig};
pub use validation::{ValidationError, validate};
