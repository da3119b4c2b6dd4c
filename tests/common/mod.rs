//! Integration test common infrastructure.
//!
//! Provides fixture command modules and a registry wrapper that records
//! call timing and injects failures.

pub mod modules;
pub mod registry;

#[allow(unused_imports)]
pub use modules::fixture_universe;
#[allow(unused_imports)]
pub use registry::{Event, RecordingRegistry, SCOPE};
