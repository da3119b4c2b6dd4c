//! Command declaration, discovery and dispatch.
//!
//! This module contains the registration pipeline that turns host modules
//! into a dispatchable command table.
//!
//! ## Pipeline
//!
//! - [`discovery`]: scans a [`TypeSource`] for visible command modules
//! - [`builder`]: instantiates modules and builds the [`CommandTable`]
//!   - [`metadata`]: validates declared parameters into descriptors
//!   - [`types`]: maps parameter types to wire option kinds
//!   - [`binder`]: binds method bodies to their module instance
//! - [`registration`]: runs the whole pass
//!
//! ## Declaring a module
//!
//! ```ignore
//! #[derive(Default)]
//! struct Dice;
//!
//! impl CommandModule for Dice {
//!     fn methods() -> Vec<MethodSpec<Self>> {
//!         vec![MethodSpec::new("roll")
//!             .command("roll", "Roll some dice")
//!             .param(ParamSpec::new::<i64>("count").describe("How many dice"))
//!             .handler(|dice: Arc<Self>, args| async move { dice.roll(args).await })]
//!     }
//! }
//!
//! let mut universe = TypeUniverse::new();
//! universe.register_module::<Dice>("bot::Dice");
//! let registration = Registration::run(&universe)?;
//! ```

pub mod binder;
pub mod builder;
pub mod discovery;
pub mod metadata;
pub mod module;
pub mod registration;
pub mod table;
pub mod types;

pub use binder::Invocable;
pub use builder::{BuildFailure, BuildReport};
pub use discovery::{Discovery, DiscoveryWarning, SkipReason};
pub use metadata::{CommandMarker, DEFAULT_DESCRIPTION, MethodSignature, ParamSpec, ParameterDescriptor};
pub use module::{
    Capability, CommandModule, Constructor, HandlerOutput, MethodSpec, ModuleDescriptor,
    ModuleInfo, SuperType, TypeEntry, TypeSource, TypeUniverse, Visibility,
};
pub use registration::Registration;
pub use table::{CommandDefinition, CommandTable};
pub use types::{ArgError, ArgValue, Args, ParamType};
