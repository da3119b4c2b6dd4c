//! slashsync - slash command discovery, dispatch and registry sync.
//!
//! A registration pass turns host command modules into a [`CommandTable`]
//! of bound, typed handlers. The table is then reconciled against a remote
//! command registry under a [`RegistrationPolicy`].
//!
//! ```ignore
//! let registration = Registration::run(&universe)?;
//! let client = Arc::new(HttpRegistryClient::from_config(&config.registry)?);
//! let report = Synchronizer::new(client, config.scope())
//!     .with_policy(config.policy)
//!     .run(&registration.table, &CancellationToken::new())
//!     .await?;
//! ```

pub mod builtin;
pub mod commands;
pub mod config;
pub mod error;
pub mod metrics;
pub mod registry;
pub mod sync;
pub mod telemetry;

pub use commands::{CommandDefinition, CommandModule, CommandTable, Registration, TypeUniverse};
pub use error::{BuildError, DiscoveryError, HandlerError, RegistryError};
pub use registry::{CommandRegistryClient, HttpRegistryClient, MemoryRegistry, Scope};
pub use sync::{RegistrationPolicy, SyncReport, Synchronizer};
