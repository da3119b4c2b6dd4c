//! Built-in command modules shipped with the `slashsync` binary.
//!
//! - [`General`]: `ping`, `echo`
//! - [`Dice`]: `roll`
//! - [`Lookup`]: `whois`, `permissions`

mod dice;
mod general;
mod lookup;

pub use dice::{Dice, DiceError};
pub use general::General;
pub use lookup::Lookup;

use crate::commands::TypeUniverse;

/// Type universe holding every built-in module.
pub fn universe() -> TypeUniverse {
    let mut universe = TypeUniverse::new();
    universe
        .register_module::<General>("slashsync::builtin::General")
        .register_module::<Dice>("slashsync::builtin::Dice")
        .register_module::<Lookup>("slashsync::builtin::Lookup");
    universe
}
