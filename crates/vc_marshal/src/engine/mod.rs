//! The marshal and unmarshal engines.
//!
//! Both walk a type's [`TypeBindings`](crate::binding::TypeBindings) in
//! declaration order. They are usually reached through the
//! [`Marshal`](crate::Marshal) trait rather than called directly.

// -----------------------------------------------------------------------------
// Modules

mod checker;
mod marshal;
mod slots;
mod unmarshal;

// -----------------------------------------------------------------------------
// Exports

pub use checker::check;
pub use marshal::marshal;
pub use slots::Slots;
pub use unmarshal::unmarshal;
