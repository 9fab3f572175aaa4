//! Resolved per-type property bindings.
//!
//! A [`TypeDescriptor`] lists a type's properties as declared. Building it
//! into [`TypeBindings`] normalizes field metadata, computes serialized names,
//! resolves declared types into [`TypeSet`]s and validates the configuration.
//! Bindings are built once per type and cached by
//! [`Marshal::bindings`](crate::Marshal::bindings).

// -----------------------------------------------------------------------------
// Modules

mod descriptor;
mod resolver;
mod type_bindings;
mod type_set;

// -----------------------------------------------------------------------------
// Exports

pub use descriptor::{PropertyDescriptor, TypeDescriptor};
pub use resolver::resolve;
pub use type_bindings::{PropertyBinding, TypeBindings};
pub use type_set::{ObjectTarget, Primitive, TargetType, TypeSet};

pub(crate) use type_set::UNTYPED;
