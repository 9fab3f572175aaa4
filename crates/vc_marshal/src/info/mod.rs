//! Static type information consumed by the type resolver.
//!
//! - [`TypeRef`] / [`TypeRefs`]: a field's declared type, possibly a union.
//! - [`ClassInfo`]: a struct-like host type, its marshal capability and its parent.
//! - [`EnumInfo`]: an enum type, its cases and their backing values.
//! - [`NonGenericCell`] / [`GenericCell`]: publish-once per-type storage.

// -----------------------------------------------------------------------------
// Modules

mod cell;
mod class_info;
mod enum_info;
mod type_ref;

// -----------------------------------------------------------------------------
// Exports

pub use cell::{GenericCell, NonGenericCell};
pub use class_info::{
    Capability, Class, ClassInfo, MAX_CAPABILITY_HOPS, ObjectVTable, ParentLink, class_from_dynamic,
};
pub use enum_info::{Backing, EnumCase, EnumInfo, EnumType, enum_from_dynamic, enum_into_dynamic};
pub use type_ref::{TypeRef, TypeRefs};
