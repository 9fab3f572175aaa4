//! Runtime views of property values.
//!
//! - [`Property`]: implemented by every type a marshal field may have.
//! - [`ReflectRef`]: a borrowed view used when marshaling.
//! - [`Dynamic`]: an owned, resolved value produced when unmarshaling.
//! - [`Uninit`]: a field wrapper with an observable never-assigned state.

// -----------------------------------------------------------------------------
// Modules

mod dynamic;
mod property;
mod reflect_ref;
mod uninit;

// -----------------------------------------------------------------------------
// Exports

pub use dynamic::{Dynamic, EnumValue, ObjectValue};
pub use property::Property;
pub use reflect_ref::{EnumRef, ObjectRef, ReflectRef};
pub use uninit::Uninit;
