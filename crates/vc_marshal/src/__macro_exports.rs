//! Items used by code generated from `vc_marshal_derive`. Not public API.

use crate::ConfigError;
use crate::binding::TypeBindings;

pub mod alloc_utils {
    pub use alloc::vec;
}

/// The cached outcome of building a type's bindings.
pub type BindingsResult<T> = Result<TypeBindings<T>, ConfigError>;

/// Borrows a cached build outcome, cloning a cached error.
#[inline]
pub fn cached_bindings<T>(
    cached: &'static BindingsResult<T>,
) -> Result<&'static TypeBindings<T>, ConfigError> {
    cached.as_ref().map_err(Clone::clone)
}
