use core::any::{Any, TypeId};

use crate::info::TypeRefs;
use crate::ops::{Dynamic, ReflectRef};

/// A type that can be the declared type of a marshal field.
///
/// The trait connects a Rust type to the engine's three views of it:
///
/// - its declared types, read once when bindings are resolved;
/// - a borrowed [`ReflectRef`] read when marshaling;
/// - an owned [`Dynamic`] built when unmarshaling.
///
/// Implementations exist for `bool`, integers, floats, [`String`], [`Option`],
/// [`Vec`], string-keyed [`IndexMap`](indexmap::IndexMap)s, [`Box`],
/// [`Value`](crate::Value) and [`Uninit`](crate::ops::Uninit). Derived
/// classes, enums and unions implement it through their derive macros.
pub trait Property: Any + Send + Sync {
    /// The types this property accepts.
    fn declared() -> TypeRefs
    where
        Self: Sized;

    fn as_reflect(&self) -> ReflectRef<'_>;

    /// The value handed to a field parser, `None` if absent.
    ///
    /// For wrappers such as [`Option`] this is the wrapped value.
    fn as_present(&self) -> Option<&dyn Any>;

    /// The type behind [`as_present`](Property::as_present), `None` when it
    /// depends on the value.
    #[inline]
    fn present_type() -> Option<TypeId>
    where
        Self: Sized,
    {
        Some(TypeId::of::<Self>())
    }

    fn into_dynamic(self) -> Dynamic
    where
        Self: Sized;

    /// Converts a resolved value back, returning it unchanged on failure.
    fn from_dynamic(value: Dynamic) -> Result<Self, Dynamic>
    where
        Self: Sized;

    /// The never-assigned state, if the type has one.
    #[inline]
    fn unset() -> Option<Self>
    where
        Self: Sized,
    {
        None
    }
}
