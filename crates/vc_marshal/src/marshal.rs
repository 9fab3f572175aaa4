use crate::binding::{TypeBindings, TypeDescriptor};
use crate::engine::{self, Slots};
use crate::info::Class;
use crate::{ConfigError, UnmarshalError, ValueMap};

/// A type that can be marshaled to and from a [`ValueMap`].
///
/// Implement it with `#[derive(Marshal)]`. The derive generates the
/// descriptor table, caches the resolved bindings and assembles instances
/// from unmarshaled slots.
///
/// # Attributes
///
/// - `#[marshal(renamer = path)]` on the type: a `fn(&str) -> String` applied
///   to every property without an explicit name.
/// - `#[field(name = "..", parser = Type, allow_uninitialized, enum_by_name)]`
///   on a field: its [`FieldMetadata`](crate::descriptor::FieldMetadata).
/// - `#[marshal(default = expr)]` on a field: the value used when its key is
///   absent, anything convertible into [`Value`](crate::Value).
/// - `#[marshal(skip)]` on a field: not marshaled, rebuilt through
///   [`Default`].
pub trait Marshal: Class + Sized {
    /// The type's declared properties, in declaration order.
    fn descriptor() -> TypeDescriptor<Self>;

    /// The type's validated bindings, built once and cached.
    ///
    /// A configuration error is cached as well and returned on every call.
    fn bindings() -> Result<&'static TypeBindings<Self>, ConfigError>;

    /// Builds an instance from converted property values.
    fn assemble(slots: &mut Slots) -> Result<Self, UnmarshalError>;

    /// Converts `self` into a map keyed by serialized property names.
    fn try_marshal(&self) -> Result<ValueMap, ConfigError> {
        engine::marshal(self)
    }

    /// Converts `self` into a map keyed by serialized property names.
    ///
    /// # Panics
    ///
    /// If the type, or a type it contains, is misconfigured. Use
    /// [`Marshal::try_marshal`] or [`validate`] to handle that case.
    fn marshal(&self) -> ValueMap {
        match self.try_marshal() {
            Ok(map) => map,
            Err(err) => panic!("cannot marshal '{}': {err}", Self::class_info().name()),
        }
    }

    /// Rebuilds an instance in strict mode.
    fn unmarshal(data: &ValueMap) -> Result<Self, UnmarshalError> {
        engine::unmarshal(data, true)
    }

    /// Rebuilds an instance. See [`engine::unmarshal`] for the meaning of `strict`.
    fn unmarshal_with(data: &ValueMap, strict: bool) -> Result<Self, UnmarshalError> {
        engine::unmarshal(data, strict)
    }
}

/// Builds the bindings of `T`, surfacing configuration errors eagerly.
#[inline]
pub fn validate<T: Marshal>() -> Result<(), ConfigError> {
    T::bindings().map(|_| ())
}
