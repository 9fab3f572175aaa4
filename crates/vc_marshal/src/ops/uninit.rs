use core::any::{Any, TypeId};

use crate::info::TypeRefs;
use crate::ops::{Dynamic, Property, ReflectRef};

/// A field that may never have been assigned.
///
/// Unlike `Option<T>`, where `None` marshals as null, an [`Uninit::Unset`]
/// field is left out of the marshaled map entirely. Fields with
/// `#[field(allow_uninitialized)]` must use this wrapper.
///
/// ```
/// use vc_marshal::ops::Uninit;
///
/// let mut name = Uninit::<String>::Unset;
/// assert!(!name.is_set());
///
/// name.set("Ada".to_owned());
/// assert_eq!(name.get().map(String::as_str), Some("Ada"));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Uninit<T> {
    Unset,
    Set(T),
}

impl<T> Uninit<T> {
    #[inline]
    pub const fn is_set(&self) -> bool {
        matches!(self, Self::Set(_))
    }

    #[inline]
    pub const fn get(&self) -> Option<&T> {
        match self {
            Self::Set(value) => Some(value),
            Self::Unset => None,
        }
    }

    #[inline]
    pub fn set(&mut self, value: T) {
        *self = Self::Set(value);
    }

    #[inline]
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Set(value) => Some(value),
            Self::Unset => None,
        }
    }
}

impl<T> Default for Uninit<T> {
    #[inline]
    fn default() -> Self {
        Self::Unset
    }
}

impl<T> From<T> for Uninit<T> {
    #[inline]
    fn from(value: T) -> Self {
        Self::Set(value)
    }
}

impl<T: Property> Property for Uninit<T> {
    fn declared() -> TypeRefs {
        T::declared()
    }

    fn as_reflect(&self) -> ReflectRef<'_> {
        match self {
            Self::Set(value) => value.as_reflect(),
            Self::Unset => ReflectRef::Unset,
        }
    }

    fn as_present(&self) -> Option<&dyn Any> {
        self.get().and_then(Property::as_present)
    }

    #[inline]
    fn present_type() -> Option<TypeId> {
        T::present_type()
    }

    fn into_dynamic(self) -> Dynamic {
        match self {
            Self::Set(value) => value.into_dynamic(),
            Self::Unset => Dynamic::Null,
        }
    }

    fn from_dynamic(value: Dynamic) -> Result<Self, Dynamic> {
        T::from_dynamic(value).map(Self::Set)
    }

    #[inline]
    fn unset() -> Option<Self> {
        Some(Self::Unset)
    }
}
