use alloc::boxed::Box;
use core::any::{Any, TypeId};

use crate::Value;
use crate::info::TypeRefs;
use crate::ops::{Dynamic, Property, ReflectRef};

// -----------------------------------------------------------------------------
// Option

impl<T: Property> Property for Option<T> {
    #[inline]
    fn declared() -> TypeRefs {
        T::declared().nullable()
    }

    fn as_reflect(&self) -> ReflectRef<'_> {
        match self {
            Some(value) => value.as_reflect(),
            None => ReflectRef::Null,
        }
    }

    fn as_present(&self) -> Option<&dyn Any> {
        self.as_ref().and_then(Property::as_present)
    }

    #[inline]
    fn present_type() -> Option<TypeId> {
        T::present_type()
    }

    fn into_dynamic(self) -> Dynamic {
        match self {
            Some(value) => value.into_dynamic(),
            None => Dynamic::Null,
        }
    }

    fn from_dynamic(value: Dynamic) -> Result<Self, Dynamic> {
        match value {
            Dynamic::Null => Ok(None),
            other => T::from_dynamic(other).map(Some),
        }
    }
}

// -----------------------------------------------------------------------------
// Box

impl<T: Property> Property for Box<T> {
    #[inline]
    fn declared() -> TypeRefs {
        T::declared()
    }

    #[inline]
    fn as_reflect(&self) -> ReflectRef<'_> {
        (**self).as_reflect()
    }

    #[inline]
    fn as_present(&self) -> Option<&dyn Any> {
        (**self).as_present()
    }

    #[inline]
    fn present_type() -> Option<TypeId> {
        T::present_type()
    }

    #[inline]
    fn into_dynamic(self) -> Dynamic {
        (*self).into_dynamic()
    }

    #[inline]
    fn from_dynamic(value: Dynamic) -> Result<Self, Dynamic> {
        T::from_dynamic(value).map(Box::new)
    }

    #[inline]
    fn unset() -> Option<Self> {
        T::unset().map(Box::new)
    }
}

// -----------------------------------------------------------------------------
// Value

impl Property for Value {
    #[inline]
    fn declared() -> TypeRefs {
        TypeRefs::untyped()
    }

    #[inline]
    fn as_reflect(&self) -> ReflectRef<'_> {
        ReflectRef::Value(self)
    }

    #[inline]
    fn as_present(&self) -> Option<&dyn Any> {
        (!self.is_null()).then_some(self as &dyn Any)
    }

    #[inline]
    fn into_dynamic(self) -> Dynamic {
        Dynamic::from(self)
    }

    #[inline]
    fn from_dynamic(value: Dynamic) -> Result<Self, Dynamic> {
        value.into_value()
    }
}
