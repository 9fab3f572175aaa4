use alloc::string::String;
use core::any::Any;

use crate::info::{TypeRef, TypeRefs};
use crate::ops::{Dynamic, Property, ReflectRef};

// -----------------------------------------------------------------------------
// Integers

macro_rules! impl_int_property {
    ($($ty:ty),*) => {$(
        impl Property for $ty {
            #[inline]
            fn declared() -> TypeRefs {
                TypeRefs::single(TypeRef::Int)
            }

            #[inline]
            fn as_reflect(&self) -> ReflectRef<'_> {
                ReflectRef::Int(i64::from(*self))
            }

            #[inline]
            fn as_present(&self) -> Option<&dyn Any> {
                Some(self)
            }

            #[inline]
            fn into_dynamic(self) -> Dynamic {
                Dynamic::Int(i64::from(self))
            }

            fn from_dynamic(value: Dynamic) -> Result<Self, Dynamic> {
                match value {
                    Dynamic::Int(v) => <$ty>::try_from(v).map_err(|_| Dynamic::Int(v)),
                    other => Err(other),
                }
            }
        }
    )*};
}

impl_int_property!(i8, i16, i32, i64, u8, u16, u32);

// -----------------------------------------------------------------------------
// Floats

macro_rules! impl_float_property {
    ($($ty:ty),*) => {$(
        impl Property for $ty {
            #[inline]
            fn declared() -> TypeRefs {
                TypeRefs::single(TypeRef::Float)
            }

            #[inline]
            fn as_reflect(&self) -> ReflectRef<'_> {
                ReflectRef::Float(f64::from(*self))
            }

            #[inline]
            fn as_present(&self) -> Option<&dyn Any> {
                Some(self)
            }

            #[inline]
            fn into_dynamic(self) -> Dynamic {
                Dynamic::Float(f64::from(self))
            }

            #[allow(
                clippy::cast_possible_truncation,
                clippy::cast_precision_loss,
                clippy::unnecessary_cast,
                reason = "integers widen into floats"
            )]
            fn from_dynamic(value: Dynamic) -> Result<Self, Dynamic> {
                match value {
                    Dynamic::Float(v) => Ok(v as $ty),
                    Dynamic::Int(v) => Ok(v as $ty),
                    other => Err(other),
                }
            }
        }
    )*};
}

impl_float_property!(f32, f64);

// -----------------------------------------------------------------------------
// bool / String

impl Property for bool {
    #[inline]
    fn declared() -> TypeRefs {
        TypeRefs::single(TypeRef::Bool)
    }

    #[inline]
    fn as_reflect(&self) -> ReflectRef<'_> {
        ReflectRef::Bool(*self)
    }

    #[inline]
    fn as_present(&self) -> Option<&dyn Any> {
        Some(self)
    }

    #[inline]
    fn into_dynamic(self) -> Dynamic {
        Dynamic::Bool(self)
    }

    fn from_dynamic(value: Dynamic) -> Result<Self, Dynamic> {
        match value {
            Dynamic::Bool(v) => Ok(v),
            other => Err(other),
        }
    }
}

impl Property for String {
    #[inline]
    fn declared() -> TypeRefs {
        TypeRefs::single(TypeRef::String)
    }

    #[inline]
    fn as_reflect(&self) -> ReflectRef<'_> {
        ReflectRef::String(self)
    }

    #[inline]
    fn as_present(&self) -> Option<&dyn Any> {
        Some(self)
    }

    #[inline]
    fn into_dynamic(self) -> Dynamic {
        Dynamic::String(self)
    }

    fn from_dynamic(value: Dynamic) -> Result<Self, Dynamic> {
        match value {
            Dynamic::String(v) => Ok(v),
            other => Err(other),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests
