use alloc::vec::Vec;
use core::any::Any;
use core::fmt;

use crate::Value;
use crate::info::{ClassInfo, EnumCase, EnumInfo};
use crate::ops::Property;

/// A borrowed view of a property value.
pub enum ReflectRef<'a> {
    /// A field that was never assigned.
    Unset,
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(&'a str),
    List(Vec<&'a dyn Property>),
    Map(Vec<(&'a str, &'a dyn Property)>),
    Object(ObjectRef<'a>),
    Enum(EnumRef),
    /// An untyped raw value.
    Value(&'a Value),
}

impl ReflectRef<'_> {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Unset => "unset",
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Object(object) => object.class.name(),
            Self::Enum(case) => case.info.name(),
            Self::Value(value) => value.type_name(),
        }
    }
}

impl fmt::Debug for ReflectRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ReflectRef({})", self.type_name())
    }
}

// -----------------------------------------------------------------------------
// ObjectRef

/// A borrowed class instance.
#[derive(Clone, Copy)]
pub struct ObjectRef<'a> {
    value: &'a dyn Any,
    class: &'static ClassInfo,
}

impl<'a> ObjectRef<'a> {
    #[inline]
    pub fn new(value: &'a dyn Any, class: &'static ClassInfo) -> Self {
        Self { value, class }
    }

    #[inline]
    pub fn value(&self) -> &'a dyn Any {
        self.value
    }

    #[inline]
    pub fn class(&self) -> &'static ClassInfo {
        self.class
    }
}

// -----------------------------------------------------------------------------
// EnumRef

/// A case of an enum.
#[derive(Clone, Copy, Debug)]
pub struct EnumRef {
    info: &'static EnumInfo,
    index: usize,
}

impl EnumRef {
    #[inline]
    pub fn new(info: &'static EnumInfo, index: usize) -> Self {
        Self { info, index }
    }

    #[inline]
    pub fn info(&self) -> &'static EnumInfo {
        self.info
    }

    #[inline]
    pub fn case(&self) -> Option<&'static EnumCase> {
        self.info.case(self.index)
    }
}
