use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::any::Any;
use core::fmt;

use indexmap::IndexMap;

use crate::Value;
use crate::info::{Class, ClassInfo, EnumCase, EnumInfo};

// -----------------------------------------------------------------------------
// Dynamic

/// An owned value after resolution.
///
/// Raw [`Value`]s become `Dynamic`s once nested objects and enum cases have
/// been recognized. The type check runs on this form, then the value is
/// converted into the field's Rust type through
/// [`Property::from_dynamic`](crate::ops::Property::from_dynamic).
#[derive(Debug)]
pub enum Dynamic {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<Dynamic>),
    Map(IndexMap<String, Dynamic>),
    Object(ObjectValue),
    Enum(EnumValue),
}

impl Dynamic {
    /// Returns the runtime type name used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Object(object) => object.class.name(),
            Self::Enum(case) => case.info.name(),
        }
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Converts back into a raw value.
    ///
    /// Fails, returning `self`, if an object is found anywhere inside.
    /// Enum cases become their backing value or, if unbacked, their name.
    pub fn into_value(self) -> Result<Value, Dynamic> {
        Ok(match self {
            Self::Null => Value::Null,
            Self::Bool(v) => Value::Bool(v),
            Self::Int(v) => Value::Int(v),
            Self::Float(v) => Value::Float(v),
            Self::String(v) => Value::String(v),
            Self::Enum(case) => case.to_value(),
            Self::Object(object) => return Err(Self::Object(object)),
            Self::List(items) => {
                if items.iter().any(Dynamic::contains_object) {
                    return Err(Self::List(items));
                }
                Value::List(items.into_iter().filter_map(|item| item.into_value().ok()).collect())
            }
            Self::Map(entries) => {
                if entries.values().any(Dynamic::contains_object) {
                    return Err(Self::Map(entries));
                }
                Value::Map(
                    entries
                        .into_iter()
                        .filter_map(|(key, item)| item.into_value().ok().map(|item| (key, item)))
                        .collect(),
                )
            }
        })
    }

    fn contains_object(&self) -> bool {
        match self {
            Self::Object(_) => true,
            Self::List(items) => items.iter().any(Dynamic::contains_object),
            Self::Map(entries) => entries.values().any(Dynamic::contains_object),
            _ => false,
        }
    }
}

impl From<Value> for Dynamic {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(v) => Self::Bool(v),
            Value::Int(v) => Self::Int(v),
            Value::Float(v) => Self::Float(v),
            Value::String(v) => Self::String(v),
            Value::List(items) => Self::List(items.into_iter().map(Dynamic::from).collect()),
            Value::Map(entries) => Self::Map(
                entries
                    .into_iter()
                    .map(|(key, item)| (key, Dynamic::from(item)))
                    .collect(),
            ),
        }
    }
}

// -----------------------------------------------------------------------------
// ObjectValue

/// An owned, type-erased class instance.
pub struct ObjectValue {
    value: Box<dyn Any>,
    class: &'static ClassInfo,
}

impl ObjectValue {
    #[inline]
    pub fn new<T: Class>(value: T) -> Self {
        Self {
            value: Box::new(value),
            class: T::class_info(),
        }
    }

    /// Wraps an already boxed instance of `class`.
    #[inline]
    pub fn from_boxed(value: Box<dyn Any>, class: &'static ClassInfo) -> Self {
        Self { value, class }
    }

    #[inline]
    pub fn class(&self) -> &'static ClassInfo {
        self.class
    }

    pub fn downcast<T: Any>(self) -> Result<T, Self> {
        let class = self.class;
        self.value
            .downcast::<T>()
            .map(|value| *value)
            .map_err(|value| Self { value, class })
    }
}

impl fmt::Debug for ObjectValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ObjectValue").field(&self.class.name()).finish()
    }
}

// -----------------------------------------------------------------------------
// EnumValue

/// A resolved enum case.
#[derive(Clone, Copy, Debug)]
pub struct EnumValue {
    info: &'static EnumInfo,
    index: usize,
}

impl EnumValue {
    #[inline]
    pub fn new(info: &'static EnumInfo, index: usize) -> Self {
        Self { info, index }
    }

    #[inline]
    pub fn info(&self) -> &'static EnumInfo {
        self.info
    }

    #[inline]
    pub const fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn case(&self) -> Option<&'static EnumCase> {
        self.info.case(self.index)
    }

    fn to_value(self) -> Value {
        match self.case() {
            Some(case) => case
                .value()
                .cloned()
                .unwrap_or_else(|| Value::from(case.name())),
            None => Value::Null,
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::Dynamic;
    use crate::Value;

    #[test]
    fn raw_values_round_trip() {
        let raw: Value = [("tags", Value::from(vec![Value::from("a")])), ("n", Value::from(3))]
            .into_iter()
            .collect();

        let dynamic = Dynamic::from(raw.clone());
        assert_eq!(dynamic.type_name(), "map");
        assert_eq!(dynamic.into_value().unwrap(), raw);
    }

    #[test]
    fn null_is_null() {
        assert!(Dynamic::from(Value::Null).is_null());
        assert!(!Dynamic::Int(0).is_null());
    }
}
