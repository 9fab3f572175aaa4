use alloc::vec::Vec;
use core::any::{Any, TypeId};

use crate::Value;
use crate::ops::{Dynamic, EnumValue, Property};

// -----------------------------------------------------------------------------
// EnumType

/// An enum with unit cases that may appear as a field type.
///
/// Usually implemented by `#[derive(MarshalEnum)]`.
pub trait EnumType: Property {
    fn enum_info() -> &'static EnumInfo;

    /// Index of this case in [`EnumInfo::cases`].
    fn case_index(&self) -> usize;

    fn from_case_index(index: usize) -> Option<Self>
    where
        Self: Sized;
}

/// Rebuilds an enum from a resolved [`Dynamic::Enum`] of the same type.
pub fn enum_from_dynamic<T: EnumType>(value: Dynamic) -> Result<T, Dynamic> {
    match value {
        Dynamic::Enum(case) if case.info().type_id() == TypeId::of::<T>() => {
            T::from_case_index(case.index()).ok_or(Dynamic::Enum(case))
        }
        other => Err(other),
    }
}

/// Returns the resolved form of an enum case.
#[inline]
pub fn enum_into_dynamic<T: EnumType>(value: &T) -> Dynamic {
    Dynamic::Enum(EnumValue::new(T::enum_info(), value.case_index()))
}

// -----------------------------------------------------------------------------
// EnumCase

#[derive(Clone, Debug, PartialEq)]
pub struct EnumCase {
    name: &'static str,
    value: Option<Value>,
}

impl EnumCase {
    #[inline]
    pub const fn new(name: &'static str) -> Self {
        Self { name, value: None }
    }

    /// A case carrying a scalar backing value.
    #[inline]
    pub fn backed(name: &'static str, value: impl Into<Value>) -> Self {
        Self {
            name,
            value: Some(value.into()),
        }
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }
}

// -----------------------------------------------------------------------------
// EnumInfo

/// Kind of backing value carried by every case of an enum.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backing {
    Int,
    String,
}

/// Static information about an [`EnumType`].
#[derive(Debug)]
pub struct EnumInfo {
    name: &'static str,
    type_id: TypeId,
    backing: Option<Backing>,
    cases: Vec<EnumCase>,
}

impl EnumInfo {
    /// Builds the info, inferring the backing kind from the cases.
    ///
    /// The enum counts as backed only if every case has a value of the same
    /// scalar kind.
    pub fn new<T: Any>(name: &'static str, cases: Vec<EnumCase>) -> Self {
        let backing = infer_backing(&cases);
        Self {
            name,
            type_id: TypeId::of::<T>(),
            backing,
            cases,
        }
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }

    #[inline]
    pub const fn backing(&self) -> Option<Backing> {
        self.backing
    }

    #[inline]
    pub const fn is_backed(&self) -> bool {
        self.backing.is_some()
    }

    #[inline]
    pub fn cases(&self) -> &[EnumCase] {
        &self.cases
    }

    #[inline]
    pub fn case(&self, index: usize) -> Option<&EnumCase> {
        self.cases.get(index)
    }

    /// Finds a case by name, ignoring ASCII case.
    pub fn index_of_name(&self, name: &str) -> Option<usize> {
        self.cases
            .iter()
            .position(|case| case.name.eq_ignore_ascii_case(name))
    }

    /// Finds a case by exact backing value.
    pub fn index_of_value(&self, value: &Value) -> Option<usize> {
        self.cases
            .iter()
            .position(|case| case.value.as_ref() == Some(value))
    }
}

fn infer_backing(cases: &[EnumCase]) -> Option<Backing> {
    let kind = |case: &EnumCase| match case.value {
        Some(Value::Int(_)) => Some(Backing::Int),
        Some(Value::String(_)) => Some(Backing::String),
        _ => None,
    };

    let first = kind(cases.first()?)?;
    cases
        .iter()
        .all(|case| kind(case) == Some(first))
        .then_some(first)
}

// -----------------------------------------------------------------------------
// Tests
