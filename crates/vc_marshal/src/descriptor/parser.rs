use alloc::string::String;
use alloc::vec::Vec;
use core::any::{Any, TypeId, type_name};

use thiserror::Error;

use crate::Value;
use crate::ops::{Dynamic, Property};

// -----------------------------------------------------------------------------
// ParseError

/// A [`Parser`] rejected its input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ParseError {
    message: String,
}

impl ParseError {
    #[inline]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The input had the wrong raw type.
    pub fn unexpected(expected: &str, found: &Value) -> Self {
        Self::new(alloc::format!(
            "expected {expected}, got '{}'",
            found.type_name()
        ))
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

// -----------------------------------------------------------------------------
// Parser

/// A user-supplied converter owning one field in both directions.
///
/// A parser takes over the field completely: nested object, enum and element
/// resolution are skipped, only the declared-type check still applies to its
/// output. Null values of nullable fields bypass the parser.
///
/// # Examples
///
/// ```
/// use vc_marshal::Value;
/// use vc_marshal::descriptor::{ParseError, Parser};
///
/// /// Stores a list of tags as one comma-separated string.
/// #[derive(Default)]
/// struct CommaList;
///
/// impl Parser for CommaList {
///     type Output = Vec<String>;
///
///     fn parse(&self, raw: Value) -> Result<Vec<String>, ParseError> {
///         let text = raw.as_str().ok_or_else(|| ParseError::unexpected("a string", &raw))?;
///         Ok(text.split(',').map(str::to_owned).collect())
///     }
///
///     fn serialize(&self, value: &Vec<String>) -> Value {
///         Value::from(value.join(","))
///     }
/// }
///
/// let tags = CommaList.parse(Value::from("a,b")).unwrap();
/// assert_eq!(tags, ["a", "b"]);
/// assert_eq!(CommaList.serialize(&tags), Value::from("a,b"));
/// ```
pub trait Parser: Send + Sync + 'static {
    type Output: Property;

    fn parse(&self, raw: Value) -> Result<Self::Output, ParseError>;

    fn serialize(&self, value: &Self::Output) -> Value;
}

// -----------------------------------------------------------------------------
// DynParser

/// Object-safe form of [`Parser`], stored in field descriptors.
pub trait DynParser: Send + Sync {
    fn parser_name(&self) -> &'static str;

    /// The `TypeId` of [`Parser::Output`].
    fn output_type_id(&self) -> TypeId;

    fn parse_dynamic(&self, raw: Value) -> Result<Dynamic, ParseError>;

    /// Serializes `value`, or returns `None` if it is not the parser's output type.
    fn serialize_any(&self, value: &dyn Any) -> Option<Value>;
}

impl<P: Parser> DynParser for P {
    #[inline]
    fn parser_name(&self) -> &'static str {
        type_name::<P>()
    }

    #[inline]
    fn output_type_id(&self) -> TypeId {
        TypeId::of::<P::Output>()
    }

    fn parse_dynamic(&self, raw: Value) -> Result<Dynamic, ParseError> {
        self.parse(raw).map(Property::into_dynamic)
    }

    fn serialize_any(&self, value: &dyn Any) -> Option<Value> {
        value
            .downcast_ref::<P::Output>()
            .map(|value| self.serialize(value))
    }
}

// -----------------------------------------------------------------------------
// ElementParser

/// Applies an element parser to every element of a list.
///
/// Parse failures name the index of the rejected element.
///
/// # Examples
///
/// ```
/// use vc_marshal::Value;
/// use vc_marshal::descriptor::{ElementParser, ParseError, Parser};
///
/// #[derive(Default)]
/// struct Upper;
///
/// impl Parser for Upper {
///     type Output = String;
///
///     fn parse(&self, raw: Value) -> Result<String, ParseError> {
///         let text = raw.as_str().ok_or_else(|| ParseError::unexpected("a string", &raw))?;
///         Ok(text.to_uppercase())
///     }
///
///     fn serialize(&self, value: &String) -> Value {
///         Value::from(value.to_lowercase())
///     }
/// }
///
/// let codes = ElementParser::<Upper>::default();
/// let parsed = codes.parse(Value::List(vec!["de".into(), "fr".into()])).unwrap();
/// assert_eq!(parsed, ["DE", "FR"]);
///
/// let err = codes.parse(Value::List(vec!["de".into(), Value::Int(3)])).unwrap_err();
/// assert_eq!(err.message(), "element 1: expected a string, got 'int'");
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct ElementParser<P>(pub P);

impl<P: Parser> Parser for ElementParser<P> {
    type Output = Vec<P::Output>;

    fn parse(&self, raw: Value) -> Result<Self::Output, ParseError> {
        let Value::List(items) = raw else {
            return Err(ParseError::unexpected("a list", &raw));
        };
        items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                self.0.parse(item).map_err(|err| {
                    ParseError::new(alloc::format!("element {index}: {}", err.message()))
                })
            })
            .collect()
    }

    fn serialize(&self, value: &Self::Output) -> Value {
        Value::List(value.iter().map(|item| self.0.serialize(item)).collect())
    }
}
