use alloc::string::String;
use alloc::vec::Vec;

use thiserror::Error;

use crate::descriptor::ParseError;

// -----------------------------------------------------------------------------
// ConfigError

/// A type's marshal configuration is invalid.
///
/// These are detected when a type's bindings are first built, before any
/// field of any instance is read or written. They are memoized together with
/// the bindings, so every later call on the same type reports the same error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("property '{property}' of '{type_name}' has more than one field descriptor")]
    DuplicateMetadata {
        type_name: &'static str,
        property: &'static str,
    },

    #[error("the type '{type_name}' is not a marshal type")]
    NotMarshalable { type_name: &'static str },

    #[error("capability lookup for '{type_name}' exceeded {max_hops} ancestor hops")]
    CapabilityDepthExceeded {
        type_name: &'static str,
        max_hops: usize,
    },

    #[error(
        "property '{property}' of '{type_name}' allows being uninitialized, \
         but its type has no unset state"
    )]
    UninitUnsupported {
        type_name: &'static str,
        property: &'static str,
    },

    #[error("properties '{first}' and '{second}' of '{type_name}' both serialize as '{name}'")]
    DuplicateName {
        type_name: &'static str,
        first: &'static str,
        second: &'static str,
        name: String,
    },

    #[error("parser '{parser}' of property '{property}' of '{type_name}' does not produce the property's type")]
    ParserMismatch {
        type_name: &'static str,
        property: &'static str,
        parser: &'static str,
    },
}

// -----------------------------------------------------------------------------
// UnmarshalError

/// Reconstructing an instance from a [`ValueMap`](crate::ValueMap) failed.
///
/// No partially assigned instance is ever returned alongside this error.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum UnmarshalError {
    /// Strict mode: a required field is absent or null.
    #[error("missing field '{0}'")]
    MissingField(String),

    /// The resolved value's runtime type is not one of the declared types.
    #[error("field '{field}' must be {}, got '{actual}'", expected_phrase(.expected))]
    TypeMismatch {
        field: String,
        expected: Vec<String>,
        actual: String,
    },

    /// A user-supplied parser rejected the raw value.
    #[error("field '{field}' could not be parsed: {source}")]
    Parse {
        field: String,
        #[source]
        source: ParseError,
    },

    #[error(transparent)]
    Configuration(#[from] ConfigError),
}

impl UnmarshalError {
    /// Returns `true` for errors describing the input's shape or types.
    ///
    /// Union candidates that fail with such an error are skipped silently.
    #[inline]
    pub const fn is_shape_error(&self) -> bool {
        matches!(self, Self::MissingField(_) | Self::TypeMismatch { .. })
    }

    pub(crate) fn mismatch(field: &str, expected: Vec<String>, actual: &str) -> Self {
        Self::TypeMismatch {
            field: field.into(),
            expected,
            actual: actual.into(),
        }
    }
}

fn expected_phrase(expected: &[String]) -> String {
    match expected {
        [single] => alloc::format!("of type '{single}'"),
        many => alloc::format!("one of the types ({})", many.join(", ")),
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use alloc::vec;

    use super::{ConfigError, UnmarshalError};

    #[test]
    fn mismatch_messages() {
        let single = UnmarshalError::mismatch("age", vec!["int".into()], "string");
        assert_eq!(
            single.to_string(),
            "field 'age' must be of type 'int', got 'string'"
        );

        let union = UnmarshalError::mismatch("id", vec!["int".into(), "string".into()], "bool");
        assert_eq!(
            union.to_string(),
            "field 'id' must be one of the types (int, string), got 'bool'"
        );
    }

    #[test]
    fn shape_errors() {
        assert!(UnmarshalError::MissingField("x".into()).is_shape_error());
        let config = UnmarshalError::from(ConfigError::NotMarshalable { type_name: "Foo" });
        assert!(!config.is_shape_error());
        assert_eq!(config.to_string(), "the type 'Foo' is not a marshal type");
    }
}
