use vc_marshal::serde::ValueMapRef;
use vc_marshal::{Value, ValueMap};

use crate::CodecError;

/// A text representation of value maps.
///
/// Formats are zero-sized markers selected by type, as in
/// `vc_codec::load::<Json, Config>(path, true)`.
pub trait Format {
    /// Name used in error messages.
    const NAME: &'static str;

    fn encode(map: &ValueMap, pretty: bool) -> Result<String, CodecError>;

    /// Parses a single document of any shape.
    fn parse(text: &str) -> Result<Value, CodecError>;

    /// Parses `text`, which must hold a single map.
    fn decode(text: &str) -> Result<ValueMap, CodecError> {
        match Self::parse(text)? {
            Value::Map(map) => Ok(map),
            _ => Err(CodecError::NotAnObject),
        }
    }
}

// -----------------------------------------------------------------------------
// Json

/// JSON through `serde_json`.
#[cfg(feature = "json")]
#[derive(Clone, Copy, Debug, Default)]
pub struct Json;

#[cfg(feature = "json")]
impl Format for Json {
    const NAME: &'static str = "JSON";

    fn encode(map: &ValueMap, pretty: bool) -> Result<String, CodecError> {
        let encoded = if pretty {
            serde_json::to_string_pretty(&ValueMapRef(map))
        } else {
            serde_json::to_string(&ValueMapRef(map))
        };
        encoded.map_err(|err| CodecError::Encode {
            format: Self::NAME,
            message: err.to_string(),
        })
    }

    fn parse(text: &str) -> Result<Value, CodecError> {
        serde_json::from_str(text).map_err(|err| CodecError::Decode {
            format: Self::NAME,
            message: err.to_string(),
        })
    }
}

// -----------------------------------------------------------------------------
// Ron

/// RON through `ron`.
#[cfg(feature = "ron")]
#[derive(Clone, Copy, Debug, Default)]
pub struct Ron;

#[cfg(feature = "ron")]
impl Format for Ron {
    const NAME: &'static str = "RON";

    fn encode(map: &ValueMap, pretty: bool) -> Result<String, CodecError> {
        let encoded = if pretty {
            ron::ser::to_string_pretty(&ValueMapRef(map), ron::ser::PrettyConfig::default())
        } else {
            ron::to_string(&ValueMapRef(map))
        };
        encoded.map_err(|err| CodecError::Encode {
            format: Self::NAME,
            message: err.to_string(),
        })
    }

    fn parse(text: &str) -> Result<Value, CodecError> {
        ron::from_str(text).map_err(|err| CodecError::Decode {
            format: Self::NAME,
            message: err.to_string(),
        })
    }
}

// -----------------------------------------------------------------------------
// Yaml

/// YAML through `serde_yaml`. Output is always block style.
#[cfg(feature = "yaml")]
#[derive(Clone, Copy, Debug, Default)]
pub struct Yaml;

#[cfg(feature = "yaml")]
impl Format for Yaml {
    const NAME: &'static str = "YAML";

    fn encode(map: &ValueMap, _pretty: bool) -> Result<String, CodecError> {
        serde_yaml::to_string(&ValueMapRef(map)).map_err(|err| CodecError::Encode {
            format: Self::NAME,
            message: err.to_string(),
        })
    }

    fn parse(text: &str) -> Result<Value, CodecError> {
        serde_yaml::from_str(text).map_err(|err| CodecError::Decode {
            format: Self::NAME,
            message: err.to_string(),
        })
    }
}

// -----------------------------------------------------------------------------
// Tests
