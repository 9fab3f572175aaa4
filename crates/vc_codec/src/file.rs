use std::fs;
use std::io;
use std::path::Path;

use vc_marshal::Marshal;

use crate::{CodecError, Format};

/// Marshals `value` and encodes it as `F`.
///
/// # Examples
///
/// ```
/// use vc_codec::Json;
/// use vc_marshal::derive::Marshal;
///
/// #[derive(Marshal, Debug, PartialEq)]
/// struct Point {
///     x: i64,
///     y: i64,
/// }
///
/// let text = vc_codec::encode::<Json, _>(&Point { x: 1, y: 2 }, false).unwrap();
/// assert_eq!(text, r#"{"x":1,"y":2}"#);
///
/// let point: Point = vc_codec::decode::<Json, _>(&text, true).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
pub fn encode<F: Format, T: Marshal>(value: &T, pretty: bool) -> Result<String, CodecError> {
    let map = value.try_marshal()?;
    F::encode(&map, pretty)
}

/// Decodes `text` as `F` and unmarshals the resulting map.
pub fn decode<F: Format, T: Marshal>(text: &str, strict: bool) -> Result<T, CodecError> {
    let map = F::decode(text)?;
    Ok(T::unmarshal_with(&map, strict)?)
}

/// Marshals `value` and writes it to `path` as pretty-printed `F`.
///
/// The file is created or truncated.
pub fn save<F: Format, T: Marshal>(value: &T, path: impl AsRef<Path>) -> Result<(), CodecError> {
    let path = path.as_ref();
    let text = encode::<F, T>(value, true)?;

    fs::write(path, text.as_bytes()).map_err(|source| CodecError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    log::debug!("saved {} bytes of {} to '{}'", text.len(), F::NAME, path.display());
    Ok(())
}

/// Reads `path`, decodes it as `F` and unmarshals the resulting map.
pub fn load<F: Format, T: Marshal>(path: impl AsRef<Path>, strict: bool) -> Result<T, CodecError> {
    let path = path.as_ref();

    let text = fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => CodecError::NotFound {
            path: path.to_path_buf(),
        },
        _ => CodecError::Read {
            path: path.to_path_buf(),
            source,
        },
    })?;

    log::debug!("loaded {} bytes of {} from '{}'", text.len(), F::NAME, path.display());
    decode::<F, T>(&text, strict)
}
