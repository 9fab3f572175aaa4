//! `serde` support for [`Value`](crate::Value).
//!
//! A [`Value`](crate::Value) serializes as the format's own null, booleans,
//! numbers, strings, sequences and maps. Map keys keep their order in both
//! directions.
//!
//! Deserialization is self-describing and reads the following:
//!
//! - unit and `none` as [`Value::Null`](crate::Value::Null), `some(x)` as `x`;
//! - signed integers as [`Value::Int`](crate::Value::Int);
//! - unsigned integers as [`Value::Int`](crate::Value::Int), or as
//!   [`Value::Float`](crate::Value::Float) above `i64::MAX`;
//! - maps with string keys only.

mod de;
mod ser;

pub use ser::ValueMapRef;

// -----------------------------------------------------------------------------
// Tests
