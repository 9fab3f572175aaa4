//! Type-directed marshaling between data-bearing types and ordered value maps.
//!
//! A type implementing [`Marshal`] can be turned into a [`ValueMap`] and rebuilt
//! from one. Each type carries a descriptor table (usually generated by
//! [`#[derive(Marshal)]`](derive::Marshal)) listing its properties, their
//! declared types and their per-field configuration. The table is validated and
//! resolved once into [`TypeBindings`](binding::TypeBindings), which the engine
//! walks on every call.
//!
//! ## Field resolution
//!
//! For every property the engine picks, in strict priority order:
//!
//! 1. the field's [`Parser`](descriptor::Parser), if one is configured;
//! 2. a nested marshalable object, trying each union candidate in order;
//! 3. an enum case, matched by backing value or by case name;
//! 4. the raw value.
//!
//! The result is then checked against the declared types before it is
//! assigned. Integers are accepted where floats are declared.
//!
//! ## Example
//!
//! ```
//! use vc_marshal::{Marshal, UnmarshalError, Value};
//! use vc_marshal::derive::Marshal;
//!
//! #[derive(Marshal, Debug, PartialEq)]
//! struct Person {
//!     #[field(name = "first-name")]
//!     first_name: String,
//!     age: i64,
//!     email: Option<String>,
//! }
//!
//! let person = Person { first_name: "John".into(), age: 42, email: None };
//! let map = person.marshal();
//!
//! let keys: Vec<&str> = map.keys().map(String::as_str).collect();
//! assert_eq!(keys, ["first-name", "age", "email"]);
//! assert_eq!(map["email"], Value::Null);
//!
//! assert_eq!(Person::unmarshal(&map).unwrap(), person);
//!
//! let mut partial = map.clone();
//! partial.shift_remove("first-name");
//! assert_eq!(
//!     Person::unmarshal(&partial),
//!     Err(UnmarshalError::MissingField("first-name".into())),
//! );
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Extern Self

// Derive output names `::vc_marshal`, unit tests inside this crate need the alias.
extern crate self as vc_marshal;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod error;
mod marshal;
mod value;

pub mod binding;
pub mod descriptor;
pub mod engine;
pub mod impls;
pub mod info;
pub mod ops;

#[cfg(feature = "serde")]
pub mod serde;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports;

pub use error::{ConfigError, UnmarshalError};
pub use marshal::{Marshal, validate};
pub use value::{Value, ValueMap};

#[cfg(feature = "derive")]
pub use vc_marshal_derive as derive;
