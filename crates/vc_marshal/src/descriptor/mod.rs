//! Per-field configuration.
//!
//! A property may carry [`FieldMetadata`] overriding its serialized name,
//! attaching a [`Parser`], allowing it to stay uninitialized or matching its
//! enum cases by name. The metadata is normalized into a [`FieldDescriptor`]
//! when the owning type's bindings are built.

// -----------------------------------------------------------------------------
// Modules

mod field;
mod parser;

// -----------------------------------------------------------------------------
// Exports

pub use field::{FieldDescriptor, FieldMetadata, Renamer};
pub use parser::{DynParser, ElementParser, ParseError, Parser};
