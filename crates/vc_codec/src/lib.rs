//! Text formats and files for [`Marshal`](vc_marshal::Marshal) types.
//!
//! A [`Format`] turns a [`ValueMap`](vc_marshal::ValueMap) into text and back.
//! The free functions combine a format with marshaling:
//!
//! - [`encode`] / [`decode`] between an instance and a string;
//! - [`save`] / [`load`] between an instance and a file.
//!
//! Failures are reported as [`CodecError`], which keeps file, text and
//! marshal problems apart.
//!
//! ## Features
//!
//! - `json`: the [`Json`] format through `serde_json`.
//! - `ron`: the [`Ron`] format through `ron`.
//! - `yaml`: the [`Yaml`] format through `serde_yaml`.
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Modules

mod error;
mod file;
mod format;

// -----------------------------------------------------------------------------
// Exports

pub use error::CodecError;
pub use file::{decode, encode, load, save};
pub use format::Format;

#[cfg(feature = "json")]
pub use format::Json;

#[cfg(feature = "ron")]
pub use format::Ron;

#[cfg(feature = "yaml")]
pub use format::Yaml;
