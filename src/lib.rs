//! Facade over the VoidCraft data marshaling crates.
//!
//! - [`marshal`]: the field-resolution engine (`Marshal`, `Value`, parsers, derive macros).
//! - [`codec`]: JSON / RON / YAML text codecs and file load/save built on top of it.
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use vc_codec as codec;
pub use vc_marshal as marshal;
