//! [`Property`](crate::ops::Property) implementations for foreign types.

mod collections;
mod primitives;
mod wrappers;
