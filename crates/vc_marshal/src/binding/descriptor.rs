use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::{Any, TypeId, type_name};
use core::fmt;

use crate::Value;
use crate::descriptor::{FieldMetadata, Renamer};
use crate::info::TypeRefs;
use crate::ops::{Dynamic, Property};

// -----------------------------------------------------------------------------
// PropertyDescriptor

/// One declared property of `T`, before validation.
pub struct PropertyDescriptor<T> {
    pub(crate) name: &'static str,
    pub(crate) rust_type: &'static str,
    pub(crate) declared: fn() -> TypeRefs,
    pub(crate) present_type: Option<TypeId>,
    pub(crate) read: fn(&T) -> &dyn Property,
    pub(crate) write: fn(Dynamic) -> Result<Box<dyn Any>, Dynamic>,
    pub(crate) supports_unset: bool,
    pub(crate) metadata: Vec<FieldMetadata>,
    pub(crate) default: Option<fn() -> Value>,
}

impl<T> PropertyDescriptor<T> {
    /// Declares a property named `name` of type `F`, read through `read`.
    pub fn new<F: Property>(name: &'static str, read: fn(&T) -> &dyn Property) -> Self {
        Self {
            name,
            rust_type: type_name::<F>(),
            declared: F::declared,
            present_type: F::present_type(),
            read,
            write: write_slot::<F>,
            supports_unset: F::unset().is_some(),
            metadata: Vec::new(),
            default: None,
        }
    }

    /// Attaches field metadata. Attaching more than one entry is reported
    /// when the bindings are built.
    #[inline]
    pub fn with_metadata(mut self, metadata: FieldMetadata) -> Self {
        self.metadata.push(metadata);
        self
    }

    /// Sets the value used when the property's key is absent.
    #[inline]
    pub fn with_default(mut self, default: fn() -> Value) -> Self {
        self.default = Some(default);
        self
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

fn write_slot<F: Property>(value: Dynamic) -> Result<Box<dyn Any>, Dynamic> {
    F::from_dynamic(value).map(|value| Box::new(value) as Box<dyn Any>)
}

impl<T> fmt::Debug for PropertyDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyDescriptor")
            .field("name", &self.name)
            .field("type", &self.rust_type)
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// TypeDescriptor

/// The declared shape of a marshal type: its properties in declaration order
/// and an optional renamer.
///
/// Generated by `#[derive(Marshal)]`; may also be written by hand.
pub struct TypeDescriptor<T> {
    pub(crate) type_name: &'static str,
    pub(crate) renamer: Option<Renamer>,
    pub(crate) properties: Vec<PropertyDescriptor<T>>,
}

impl<T> TypeDescriptor<T> {
    #[inline]
    pub fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            renamer: None,
            properties: Vec::new(),
        }
    }

    #[inline]
    pub fn with_renamer(mut self, renamer: Renamer) -> Self {
        self.renamer = Some(renamer);
        self
    }

    #[inline]
    pub fn with_property(mut self, property: PropertyDescriptor<T>) -> Self {
        self.properties.push(property);
        self
    }

    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    #[inline]
    pub fn properties(&self) -> &[PropertyDescriptor<T>] {
        &self.properties
    }
}

impl<T> fmt::Debug for TypeDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("type_name", &self.type_name)
            .field("renamer", &self.renamer.is_some())
            .field("properties", &self.properties)
            .finish()
    }
}
