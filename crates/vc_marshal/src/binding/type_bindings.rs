use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::any::Any;
use core::fmt;

use crate::binding::{TypeDescriptor, TypeSet, resolve};
use crate::descriptor::FieldDescriptor;
use crate::ops::{Dynamic, Property};
use crate::{ConfigError, Value};

// -----------------------------------------------------------------------------
// PropertyBinding

/// A validated property of `T`, ready for the engine.
pub struct PropertyBinding<T> {
    property: &'static str,
    rust_type: &'static str,
    serialized_name: String,
    descriptor: FieldDescriptor,
    types: TypeSet,
    default: Option<Value>,
    read: fn(&T) -> &dyn Property,
    write: fn(Dynamic) -> Result<Box<dyn Any>, Dynamic>,
}

impl<T> PropertyBinding<T> {
    /// The property's Rust name.
    #[inline]
    pub fn property(&self) -> &'static str {
        self.property
    }

    /// The property's Rust type, used when a resolved value cannot be
    /// converted into it.
    #[inline]
    pub fn rust_type(&self) -> &'static str {
        self.rust_type
    }

    /// The key used in marshaled maps.
    #[inline]
    pub fn serialized_name(&self) -> &str {
        &self.serialized_name
    }

    #[inline]
    pub fn descriptor(&self) -> &FieldDescriptor {
        &self.descriptor
    }

    #[inline]
    pub fn types(&self) -> &TypeSet {
        &self.types
    }

    /// The value used when the key is absent.
    #[inline]
    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    #[inline]
    pub fn read<'a>(&self, instance: &'a T) -> &'a dyn Property {
        (self.read)(instance)
    }

    /// Converts a checked value into the property's type, boxed for
    /// [`Slots`](crate::engine::Slots).
    #[inline]
    pub fn write(&self, value: Dynamic) -> Result<Box<dyn Any>, Dynamic> {
        (self.write)(value)
    }
}

impl<T> fmt::Debug for PropertyBinding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyBinding")
            .field("property", &self.property)
            .field("serialized_name", &self.serialized_name)
            .field("descriptor", &self.descriptor)
            .field("types", &self.types.type_names())
            .field("default", &self.default)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// TypeBindings

/// The validated, ordered property bindings of `T`.
pub struct TypeBindings<T> {
    type_name: &'static str,
    bindings: Vec<PropertyBinding<T>>,
}

impl<T> TypeBindings<T> {
    /// Validates a descriptor and resolves its properties.
    ///
    /// The serialized name of each property is its explicit name, else the
    /// renamer's output, else the property name.
    pub fn build(descriptor: TypeDescriptor<T>) -> Result<Self, ConfigError> {
        let TypeDescriptor {
            type_name,
            renamer,
            properties,
        } = descriptor;

        let mut bindings: Vec<PropertyBinding<T>> = Vec::with_capacity(properties.len());

        for property in properties {
            let descriptor =
                FieldDescriptor::from_metadata(type_name, property.name, property.metadata)?;

            let serialized_name = match (descriptor.serialized_name(), renamer) {
                (Some(name), _) => String::from(name),
                (None, Some(renamer)) => renamer(property.name),
                (None, None) => String::from(property.name),
            };

            if let Some(first) = bindings
                .iter()
                .find(|binding| binding.serialized_name == serialized_name)
            {
                return Err(ConfigError::DuplicateName {
                    type_name,
                    first: first.property,
                    second: property.name,
                    name: serialized_name,
                });
            }

            let default = property.default.map(|default| default());

            if descriptor.allows_uninitialized() && default.is_none() && !property.supports_unset {
                return Err(ConfigError::UninitUnsupported {
                    type_name,
                    property: property.name,
                });
            }

            if let (Some(parser), Some(present)) = (descriptor.parser(), property.present_type)
                && parser.output_type_id() != present
            {
                return Err(ConfigError::ParserMismatch {
                    type_name,
                    property: property.name,
                    parser: parser.parser_name(),
                });
            }

            let types = resolve(&(property.declared)(), descriptor.parser().is_some())?;

            bindings.push(PropertyBinding {
                property: property.name,
                rust_type: property.rust_type,
                serialized_name,
                descriptor,
                types,
                default,
                read: property.read,
                write: property.write,
            });
        }

        log::trace!("built {} property bindings for '{type_name}'", bindings.len());

        Ok(Self {
            type_name,
            bindings,
        })
    }

    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, PropertyBinding<T>> {
        self.bindings.iter()
    }

    /// Finds a binding by its serialized name.
    pub fn get(&self, serialized_name: &str) -> Option<&PropertyBinding<T>> {
        self.bindings
            .iter()
            .find(|binding| binding.serialized_name == serialized_name)
    }
}

impl<'a, T> IntoIterator for &'a TypeBindings<T> {
    type Item = &'a PropertyBinding<T>;
    type IntoIter = core::slice::Iter<'a, PropertyBinding<T>>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.bindings.iter()
    }
}

impl<T> fmt::Debug for TypeBindings<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeBindings")
            .field("type_name", &self.type_name)
            .field("bindings", &self.bindings)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests
