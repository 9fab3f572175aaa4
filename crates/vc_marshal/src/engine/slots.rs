use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::any::{Any, type_name};

use crate::binding::TypeBindings;
use crate::ops::Property;
use crate::UnmarshalError;

/// Converted property values, waiting to be assembled into an instance.
///
/// Slots are indexed like the type's bindings. A slot left empty is taken as
/// the property type's unset state, so an instance is built without running
/// any user constructor and without inventing values for skipped fields.
pub struct Slots {
    names: Vec<String>,
    values: Vec<Option<Box<dyn Any>>>,
}

impl Slots {
    pub(crate) fn new<T>(bindings: &TypeBindings<T>) -> Self {
        Self {
            names: bindings
                .iter()
                .map(|binding| String::from(binding.serialized_name()))
                .collect(),
            values: bindings.iter().map(|_| None).collect(),
        }
    }

    #[inline]
    pub(crate) fn set(&mut self, index: usize, value: Box<dyn Any>) {
        if let Some(slot) = self.values.get_mut(index) {
            *slot = Some(value);
        }
    }

    /// Takes the value of slot `index` as an `F`.
    ///
    /// An empty slot yields [`Property::unset`], or
    /// [`UnmarshalError::MissingField`] if `F` has no unset state.
    pub fn take<F: Property>(&mut self, index: usize) -> Result<F, UnmarshalError> {
        let name = || {
            self.names
                .get(index)
                .cloned()
                .unwrap_or_else(|| alloc::format!("#{index}"))
        };

        match self.values.get_mut(index).and_then(Option::take) {
            Some(value) => match value.downcast::<F>() {
                Ok(value) => Ok(*value),
                // Slot taken with a type other than the one its binding wrote.
                Err(_) => Err(UnmarshalError::mismatch(
                    &name(),
                    alloc::vec![type_name::<F>().into()],
                    "another property type",
                )),
            },
            None => F::unset().ok_or_else(|| UnmarshalError::MissingField(name())),
        }
    }
}
