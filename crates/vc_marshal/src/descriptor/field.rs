use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use crate::ConfigError;
use crate::descriptor::{DynParser, Parser};

/// A type-wide mapping from property names to serialized names.
///
/// Applied to every property without an explicit serialized name.
pub type Renamer = fn(&str) -> String;

// -----------------------------------------------------------------------------
// FieldMetadata

/// Configuration attached to one property, as written by the user.
///
/// ```
/// use vc_marshal::descriptor::{FieldDescriptor, FieldMetadata};
///
/// let meta = FieldMetadata::new().with_name("first-name").allow_uninitialized();
/// let descriptor = FieldDescriptor::from_metadata("Person", "first_name", vec![meta]).unwrap();
///
/// assert_eq!(descriptor.serialized_name(), Some("first-name"));
/// assert!(descriptor.allows_uninitialized());
/// assert!(descriptor.parser().is_none());
/// ```
#[derive(Clone, Default)]
pub struct FieldMetadata {
    name: Option<&'static str>,
    parser: Option<Arc<dyn DynParser>>,
    allow_uninitialized: bool,
    enum_by_name: bool,
}

impl FieldMetadata {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the serialized name. An empty name is ignored.
    #[inline]
    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = (!name.is_empty()).then_some(name);
        self
    }

    /// Attaches a parser, constructed once through [`Default`].
    #[inline]
    pub fn with_parser<P: Parser + Default>(self) -> Self {
        self.with_parser_instance(P::default())
    }

    #[inline]
    pub fn with_parser_instance<P: Parser>(mut self, parser: P) -> Self {
        self.parser = Some(Arc::new(parser));
        self
    }

    /// Lets the field stay unset when its key is absent and it has no default.
    #[inline]
    pub fn allow_uninitialized(mut self) -> Self {
        self.allow_uninitialized = true;
        self
    }

    /// Matches and emits enum cases by name even when they are backed.
    #[inline]
    pub fn enum_by_name(mut self) -> Self {
        self.enum_by_name = true;
        self
    }
}

impl fmt::Debug for FieldMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldMetadata")
            .field("name", &self.name)
            .field("parser", &self.parser.as_ref().map(|p| p.parser_name()))
            .field("allow_uninitialized", &self.allow_uninitialized)
            .field("enum_by_name", &self.enum_by_name)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// FieldDescriptor

/// The normalized configuration of one property.
#[derive(Clone, Default)]
pub struct FieldDescriptor {
    serialized_name: Option<&'static str>,
    parser: Option<Arc<dyn DynParser>>,
    allow_uninitialized: bool,
    enum_by_name: bool,
}

impl FieldDescriptor {
    /// Normalizes the metadata attached to a property.
    ///
    /// No metadata yields the default descriptor. More than one entry is a
    /// configuration error.
    pub fn from_metadata(
        type_name: &'static str,
        property: &'static str,
        metadata: Vec<FieldMetadata>,
    ) -> Result<Self, ConfigError> {
        let mut metadata = metadata.into_iter();
        let Some(meta) = metadata.next() else {
            return Ok(Self::default());
        };
        if metadata.next().is_some() {
            return Err(ConfigError::DuplicateMetadata {
                type_name,
                property,
            });
        }

        Ok(Self {
            serialized_name: meta.name,
            parser: meta.parser,
            allow_uninitialized: meta.allow_uninitialized,
            enum_by_name: meta.enum_by_name,
        })
    }

    /// The explicit serialized name, if one was given.
    #[inline]
    pub fn serialized_name(&self) -> Option<&'static str> {
        self.serialized_name
    }

    #[inline]
    pub fn parser(&self) -> Option<&dyn DynParser> {
        self.parser.as_deref()
    }

    #[inline]
    pub fn allows_uninitialized(&self) -> bool {
        self.allow_uninitialized
    }

    #[inline]
    pub fn resolves_enum_by_name(&self) -> bool {
        self.enum_by_name
    }
}

impl fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("serialized_name", &self.serialized_name)
            .field("parser", &self.parser.as_ref().map(|p| p.parser_name()))
            .field("allow_uninitialized", &self.allow_uninitialized)
            .field("enum_by_name", &self.enum_by_name)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::{FieldDescriptor, FieldMetadata};
    use crate::ConfigError;

    #[test]
    fn no_metadata_is_default() {
        let descriptor = FieldDescriptor::from_metadata("T", "p", Vec::new()).unwrap();
        assert_eq!(descriptor.serialized_name(), None);
        assert!(!descriptor.allows_uninitialized());
        assert!(!descriptor.resolves_enum_by_name());
    }

    #[test]
    fn empty_name_is_ignored() {
        let meta = FieldMetadata::new().with_name("").enum_by_name();
        let descriptor = FieldDescriptor::from_metadata("T", "p", vec![meta]).unwrap();
        assert_eq!(descriptor.serialized_name(), None);
        assert!(descriptor.resolves_enum_by_name());
    }

    #[test]
    fn duplicate_metadata() {
        let err = FieldDescriptor::from_metadata(
            "Person",
            "age",
            vec![FieldMetadata::new(), FieldMetadata::new()],
        )
        .unwrap_err();

        assert_eq!(
            err,
            ConfigError::DuplicateMetadata {
                type_name: "Person",
                property: "age"
            }
        );
    }
}
