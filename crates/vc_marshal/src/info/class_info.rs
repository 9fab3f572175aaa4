use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::{Any, TypeId};
use core::fmt;
use std::sync::OnceLock;

use crate::ops::{Dynamic, Property};
use crate::{ConfigError, Marshal, UnmarshalError, ValueMap};

/// The maximum number of ancestor hops walked when looking for a marshal
/// capability. The type itself is hop zero.
pub const MAX_CAPABILITY_HOPS: usize = 10;

// -----------------------------------------------------------------------------
// Class

/// A struct-like host type that may appear as a field type.
///
/// Types deriving [`Marshal`] get this for free. Other types implement it
/// through `#[derive(Class)]`, optionally naming a parent type from which a
/// marshal capability may be inherited.
pub trait Class: Property {
    fn class_info() -> &'static ClassInfo;
}

/// Rebuilds a class instance from a resolved [`Dynamic::Object`].
pub fn class_from_dynamic<T: Class>(value: Dynamic) -> Result<T, Dynamic> {
    match value {
        Dynamic::Object(object) => object.downcast::<T>().map_err(Dynamic::Object),
        other => Err(other),
    }
}

// -----------------------------------------------------------------------------
// ObjectVTable

/// Type-erased entry points of a [`Marshal`] type.
#[derive(Clone, Copy)]
pub struct ObjectVTable {
    marshal: fn(&dyn Any) -> Option<Result<ValueMap, ConfigError>>,
    unmarshal: fn(&ValueMap, bool) -> Result<Box<dyn Any>, UnmarshalError>,
}

impl ObjectVTable {
    pub fn of<T: Marshal>() -> Self {
        Self {
            marshal: |value| value.downcast_ref::<T>().map(T::try_marshal),
            unmarshal: |data, strict| {
                T::unmarshal_with(data, strict).map(|value| Box::new(value) as Box<dyn Any>)
            },
        }
    }
}

// -----------------------------------------------------------------------------
// ParentLink

/// Edge from a class to its parent class.
///
/// `upcast` borrows the parent part of a child instance, `wrap` builds a
/// child from an owned parent.
#[derive(Clone, Copy)]
pub struct ParentLink {
    parent: fn() -> &'static ClassInfo,
    upcast: fn(&dyn Any) -> Option<&dyn Any>,
    wrap: fn(Box<dyn Any>) -> Option<Box<dyn Any>>,
}

impl ParentLink {
    pub fn of<T, P>() -> Self
    where
        T: Class + AsRef<P> + From<P>,
        P: Class,
    {
        Self {
            parent: P::class_info,
            upcast: |value| {
                value
                    .downcast_ref::<T>()
                    .map(|child| AsRef::<P>::as_ref(child) as &dyn Any)
            },
            wrap: |value| {
                value
                    .downcast::<P>()
                    .ok()
                    .map(|parent| Box::new(T::from(*parent)) as Box<dyn Any>)
            },
        }
    }

    #[inline]
    pub fn parent(&self) -> &'static ClassInfo {
        (self.parent)()
    }
}

// -----------------------------------------------------------------------------
// ClassInfo

/// Static information about a [`Class`].
pub struct ClassInfo {
    name: &'static str,
    type_id: TypeId,
    vtable: Option<ObjectVTable>,
    parent: Option<ParentLink>,
    capability: OnceLock<Result<Option<Capability>, ConfigError>>,
}

impl ClassInfo {
    pub fn new<T: Any>(name: &'static str) -> Self {
        Self {
            name,
            type_id: TypeId::of::<T>(),
            vtable: None,
            parent: None,
            capability: OnceLock::new(),
        }
    }

    /// Marks the class as marshalable in its own right.
    #[inline]
    pub fn with_vtable(mut self, vtable: ObjectVTable) -> Self {
        self.vtable = Some(vtable);
        self
    }

    #[inline]
    pub fn with_parent(mut self, parent: ParentLink) -> Self {
        self.parent = Some(parent);
        self
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }

    #[inline]
    pub fn parent(&self) -> Option<&'static ClassInfo> {
        self.parent.as_ref().map(ParentLink::parent)
    }

    /// Returns the marshal capability of this class or its nearest capable
    /// ancestor. The lookup is memoized.
    ///
    /// `Ok(None)` means no class in the ancestry is marshalable.
    pub fn capability(&'static self) -> Result<Option<&'static Capability>, ConfigError> {
        match self
            .capability
            .get_or_init(|| self.capability_within(MAX_CAPABILITY_HOPS))
        {
            Ok(found) => Ok(found.as_ref()),
            Err(err) => Err(err.clone()),
        }
    }

    /// Walks the ancestry looking for a marshal capability, giving up after
    /// `max_hops` parent links.
    ///
    /// Cyclic ancestries end with [`ConfigError::CapabilityDepthExceeded`].
    pub fn capability_within(
        &'static self,
        max_hops: usize,
    ) -> Result<Option<Capability>, ConfigError> {
        let mut current = self;
        let mut chain: Vec<&'static ParentLink> = Vec::new();

        loop {
            if let Some(vtable) = current.vtable {
                log::trace!(
                    "'{}' is marshalable through '{}' after {} hops",
                    self.name,
                    current.name,
                    chain.len()
                );
                return Ok(Some(Capability {
                    provider: current,
                    vtable,
                    chain,
                }));
            }
            let Some(link) = current.parent.as_ref() else {
                return Ok(None);
            };
            if chain.len() >= max_hops {
                return Err(ConfigError::CapabilityDepthExceeded {
                    type_name: self.name,
                    max_hops,
                });
            }
            chain.push(link);
            current = link.parent();
        }
    }
}

impl fmt::Debug for ClassInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassInfo")
            .field("name", &self.name)
            .field("marshalable", &self.vtable.is_some())
            .field("parent", &self.parent().map(ClassInfo::name))
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Capability

/// How instances of a class are marshaled: by the vtable of `provider`,
/// reached through `chain`.
pub struct Capability {
    provider: &'static ClassInfo,
    vtable: ObjectVTable,
    chain: Vec<&'static ParentLink>,
}

impl Capability {
    /// The class whose own vtable is used.
    #[inline]
    pub fn provider(&self) -> &'static ClassInfo {
        self.provider
    }

    /// Number of parent links between the class and the provider.
    #[inline]
    pub fn hops(&self) -> usize {
        self.chain.len()
    }

    pub fn marshal(&self, value: &dyn Any) -> Result<ValueMap, ConfigError> {
        let not_marshalable = || ConfigError::NotMarshalable {
            type_name: self.provider.name,
        };

        let mut current = value;
        for link in &self.chain {
            current = (link.upcast)(current).ok_or_else(not_marshalable)?;
        }
        (self.vtable.marshal)(current).ok_or_else(not_marshalable)?
    }

    pub fn unmarshal(&self, data: &ValueMap, strict: bool) -> Result<Box<dyn Any>, UnmarshalError> {
        let mut value = (self.vtable.unmarshal)(data, strict)?;
        for link in self.chain.iter().rev() {
            value = (link.wrap)(value).ok_or(ConfigError::NotMarshalable {
                type_name: self.provider.name,
            })?;
        }
        Ok(value)
    }
}

impl fmt::Debug for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capability")
            .field("provider", &self.provider.name)
            .field("hops", &self.chain.len())
            .finish()
    }
}
