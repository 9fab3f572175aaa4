use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;

use crate::info::{ClassInfo, EnumInfo};
use crate::ops::Dynamic;

// -----------------------------------------------------------------------------
// TypeRef

/// A single declared type, as written on a property.
///
/// Class and enum references are lazy: the info getter is only called when
/// the owning type's bindings are resolved, so a type may refer to itself.
#[derive(Clone, Debug)]
pub enum TypeRef {
    Bool,
    Int,
    Float,
    String,
    List(Box<TypeRefs>),
    Map(Box<TypeRefs>),
    Class(fn() -> &'static ClassInfo),
    Enum(fn() -> &'static EnumInfo),
}

impl TypeRef {
    /// Returns the name used in type-mismatch diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::String => "string",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Class(info) => info().name(),
            Self::Enum(info) => info().name(),
        }
    }
}

// -----------------------------------------------------------------------------
// TypeRefs

/// A property's full declared type: a union of members plus nullability.
///
/// No members means the property is untyped and accepts any value.
#[derive(Clone, Debug)]
pub struct TypeRefs {
    members: Vec<TypeRef>,
    nullable: bool,
}

impl TypeRefs {
    /// An untyped declaration, accepting anything including null.
    #[inline]
    pub const fn untyped() -> Self {
        Self {
            members: Vec::new(),
            nullable: true,
        }
    }

    #[inline]
    pub fn single(member: TypeRef) -> Self {
        Self {
            members: vec![member],
            nullable: false,
        }
    }

    /// A union of the given members, in declaration order.
    pub fn union(members: impl IntoIterator<Item = TypeRef>) -> Self {
        Self {
            members: members.into_iter().collect(),
            nullable: false,
        }
    }

    /// Marks the declaration as accepting null.
    #[inline]
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Appends the members of `other`, keeping order. Nullability is merged.
    pub fn extend(&mut self, other: TypeRefs) {
        self.members.extend(other.members);
        self.nullable |= other.nullable;
    }

    #[inline]
    pub fn members(&self) -> &[TypeRef] {
        &self.members
    }

    #[inline]
    pub const fn is_nullable(&self) -> bool {
        self.nullable
    }

    #[inline]
    pub fn is_untyped(&self) -> bool {
        self.members.is_empty()
    }

    /// Whether `value` fits without widening an int to a float, at any depth.
    ///
    /// Values other than ints and containers always fit here; whether they
    /// are accepted at all is decided by the type check.
    pub fn fits_exactly(&self, value: &Dynamic) -> bool {
        if self.is_untyped() {
            return true;
        }
        match value {
            Dynamic::Int(_) => self.members.iter().any(|member| matches!(member, TypeRef::Int)),
            Dynamic::List(items) => self.members.iter().any(|member| match member {
                TypeRef::List(elements) => items.iter().all(|item| elements.fits_exactly(item)),
                _ => false,
            }),
            Dynamic::Map(entries) => self.members.iter().any(|member| match member {
                TypeRef::Map(values) => entries.values().all(|item| values.fits_exactly(item)),
                _ => false,
            }),
            _ => true,
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::vec;
    use alloc::vec::Vec;

    use super::{TypeRef, TypeRefs};
    use crate::ops::Dynamic;

    #[test]
    fn union_keeps_order_and_nullability() {
        let mut refs = TypeRefs::single(TypeRef::Int);
        refs.extend(TypeRefs::single(TypeRef::String).nullable());

        let names: Vec<_> = refs.members().iter().map(TypeRef::name).collect();
        assert_eq!(names, ["int", "string"]);
        assert!(refs.is_nullable());
        assert!(!refs.is_untyped());
    }

    #[test]
    fn untyped_accepts_null() {
        let refs = TypeRefs::untyped();
        assert!(refs.is_untyped());
        assert!(refs.is_nullable());

        let list = TypeRef::List(Box::new(refs));
        assert_eq!(list.name(), "list");
    }

    #[test]
    fn ints_fit_only_int_members() {
        let float = TypeRefs::single(TypeRef::Float);
        let int = TypeRefs::single(TypeRef::Int);
        assert!(!float.fits_exactly(&Dynamic::Int(2)));
        assert!(int.fits_exactly(&Dynamic::Int(2)));
        assert!(float.fits_exactly(&Dynamic::Float(2.0)));

        let floats = TypeRefs::single(TypeRef::List(Box::new(float)));
        let ints = TypeRefs::single(TypeRef::List(Box::new(int)));
        let items = Dynamic::List(vec![Dynamic::Int(1), Dynamic::Int(2)]);
        assert!(!floats.fits_exactly(&items));
        assert!(ints.fits_exactly(&items));
        assert!(TypeRefs::untyped().fits_exactly(&items));
    }
}
