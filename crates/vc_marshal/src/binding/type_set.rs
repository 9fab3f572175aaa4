use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use crate::info::{Capability, ClassInfo, EnumInfo};

// -----------------------------------------------------------------------------
// TargetType

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Primitive {
    Bool,
    Int,
    Float,
    String,
}

impl Primitive {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::String => "string",
        }
    }
}

/// A class member of a [`TypeSet`].
#[derive(Clone, Copy, Debug)]
pub struct ObjectTarget {
    class: &'static ClassInfo,
    capability: Option<&'static Capability>,
}

impl ObjectTarget {
    #[inline]
    pub(crate) fn new(class: &'static ClassInfo, capability: Option<&'static Capability>) -> Self {
        Self { class, capability }
    }

    #[inline]
    pub fn class(&self) -> &'static ClassInfo {
        self.class
    }

    /// How to marshal the class. `None` only for parser-owned fields.
    #[inline]
    pub fn capability(&self) -> Option<&'static Capability> {
        self.capability
    }
}

/// One resolved member of a declared type.
#[derive(Clone, Debug)]
pub enum TargetType {
    Primitive(Primitive),
    List(Box<TypeSet>),
    Map(Box<TypeSet>),
    Object(ObjectTarget),
    Enum(&'static EnumInfo),
}

impl TargetType {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Primitive(primitive) => primitive.name(),
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Object(target) => target.class.name(),
            Self::Enum(info) => info.name(),
        }
    }
}

// -----------------------------------------------------------------------------
// TypeSet

/// A resolved declared type: an ordered union plus nullability.
///
/// An empty member list means untyped.
#[derive(Clone, Debug)]
pub struct TypeSet {
    members: Vec<TargetType>,
    nullable: bool,
}

/// Element type of untyped lists and maps.
pub(crate) static UNTYPED: TypeSet = TypeSet::untyped();

impl TypeSet {
    #[inline]
    pub(crate) fn new(members: Vec<TargetType>, nullable: bool) -> Self {
        Self { members, nullable }
    }

    #[inline]
    pub const fn untyped() -> Self {
        Self {
            members: Vec::new(),
            nullable: true,
        }
    }

    #[inline]
    pub fn members(&self) -> &[TargetType] {
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

    /// Class members, in declaration order.
    pub fn objects(&self) -> impl Iterator<Item = &ObjectTarget> {
        self.members.iter().filter_map(|member| match member {
            TargetType::Object(target) => Some(target),
            _ => None,
        })
    }

    /// Enum members, in declaration order.
    pub fn enums(&self) -> impl Iterator<Item = &'static EnumInfo> + '_ {
        self.members.iter().filter_map(|member| match member {
            TargetType::Enum(info) => Some(*info),
            _ => None,
        })
    }

    #[inline]
    pub fn has_object(&self) -> bool {
        self.objects().next().is_some()
    }

    #[inline]
    pub fn has_enum(&self) -> bool {
        self.enums().next().is_some()
    }

    /// Element types of every list member, in declaration order.
    pub fn list_elements(&self) -> impl Iterator<Item = &TypeSet> {
        self.members.iter().filter_map(|member| match member {
            TargetType::List(elements) => Some(&**elements),
            _ => None,
        })
    }

    /// Value types of every map member, in declaration order.
    pub fn map_values(&self) -> impl Iterator<Item = &TypeSet> {
        self.members.iter().filter_map(|member| match member {
            TargetType::Map(values) => Some(&**values),
            _ => None,
        })
    }

    /// Member names, as listed in type-mismatch errors.
    pub fn type_names(&self) -> Vec<String> {
        self.members
            .iter()
            .map(|member| String::from(member.name()))
            .collect()
    }
}
