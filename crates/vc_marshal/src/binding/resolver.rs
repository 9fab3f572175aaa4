use alloc::boxed::Box;

use crate::ConfigError;
use crate::binding::{ObjectTarget, Primitive, TargetType, TypeSet};
use crate::info::{TypeRef, TypeRefs};

/// Resolves a property's declared types.
///
/// Without a parser every class member must be marshalable, itself or
/// through an ancestor; otherwise the type is rejected with
/// [`ConfigError::NotMarshalable`]. A parser owns the conversion of its field,
/// so class members of parser-owned fields are kept without a capability.
///
/// Only the capability of a class is looked up here, never its bindings, so
/// a type may refer to itself.
pub fn resolve(declared: &TypeRefs, has_parser: bool) -> Result<TypeSet, ConfigError> {
    let members = declared
        .members()
        .iter()
        .map(|member| resolve_member(member, has_parser))
        .collect::<Result<_, _>>()?;

    Ok(TypeSet::new(members, declared.is_nullable()))
}

fn resolve_member(member: &TypeRef, has_parser: bool) -> Result<TargetType, ConfigError> {
    Ok(match member {
        TypeRef::Bool => TargetType::Primitive(Primitive::Bool),
        TypeRef::Int => TargetType::Primitive(Primitive::Int),
        TypeRef::Float => TargetType::Primitive(Primitive::Float),
        TypeRef::String => TargetType::Primitive(Primitive::String),
        TypeRef::List(elements) => TargetType::List(Box::new(resolve(elements, has_parser)?)),
        TypeRef::Map(values) => TargetType::Map(Box::new(resolve(values, has_parser)?)),
        TypeRef::Enum(info) => TargetType::Enum(info()),
        TypeRef::Class(info) => {
            let class = info();
            if has_parser {
                TargetType::Object(ObjectTarget::new(class, None))
            } else {
                let capability = class.capability()?.ok_or(ConfigError::NotMarshalable {
                    type_name: class.name(),
                })?;
                TargetType::Object(ObjectTarget::new(class, Some(capability)))
            }
        }
    })
}
