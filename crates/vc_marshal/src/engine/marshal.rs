use alloc::string::String;
use alloc::vec::Vec;

use crate::binding::{TypeSet, UNTYPED};
use crate::ops::ReflectRef;
use crate::{ConfigError, Marshal, Value, ValueMap};

/// Converts an instance into a map keyed by serialized names.
///
/// Keys follow declaration order. Properties in their unset state are left
/// out. Configuration errors of `T`, or of any nested type, are returned
/// before a partially built map could be observed.
pub fn marshal<T: Marshal>(instance: &T) -> Result<ValueMap, ConfigError> {
    let bindings = T::bindings()?;
    let mut out = ValueMap::with_capacity(bindings.len());

    for binding in bindings {
        let field = binding.read(instance);
        let reflected = field.as_reflect();
        if matches!(reflected, ReflectRef::Unset) {
            continue;
        }

        let descriptor = binding.descriptor();
        let value = match descriptor.parser() {
            Some(parser) => match field.as_present() {
                None => Value::Null,
                Some(present) => {
                    parser
                        .serialize_any(present)
                        .ok_or(ConfigError::ParserMismatch {
                            type_name: bindings.type_name(),
                            property: binding.property(),
                            parser: parser.parser_name(),
                        })?
                }
            },
            None => marshal_ref(reflected, &[binding.types()], descriptor.resolves_enum_by_name())?,
        };

        out.insert(String::from(binding.serialized_name()), value);
    }

    Ok(out)
}

/// `types` holds every declared set the value may belong to. Elements of a
/// container are marshaled against the element sets of all its list or map
/// members.
fn marshal_ref(reflected: ReflectRef<'_>, types: &[&TypeSet], by_name: bool) -> Result<Value, ConfigError> {
    Ok(match reflected {
        ReflectRef::Unset | ReflectRef::Null => Value::Null,
        ReflectRef::Bool(v) => Value::Bool(v),
        ReflectRef::Int(v) => Value::Int(v),
        ReflectRef::Float(v) => Value::Float(v),
        ReflectRef::String(v) => Value::String(v.into()),
        ReflectRef::Value(v) => v.clone(),
        ReflectRef::List(items) => {
            let elements = nested(types, TypeSet::list_elements);
            Value::List(
                items
                    .into_iter()
                    .map(|item| marshal_ref(item.as_reflect(), &elements, by_name))
                    .collect::<Result<_, _>>()?,
            )
        }
        ReflectRef::Map(entries) => {
            let values = nested(types, TypeSet::map_values);
            Value::Map(
                entries
                    .into_iter()
                    .map(|(key, item)| {
                        marshal_ref(item.as_reflect(), &values, by_name).map(|item| (key.into(), item))
                    })
                    .collect::<Result<_, _>>()?,
            )
        }
        ReflectRef::Object(object) => {
            let not_marshalable = || ConfigError::NotMarshalable {
                type_name: object.class().name(),
            };
            if !types.iter().any(|set| set.has_object()) {
                return Err(not_marshalable());
            }
            let capability = object.class().capability()?.ok_or_else(not_marshalable)?;
            Value::Map(capability.marshal(object.value())?)
        }
        ReflectRef::Enum(case) => {
            let Some(found) = case.case() else {
                return Ok(Value::Null);
            };
            match found.value() {
                Some(backing) if case.info().is_backed() && !by_name => backing.clone(),
                _ => Value::from(found.name()),
            }
        }
    })
}

/// The element sets of every container member, untyped when there are none.
fn nested<'a, I>(types: &[&'a TypeSet], members: impl Fn(&'a TypeSet) -> I) -> Vec<&'a TypeSet>
where
    I: Iterator<Item = &'a TypeSet>,
{
    let mut sets: Vec<&TypeSet> = types.iter().flat_map(|set| members(*set)).collect();
    if sets.is_empty() {
        sets.push(&UNTYPED);
    }
    sets
}
