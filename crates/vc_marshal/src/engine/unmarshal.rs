use alloc::string::String;
use alloc::vec::Vec;

use indexmap::IndexMap;

use crate::binding::{PropertyBinding, TypeSet};
use crate::engine::{Slots, check};
use crate::ops::{Dynamic, EnumValue, ObjectValue};
use crate::{Marshal, UnmarshalError, Value, ValueMap};

/// Rebuilds an instance from a map keyed by serialized names.
///
/// In strict mode a null or absent value for a non-nullable property is a
/// [`UnmarshalError::MissingField`]. In lenient mode such a value goes on to
/// the type check, which rejects it as a type mismatch.
///
/// Keys that match no property are ignored. No instance is returned unless
/// every property resolved and passed its type check.
pub fn unmarshal<T: Marshal>(data: &ValueMap, strict: bool) -> Result<T, UnmarshalError> {
    let bindings = T::bindings()?;
    let mut slots = Slots::new(bindings);

    for (index, binding) in bindings.iter().enumerate() {
        let name = binding.serialized_name();
        let raw = data.get(name);

        if raw.is_none() && binding.default().is_none() && binding.descriptor().allows_uninitialized() {
            continue;
        }

        let value = match raw {
            Some(value) => value.clone(),
            None => binding.default().cloned().unwrap_or_default(),
        };

        if strict && value.is_null() && !binding.types().is_nullable() {
            return Err(UnmarshalError::MissingField(String::from(name)));
        }

        let resolved = resolve_field(binding, value, strict)?;
        check(binding.types(), &resolved, binding.property())?;

        let converted = binding.write(resolved).map_err(|rejected| {
            UnmarshalError::mismatch(
                binding.property(),
                alloc::vec![String::from(binding.rust_type())],
                rejected.type_name(),
            )
        })?;
        slots.set(index, converted);
    }

    T::assemble(&mut slots)
}

fn resolve_field<T>(
    binding: &PropertyBinding<T>,
    value: Value,
    strict: bool,
) -> Result<Dynamic, UnmarshalError> {
    let descriptor = binding.descriptor();
    let types = binding.types();

    match descriptor.parser() {
        Some(_) if value.is_null() && types.is_nullable() => Ok(Dynamic::Null),
        Some(parser) => parser.parse_dynamic(value).map_err(|source| UnmarshalError::Parse {
            field: String::from(binding.property()),
            source,
        }),
        None => Resolver {
            by_name: descriptor.resolves_enum_by_name(),
            strict,
        }
        .resolve(value, types, binding.property()),
    }
}

// -----------------------------------------------------------------------------
// Resolver

struct Resolver {
    by_name: bool,
    strict: bool,
}

impl Resolver {
    /// Recognizes nested objects, then enum cases, then containers.
    fn resolve(&self, value: Value, types: &TypeSet, label: &str) -> Result<Dynamic, UnmarshalError> {
        match value {
            Value::Map(map) if types.has_object() => match self.try_candidates(&map, types, label)? {
                Some(object) => Ok(object),
                None => self.resolve_container(Value::Map(map), types, label),
            },
            value if types.has_enum() => Ok(match self.match_enum(&value, types) {
                Some(case) => case,
                None => Dynamic::from(value),
            }),
            value => self.resolve_container(value, types, label),
        }
    }

    /// Tries each object candidate in declaration order.
    ///
    /// Candidates failing on shape are skipped. Any other failure is kept and
    /// returned if no candidate succeeds. `Ok(None)` keeps the raw map.
    fn try_candidates(
        &self,
        map: &ValueMap,
        types: &TypeSet,
        label: &str,
    ) -> Result<Option<Dynamic>, UnmarshalError> {
        let mut deferred = None;
        let mut tried: Vec<&'static str> = Vec::new();

        for target in types.objects() {
            let Some(capability) = target.capability() else {
                continue;
            };
            let class = target.class();
            tried.push(class.name());

            match capability.unmarshal(map, self.strict) {
                Ok(object) => return Ok(Some(Dynamic::Object(ObjectValue::from_boxed(object, class)))),
                Err(err) if err.is_shape_error() => {
                    log::debug!("'{}' rejected for field '{label}': {err}", class.name());
                }
                Err(err) => {
                    log::debug!("'{}' failed for field '{label}': {err}", class.name());
                    deferred.get_or_insert(err);
                }
            }
        }

        if let Some(err) = deferred {
            return Err(err);
        }
        log::debug!(
            "no candidate of field '{label}' accepted the map, keeping it raw (tried: {})",
            tried.join(", ")
        );
        Ok(None)
    }

    fn match_enum(&self, value: &Value, types: &TypeSet) -> Option<Dynamic> {
        types.enums().find_map(|info| {
            let index = if self.by_name || !info.is_backed() {
                value.as_str().and_then(|name| info.index_of_name(name))
            } else {
                info.index_of_value(value)
            };
            index.map(|index| Dynamic::Enum(EnumValue::new(info, index)))
        })
    }

    /// Resolves list and map elements against the declared element types.
    ///
    /// Each list (or map) member is tried in declaration order. The first one
    /// whose elements all resolve and pass their check wins. If none does, the
    /// first member's error is returned.
    fn resolve_container(&self, value: Value, types: &TypeSet, label: &str) -> Result<Dynamic, UnmarshalError> {
        match value {
            Value::List(items) => {
                let resolved = first_fitting(types.list_elements(), |elements| {
                    items
                        .iter()
                        .enumerate()
                        .map(|(index, item)| self.resolve_checked(item, elements, &alloc::format!("{label}[{index}]")))
                        .collect::<Result<_, _>>()
                        .map(Dynamic::List)
                });
                resolved.unwrap_or_else(|| Ok(Dynamic::from(Value::List(items))))
            }
            Value::Map(entries) => {
                let resolved = first_fitting(types.map_values(), |values| {
                    entries
                        .iter()
                        .map(|(key, item)| {
                            let resolved = self.resolve_checked(item, values, &alloc::format!("{label}.{key}"));
                            resolved.map(|item| (key.clone(), item))
                        })
                        .collect::<Result<IndexMap<_, _>, _>>()
                        .map(Dynamic::Map)
                });
                resolved.unwrap_or_else(|| Ok(Dynamic::from(Value::Map(entries))))
            }
            value => Ok(Dynamic::from(value)),
        }
    }

    fn resolve_checked(&self, item: &Value, types: &TypeSet, label: &str) -> Result<Dynamic, UnmarshalError> {
        let resolved = self.resolve(item.clone(), types, label)?;
        check(types, &resolved, label)?;
        Ok(resolved)
    }
}

/// Runs `attempt` against each candidate set until one succeeds.
///
/// `None` when there are no candidates.
fn first_fitting<'a>(
    candidates: impl Iterator<Item = &'a TypeSet>,
    attempt: impl Fn(&'a TypeSet) -> Result<Dynamic, UnmarshalError>,
) -> Option<Result<Dynamic, UnmarshalError>> {
    let mut first_error = None;
    for candidate in candidates {
        match attempt(candidate) {
            Ok(resolved) => return Some(Ok(resolved)),
            Err(err) => {
                first_error.get_or_insert(err);
            }
        }
    }
    first_error.map(Err)
}
