use crate::UnmarshalError;
use crate::binding::{Primitive, TargetType, TypeSet};
use crate::ops::Dynamic;

/// Checks a resolved value against a declared type set.
///
/// `field` names the value in the error. Untyped sets accept anything,
/// nullable sets accept null. Ints are accepted where floats are declared.
/// List and map members also check every element, labelling a failing one
/// as `field[index]` or `field.key`.
pub fn check(types: &TypeSet, value: &Dynamic, field: &str) -> Result<(), UnmarshalError> {
    if types.is_untyped() || (value.is_null() && types.is_nullable()) {
        return Ok(());
    }

    let mut element_error = None;
    for member in types.members() {
        match accepts(member, value, field) {
            Ok(true) => return Ok(()),
            Ok(false) => {}
            Err(err) => {
                element_error.get_or_insert(err);
            }
        }
    }

    // A container member matched but one of its elements did not.
    if let Some(err) = element_error {
        return Err(err);
    }
    Err(UnmarshalError::mismatch(
        field,
        types.type_names(),
        value.type_name(),
    ))
}

fn accepts(member: &TargetType, value: &Dynamic, field: &str) -> Result<bool, UnmarshalError> {
    Ok(match (member, value) {
        (TargetType::Primitive(Primitive::Bool), Dynamic::Bool(_))
        | (TargetType::Primitive(Primitive::Int), Dynamic::Int(_))
        | (TargetType::Primitive(Primitive::Float), Dynamic::Float(_) | Dynamic::Int(_))
        | (TargetType::Primitive(Primitive::String), Dynamic::String(_)) => true,
        (TargetType::List(elements), Dynamic::List(items)) => {
            for (index, item) in items.iter().enumerate() {
                check(elements, item, &alloc::format!("{field}[{index}]"))?;
            }
            true
        }
        (TargetType::Map(values), Dynamic::Map(entries)) => {
            for (key, item) in entries {
                check(values, item, &alloc::format!("{field}.{key}"))?;
            }
            true
        }
        (TargetType::Object(target), Dynamic::Object(object)) => {
            target.class().type_id() == object.class().type_id()
        }
        (TargetType::Enum(info), Dynamic::Enum(case)) => info.type_id() == case.info().type_id(),
        _ => false,
    })
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::ToString;
    use alloc::vec;

    use indexmap::IndexMap;

    use super::check;
    use crate::binding::{Primitive, TargetType, TypeSet};
    use crate::ops::Dynamic;

    fn set(members: alloc::vec::Vec<TargetType>, nullable: bool) -> TypeSet {
        TypeSet::new(members, nullable)
    }

    #[test]
    fn scalars_and_widening() {
        let float = set(vec![TargetType::Primitive(Primitive::Float)], false);
        assert!(check(&float, &Dynamic::Int(2), "ratio").is_ok());
        assert!(check(&float, &Dynamic::Float(2.5), "ratio").is_ok());

        let err = check(&float, &Dynamic::String("2".into()), "ratio").unwrap_err();
        assert_eq!(err.to_string(), "field 'ratio' must be of type 'float', got 'string'");
    }

    #[test]
    fn nullability_and_untyped() {
        let int = set(vec![TargetType::Primitive(Primitive::Int)], false);
        let err = check(&int, &Dynamic::Null, "age").unwrap_err();
        assert_eq!(err.to_string(), "field 'age' must be of type 'int', got 'null'");

        let nullable = set(vec![TargetType::Primitive(Primitive::Int)], true);
        assert!(check(&nullable, &Dynamic::Null, "age").is_ok());

        assert!(check(&TypeSet::untyped(), &Dynamic::Bool(true), "any").is_ok());
    }

    #[test]
    fn union_lists_every_member() {
        let union = set(
            vec![
                TargetType::Primitive(Primitive::Int),
                TargetType::Primitive(Primitive::String),
            ],
            false,
        );
        assert!(check(&union, &Dynamic::Int(1), "id").is_ok());
        assert!(check(&union, &Dynamic::String("x".into()), "id").is_ok());

        let err = check(&union, &Dynamic::Bool(false), "id").unwrap_err();
        assert_eq!(
            err.to_string(),
            "field 'id' must be one of the types (int, string), got 'bool'"
        );
    }

    #[test]
    fn elements_are_labelled() {
        let ints = Box::new(set(vec![TargetType::Primitive(Primitive::Int)], false));

        let list = set(vec![TargetType::List(ints.clone())], false);
        let value = Dynamic::List(vec![Dynamic::Int(1), Dynamic::String("x".into())]);
        let err = check(&list, &value, "scores").unwrap_err();
        assert_eq!(err.to_string(), "field 'scores[1]' must be of type 'int', got 'string'");

        let map = set(vec![TargetType::Map(ints)], false);
        let mut entries = IndexMap::new();
        entries.insert("math".into(), Dynamic::Bool(true));
        let err = check(&map, &Dynamic::Map(entries), "grades").unwrap_err();
        assert_eq!(err.to_string(), "field 'grades.math' must be of type 'int', got 'bool'");
    }
}
