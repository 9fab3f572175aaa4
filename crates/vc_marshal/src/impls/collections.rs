use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::any::Any;

use indexmap::IndexMap;

use crate::info::{TypeRef, TypeRefs};
use crate::ops::{Dynamic, Property, ReflectRef};

// -----------------------------------------------------------------------------
// Vec

impl<T: Property> Property for Vec<T> {
    #[inline]
    fn declared() -> TypeRefs {
        TypeRefs::single(TypeRef::List(Box::new(T::declared())))
    }

    fn as_reflect(&self) -> ReflectRef<'_> {
        ReflectRef::List(self.iter().map(|item| item as &dyn Property).collect())
    }

    #[inline]
    fn as_present(&self) -> Option<&dyn Any> {
        Some(self)
    }

    fn into_dynamic(self) -> Dynamic {
        Dynamic::List(self.into_iter().map(Property::into_dynamic).collect())
    }

    fn from_dynamic(value: Dynamic) -> Result<Self, Dynamic> {
        let items = match value {
            Dynamic::List(items) => items,
            other => return Err(other),
        };

        let mut out = Vec::with_capacity(items.len());
        let mut iter = items.into_iter();
        while let Some(item) = iter.next() {
            match T::from_dynamic(item) {
                Ok(converted) => out.push(converted),
                Err(rejected) => {
                    // Hand the whole list back, already converted items included.
                    let mut items: Vec<Dynamic> = out.into_iter().map(T::into_dynamic).collect();
                    items.push(rejected);
                    items.extend(iter);
                    return Err(Dynamic::List(items));
                }
            }
        }
        Ok(out)
    }
}

// -----------------------------------------------------------------------------
// IndexMap

impl<T: Property> Property for IndexMap<String, T> {
    #[inline]
    fn declared() -> TypeRefs {
        TypeRefs::single(TypeRef::Map(Box::new(T::declared())))
    }

    fn as_reflect(&self) -> ReflectRef<'_> {
        ReflectRef::Map(
            self.iter()
                .map(|(key, item)| (key.as_str(), item as &dyn Property))
                .collect(),
        )
    }

    #[inline]
    fn as_present(&self) -> Option<&dyn Any> {
        Some(self)
    }

    fn into_dynamic(self) -> Dynamic {
        Dynamic::Map(
            self.into_iter()
                .map(|(key, item)| (key, item.into_dynamic()))
                .collect(),
        )
    }

    fn from_dynamic(value: Dynamic) -> Result<Self, Dynamic> {
        let entries = match value {
            Dynamic::Map(entries) => entries,
            other => return Err(other),
        };

        let mut out = IndexMap::with_capacity(entries.len());
        let mut iter = entries.into_iter();
        while let Some((key, item)) = iter.next() {
            match T::from_dynamic(item) {
                Ok(converted) => {
                    out.insert(key, converted);
                }
                Err(rejected) => {
                    let mut entries: IndexMap<String, Dynamic> = out
                        .into_iter()
                        .map(|(key, item)| (key, item.into_dynamic()))
                        .collect();
                    entries.insert(key, rejected);
                    entries.extend(iter);
                    return Err(Dynamic::Map(entries));
                }
            }
        }
        Ok(out)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    use indexmap::IndexMap;

    use crate::ops::{Dynamic, Property, ReflectRef};

    #[test]
    fn list_conversion() {
        let dynamic = Dynamic::List(vec![Dynamic::Int(1), Dynamic::Int(2)]);
        assert_eq!(Vec::<i64>::from_dynamic(dynamic).ok(), Some(vec![1, 2]));

        let mixed = Dynamic::List(vec![Dynamic::Int(1), Dynamic::Bool(true), Dynamic::Int(3)]);
        let Err(Dynamic::List(back)) = Vec::<i64>::from_dynamic(mixed) else {
            panic!("mixed list must be rejected");
        };
        assert_eq!(back.len(), 3);
        assert!(matches!(back[1], Dynamic::Bool(true)));
    }

    #[test]
    fn map_reflects_in_order() {
        let mut map = IndexMap::<String, i64>::new();
        map.insert("z".into(), 1);
        map.insert("a".into(), 2);

        let ReflectRef::Map(entries) = map.as_reflect() else {
            panic!("maps reflect as maps");
        };
        let keys: Vec<_> = entries.iter().map(|(key, _)| *key).collect();
        assert_eq!(keys, ["z", "a"]);
    }
}
