use serde_core::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::{Value, ValueMap};

/// Serializes a borrowed [`ValueMap`] as a map, keeping key order.
///
/// # Examples
///
/// ```
/// use vc_marshal::serde::ValueMapRef;
/// use vc_marshal::{Value, ValueMap};
///
/// let mut map = ValueMap::new();
/// map.insert("b".into(), Value::from(1));
/// map.insert("a".into(), Value::Null);
///
/// let text = serde_json::to_string(&ValueMapRef(&map)).unwrap();
/// assert_eq!(text, r#"{"b":1,"a":null}"#);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct ValueMapRef<'a>(pub &'a ValueMap);

impl Serialize for ValueMapRef<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(value) => serializer.serialize_bool(*value),
            Value::Int(value) => serializer.serialize_i64(*value),
            Value::Float(value) => serializer.serialize_f64(*value),
            Value::String(value) => serializer.serialize_str(value),
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Map(entries) => ValueMapRef(entries).serialize(serializer),
        }
    }
}
