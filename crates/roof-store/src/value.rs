//! Encoding of JSON values into Firestore's typed REST representation.
//!
//! | JSON            | Firestore                          |
//! |-----------------|------------------------------------|
//! | `null`          | `{"nullValue": null}`              |
//! | bool            | `{"booleanValue": b}`              |
//! | integer         | `{"integerValue": "n"}` (string)   |
//! | float           | `{"doubleValue": f}`               |
//! | string          | `{"stringValue": s}`               |
//! | array           | `{"arrayValue": {"values": [..]}}` |
//! | object          | `{"mapValue": {"fields": {..}}}`   |

use serde_json::{Map, Value, json};

/// Encode one JSON value as a Firestore `Value`.
#[must_use]
pub fn encode(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => match (n.as_i64(), n.as_u64()) {
            (Some(i), _) => json!({ "integerValue": i.to_string() }),
            (None, Some(u)) => json!({ "integerValue": u.to_string() }),
            (None, None) => json!({ "doubleValue": n.as_f64().unwrap_or_default() }),
        },
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => {
            json!({ "arrayValue": { "values": items.iter().map(encode).collect::<Vec<_>>() } })
        }
        Value::Object(map) => json!({ "mapValue": { "fields": encode_fields(map) } }),
    }
}

/// Encode every field of a document.
#[must_use]
pub fn encode_fields(fields: &Map<String, Value>) -> Map<String, Value> {
    fields
        .iter()
        .map(|(name, value)| (name.clone(), encode(value)))
        .collect()
}

/// Quote a field name for use in a field path when it is not a simple identifier.
#[must_use]
pub fn field_path(name: &str) -> String {
    let mut chars = name.chars();
    let simple = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if simple {
        name.to_string()
    } else {
        format!("`{}`", name.replace('\\', "\\\\").replace('`', "\\`"))
    }
}
