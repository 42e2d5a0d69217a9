//! Store-agnostic representation of a document about to be inserted.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::errors::StoreError;

/// Marker for a field whose value the document store assigns at insert time.
///
/// The client never supplies a timestamp; the store substitutes its own clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServerTimestamp;

/// Fields for a new document plus the names of server-assigned timestamp fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewDocument {
    pub fields: Map<String, Value>,
    pub server_timestamps: Vec<String>,
}

impl NewDocument {
    /// Build a document from any value that serializes to a JSON object.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Encode` if the value does not serialize to an object.
    pub fn from_serializable<T: Serialize>(value: &T) -> Result<Self, StoreError> {
        match serde_json::to_value(value) {
            Ok(Value::Object(fields)) => Ok(Self {
                fields,
                server_timestamps: Vec::new(),
            }),
            Ok(other) => Err(StoreError::Encode(format!(
                "expected a JSON object, got {other}"
            ))),
            Err(error) => Err(StoreError::Encode(error.to_string())),
        }
    }

    /// Mark `field` as assigned by the store at insert time.
    #[must_use]
    pub fn with_server_timestamp(mut self, field: impl Into<String>) -> Self {
        let field = field.into();
        self.fields.remove(&field);
        if !self.server_timestamps.contains(&field) {
            self.server_timestamps.push(field);
        }
        self
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    #[must_use]
    pub fn is_server_timestamp(&self, name: &str) -> bool {
        self.server_timestamps.iter().any(|field| field == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Sample {
        name: &'static str,
        count: u32,
    }

    #[test]
    fn from_serializable_keeps_object_fields() {
        let doc = NewDocument::from_serializable(&Sample {
            name: "unit",
            count: 3,
        })
        .expect("object should encode");
        assert_eq!(doc.field("name"), Some(&Value::from("unit")));
        assert_eq!(doc.field("count"), Some(&Value::from(3)));
        assert!(doc.server_timestamps.is_empty());
    }

    #[test]
    fn from_serializable_rejects_scalars() {
        let result = NewDocument::from_serializable(&"just a string");
        assert!(matches!(result, Err(StoreError::Encode(_))));
    }

    #[test]
    fn server_timestamp_replaces_client_value() {
        let doc = NewDocument::from_serializable(&serde_json::json!({"at": "client clock"}))
            .expect("object should encode")
            .with_server_timestamp("at")
            .with_server_timestamp("at");
        assert!(doc.field("at").is_none());
        assert!(doc.is_server_timestamp("at"));
        assert_eq!(doc.server_timestamps.len(), 1);
    }
}
