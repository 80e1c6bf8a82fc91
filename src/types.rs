//! Common types used throughout tabsync
//!
//! Shared type aliases and the core data model: a record as the remote
//! service owns it, and the per-table field metadata used to resolve
//! opaque field ids into names.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// Generic key-value map with string keys and values
pub type StringMap = HashMap<String, String>;

/// One sheet row of cell values
pub type Row = Vec<JsonValue>;

/// A rectangular block of sheet rows
pub type Rows = Vec<Row>;

// ============================================================================
// Records
// ============================================================================

/// A single record as returned by the tabular-database API.
///
/// Identity is the `id`; `fields` is an immutable snapshot keyed by field
/// *name*. Values absent from the mapping resolve to null downstream
/// rather than erroring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Stable record identifier assigned by the remote service
    pub id: String,

    /// Field name to value mapping for this record
    #[serde(default)]
    pub fields: JsonObject,
}

impl Record {
    /// Create a record with the given id and fields
    pub fn new(id: impl Into<String>, fields: JsonObject) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Look up a field value by name
    pub fn field(&self, name: &str) -> Option<&JsonValue> {
        self.fields.get(name)
    }
}

// ============================================================================
// Field Metadata
// ============================================================================

/// Metadata for one field of a table: the opaque id, the human name, and
/// the declared type. One set exists per (base, table) and is resolved
/// lazily per call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMeta {
    /// Opaque field identifier
    pub id: String,

    /// Human-readable field name (the key used in `Record::fields`)
    pub name: String,

    /// Declared field type
    #[serde(rename = "type", default)]
    pub field_type: String,
}

/// Field metadata for a table, keyed by field id
pub type FieldMetaMap = HashMap<String, FieldMeta>;

// ============================================================================
// Cells
// ============================================================================

/// Whether a cell carries no content (null or empty string).
///
/// Numbers and booleans are never empty, including `0` and `false`.
pub fn cell_is_empty(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => true,
        JsonValue::String(s) => s.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    #[test]
    fn test_record_deserialize() {
        let record: Record = serde_json::from_value(json!({
            "id": "rec001",
            "fields": {"Name": "Alice", "Hours": 12}
        }))
        .unwrap();

        assert_eq!(record.id, "rec001");
        assert_eq!(record.field("Name"), Some(&json!("Alice")));
        assert_eq!(record.field("Missing"), None);
    }

    #[test]
    fn test_record_missing_fields_defaults_empty() {
        let record: Record = serde_json::from_value(json!({"id": "rec002"})).unwrap();
        assert!(record.fields.is_empty());
    }

    #[test]
    fn test_field_meta_type_rename() {
        let meta: FieldMeta = serde_json::from_value(json!({
            "id": "fld001",
            "name": "Name",
            "type": "singleLineText"
        }))
        .unwrap();

        assert_eq!(meta.field_type, "singleLineText");
    }

    #[test_case(json!(null), true; "null is empty")]
    #[test_case(json!(""), true; "empty string is empty")]
    #[test_case(json!("x"), false; "string is not empty")]
    #[test_case(json!(0), false; "zero is not empty")]
    #[test_case(json!(false), false; "false is not empty")]
    fn test_cell_is_empty(value: JsonValue, expected: bool) {
        assert_eq!(cell_is_empty(&value), expected);
    }
}
