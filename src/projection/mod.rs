//! Record projection
//!
//! Turns raw records plus per-table field metadata into a lookup table:
//! a mapping from a chosen key to either a single projected value or an
//! object of projected values. Field ids in the projection spec resolve
//! through the metadata to field names exactly once per call.
//!
//! Leniency is part of the contract, not a defect: a record whose key
//! does not resolve to a usable string still contributes an (empty)
//! entry so referential rows are never silently dropped, and duplicate
//! keys overwrite each other in fetch order, last write wins.

use crate::error::{Error, Result};
use crate::types::{FieldMetaMap, JsonObject, JsonValue, Record};
use std::collections::BTreeMap;
use tracing::debug;

/// A derived lookup: key to scalar value or key to projected object
pub type LookupTable = JsonObject;

/// What to project each record into.
///
/// The two modes are distinct types rather than a dynamically-inspected
/// parameter: callers choose a variant explicitly.
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectionSpec {
    /// Project one field id; the lookup value is that field's value
    Scalar(String),
    /// Project several fields; the lookup value is an object of
    /// output-property-name to field value
    Object(BTreeMap<String, String>),
}

impl ProjectionSpec {
    /// A scalar projection of one field id
    pub fn scalar(field_id: impl Into<String>) -> Self {
        Self::Scalar(field_id.into())
    }

    /// An object projection from output names to field ids
    pub fn object<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self::Object(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Build a lookup table from records.
///
/// The key is the record's own id when `key_field` is `None`, otherwise
/// the resolved value of that field. A field id (key or projected) that
/// is not present in the metadata fails the call; an individual record
/// value that is missing resolves to null.
pub fn build_lookup(
    records: &[Record],
    meta: &FieldMetaMap,
    key_field: Option<&str>,
    spec: &ProjectionSpec,
) -> Result<LookupTable> {
    let key_name = key_field.map(|id| field_name(meta, id)).transpose()?;

    // Resolve projected field names up front, one metadata pass per call.
    let projected: Vec<(Option<&str>, String)> = match spec {
        ProjectionSpec::Scalar(field_id) => vec![(None, field_name(meta, field_id)?)],
        ProjectionSpec::Object(pairs) => pairs
            .iter()
            .map(|(out, field_id)| Ok((Some(out.as_str()), field_name(meta, field_id)?)))
            .collect::<Result<_>>()?,
    };

    let mut lookup = LookupTable::new();
    for record in records {
        let key = match key_name.as_deref() {
            None => Some(record.id.clone()),
            Some(name) => match record.field(name) {
                Some(JsonValue::String(s)) => Some(s.clone()),
                _ => None,
            },
        };

        let Some(key) = key else {
            // Unusable key: keep an empty entry rather than dropping the row.
            debug!(record = %record.id, "record key did not resolve to a string");
            lookup.insert(String::new(), JsonValue::Object(JsonObject::new()));
            continue;
        };

        let value = match spec {
            ProjectionSpec::Scalar(_) => resolve(record, &projected[0].1),
            ProjectionSpec::Object(_) => {
                let mut object = JsonObject::new();
                for (out, name) in &projected {
                    let out = out.expect("object projection carries output names");
                    object.insert(out.to_string(), resolve(record, name));
                }
                JsonValue::Object(object)
            }
        };

        lookup.insert(key, value);
    }

    Ok(lookup)
}

fn field_name(meta: &FieldMetaMap, field_id: &str) -> Result<String> {
    meta.get(field_id)
        .map(|m| m.name.clone())
        .ok_or_else(|| Error::unknown_field(field_id))
}

fn resolve(record: &Record, field_name: &str) -> JsonValue {
    record.field(field_name).cloned().unwrap_or(JsonValue::Null)
}
