//! Page record decoders
//!
//! Each backend wraps its page records differently. A decoder turns one
//! parsed page body into the records it carries, failing loudly when the
//! expected key is missing or malformed.

use crate::error::{Error, Result};
use crate::types::JsonValue;

/// Extracts the records from one page body
pub trait RecordDecoder: Send + Sync {
    /// The records carried by this page, in response order
    fn records(&self, body: &JsonValue) -> Result<Vec<JsonValue>>;
}

/// Strict decoder for a `records` array.
///
/// Anything other than an array under the key is a malformed page and
/// fails the fetch.
#[derive(Debug, Clone, Default)]
pub struct RecordsField;

impl RecordDecoder for RecordsField {
    fn records(&self, body: &JsonValue) -> Result<Vec<JsonValue>> {
        match body.get("records") {
            Some(JsonValue::Array(items)) => Ok(items.clone()),
            Some(other) => Err(Error::decode(format!(
                "expected 'records' to be an array, got {other}"
            ))),
            None => Err(Error::decode("response has no 'records' key")),
        }
    }
}

/// Decoder for a `searchResults` page.
///
/// The backend returns either a plain array or a keyed object; both
/// normalize to one record sequence, preserving response order.
#[derive(Debug, Clone, Default)]
pub struct SearchResults;

impl RecordDecoder for SearchResults {
    fn records(&self, body: &JsonValue) -> Result<Vec<JsonValue>> {
        match body.get("searchResults") {
            Some(JsonValue::Array(items)) => Ok(items.clone()),
            Some(JsonValue::Object(map)) => Ok(map.values().cloned().collect()),
            Some(other) => Err(Error::decode(format!(
                "expected 'searchResults' to be an array or object, got {other}"
            ))),
            None => Err(Error::decode("response has no 'searchResults' key")),
        }
    }
}
