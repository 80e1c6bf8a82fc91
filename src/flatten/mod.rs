//! Tabular flattening
//!
//! Turns an array of heterogeneous JSON objects into a rectangular
//! array-of-arrays ready for a sheet. The column spec is an ordered list
//! of header to source; row 0 is always the headers. Every cell is
//! computed independently: no column can observe another column's value.

use crate::types::{JsonValue, Row, Rows};

/// How one column's cells are produced
pub enum ColumnSource {
    /// Pull `record[name]` directly
    Field(String),
    /// Call the extractor with `(header, record)`
    With(Box<dyn Fn(&str, &JsonValue) -> JsonValue + Send + Sync>),
}

impl std::fmt::Debug for ColumnSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Field(name) => f.debug_tuple("Field").field(name).finish(),
            Self::With(_) => f.debug_tuple("With").finish(),
        }
    }
}

/// One output column: its header and where its cells come from
#[derive(Debug)]
pub struct Column {
    /// Header cell for row 0
    pub header: String,
    /// Cell source
    pub source: ColumnSource,
}

/// An ordered column specification
#[derive(Debug, Default)]
pub struct ColumnSpec {
    columns: Vec<Column>,
}

impl ColumnSpec {
    /// An empty spec
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column pulling a record field by name
    #[must_use]
    pub fn field(mut self, header: impl Into<String>, name: impl Into<String>) -> Self {
        self.columns.push(Column {
            header: header.into(),
            source: ColumnSource::Field(name.into()),
        });
        self
    }

    /// Append a column computed by an extractor function
    #[must_use]
    pub fn with<F>(mut self, header: impl Into<String>, extract: F) -> Self
    where
        F: Fn(&str, &JsonValue) -> JsonValue + Send + Sync + 'static,
    {
        self.columns.push(Column {
            header: header.into(),
            source: ColumnSource::With(Box::new(extract)),
        });
        self
    }

    /// The ordered headers, as a sheet row
    pub fn headers(&self) -> Row {
        self.columns
            .iter()
            .map(|c| JsonValue::String(c.header.clone()))
            .collect()
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the spec has no columns
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Flatten records into rows under the given columns.
///
/// Row 0 is the headers; each following row holds one record's cells in
/// column order. A field source that does not match the record yields a
/// null cell rather than erroring.
pub fn flatten(spec: &ColumnSpec, records: &[JsonValue]) -> Rows {
    let mut rows: Rows = Vec::with_capacity(records.len() + 1);
    rows.push(spec.headers());

    for record in records {
        let row: Row = spec
            .columns
            .iter()
            .map(|column| match &column.source {
                ColumnSource::Field(name) => {
                    record.get(name).cloned().unwrap_or(JsonValue::Null)
                }
                ColumnSource::With(extract) => extract(&column.header, record),
            })
            .collect();
        rows.push(row);
    }

    rows
}

#[cfg(test)]
mod tests;
