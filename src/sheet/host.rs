//! Sheet host collaborator contract

use crate::error::Result;
use crate::types::{JsonValue, Rows};
use async_trait::async_trait;

/// A sheet's current size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetExtents {
    /// Total rows, including trailing empty ones
    pub rows: usize,
    /// Total columns
    pub cols: usize,
}

/// The spreadsheet host collaborator.
///
/// Exposes a named-sheet abstraction: extent queries, structural
/// row/column mutation, bulk range IO, and native deduplication. All
/// row and column indices are 1-based. This crate only consumes the
/// contract; the host implementation is external.
#[async_trait]
pub trait SheetHost: Send + Sync {
    /// Current size of a sheet
    async fn extents(&self, sheet: &str) -> Result<SheetExtents>;

    /// Last row containing any content, or 0 for an empty sheet
    async fn last_data_row(&self, sheet: &str) -> Result<usize>;

    /// Insert `count` blank rows before the given row
    async fn insert_rows(&self, sheet: &str, before_row: usize, count: usize) -> Result<()>;

    /// Delete `count` rows starting at the given row
    async fn delete_rows(&self, sheet: &str, start_row: usize, count: usize) -> Result<()>;

    /// Insert `count` blank columns before the given column
    async fn insert_cols(&self, sheet: &str, before_col: usize, count: usize) -> Result<()>;

    /// Delete `count` columns starting at the given column
    async fn delete_cols(&self, sheet: &str, start_col: usize, count: usize) -> Result<()>;

    /// Read a rectangular range of cells
    async fn read_range(
        &self,
        sheet: &str,
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    ) -> Result<Rows>;

    /// Overwrite a rectangular range with the given values.
    ///
    /// The range must lie inside the sheet's current extents.
    async fn write_range(&self, sheet: &str, row: usize, col: usize, values: &[Vec<JsonValue>])
        -> Result<()>;

    /// Remove rows duplicating an earlier row in the given key columns.
    ///
    /// The first occurrence of each key wins; later duplicates are
    /// removed and rows below shift up.
    async fn remove_duplicates(&self, sheet: &str, key_columns: &[usize]) -> Result<()>;
}
