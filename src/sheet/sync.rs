//! Sheet synchronization engine

use super::host::SheetHost;
use crate::cache::{CacheLayer, CachePolicy};
use crate::error::{Error, Result};
use crate::types::{cell_is_empty, JsonObject, JsonValue, Rows};
use std::sync::Arc;
use tracing::{debug, info};

/// Reconciles datasets against sheets on a [`SheetHost`]
#[derive(Clone)]
pub struct SheetSync {
    host: Arc<dyn SheetHost>,
}

impl SheetSync {
    /// Create a sync engine over a host
    pub fn new(host: Arc<dyn SheetHost>) -> Self {
        Self { host }
    }

    /// Replace a sheet's data completely.
    ///
    /// The sheet is resized by the minimal row/column delta to match the
    /// dataset, then the whole data range is overwritten in one bulk
    /// write. The sheet itself is never deleted, so frozen rows,
    /// formatting, and whole-column ranges survive.
    ///
    /// All rows must share the first row's length. An empty dataset is a
    /// structural error: there is no extent to size the sheet against.
    pub async fn update_sheet_with_data(&self, sheet: &str, data: &Rows) -> Result<()> {
        let (data_rows, data_cols) = dataset_extents(data)?;
        let extents = self.host.extents(sheet).await?;

        debug!(
            sheet,
            sheet_rows = extents.rows,
            sheet_cols = extents.cols,
            data_rows,
            data_cols,
            "resize-replace"
        );

        if data_rows < extents.rows {
            self.host
                .delete_rows(sheet, data_rows + 1, extents.rows - data_rows)
                .await?;
        } else if data_rows > extents.rows {
            self.host
                .insert_rows(sheet, extents.rows + 1, data_rows - extents.rows)
                .await?;
        }

        if data_cols < extents.cols {
            self.host
                .delete_cols(sheet, data_cols + 1, extents.cols - data_cols)
                .await?;
        } else if data_cols > extents.cols {
            self.host
                .insert_cols(sheet, extents.cols + 1, data_cols - extents.cols)
                .await?;
        }

        self.host.write_range(sheet, 1, 1, data).await?;

        info!(sheet, rows = data_rows, cols = data_cols, "sheet replaced");
        Ok(())
    }

    /// Insert a dataset at the top of a sheet without touching what is
    /// already there.
    ///
    /// New blank rows are inserted at the top and bulk-written; existing
    /// rows shift down intact. Pairing this with [`clean_up_sheet`]
    /// keeps the newest version of each key: dedup keeps first
    /// occurrences, and the newest rows sit first.
    ///
    /// Fails before any mutation if the dataset is wider than the
    /// sheet; this mode never adds columns. A zero-row dataset is a
    /// no-op.
    ///
    /// [`clean_up_sheet`]: SheetSync::clean_up_sheet
    pub async fn insert_data(&self, sheet: &str, data: &Rows) -> Result<()> {
        if data.is_empty() {
            // Nothing to do, not an error.
            return Ok(());
        }
        let (data_rows, data_cols) = dataset_extents(data)?;
        let extents = self.host.extents(sheet).await?;

        if data_cols > extents.cols {
            return Err(Error::sheet_shape(format!(
                "dataset has {data_cols} columns but sheet '{sheet}' has {}",
                extents.cols
            )));
        }

        self.host.insert_rows(sheet, 1, data_rows).await?;
        self.host.write_range(sheet, 1, 1, data).await?;

        info!(sheet, rows = data_rows, "rows inserted at top");
        Ok(())
    }

    /// Reapply data consistency after top-inserts: native dedup on the
    /// key columns (first occurrence wins), then empty-row removal.
    pub async fn clean_up_sheet(&self, sheet: &str, key_columns: &[usize]) -> Result<()> {
        if !key_columns.is_empty() {
            self.host.remove_duplicates(sheet, key_columns).await?;
        }
        self.delete_empty_rows(sheet, key_columns.first().copied().unwrap_or(1))
            .await
    }

    /// Remove rows with no primary-key content.
    ///
    /// Fully-empty trailing rows go in one bulk delete. The remaining
    /// rows are then walked for stragglers whose key cell is empty; in
    /// normal operation that pass finds little or nothing.
    pub async fn delete_empty_rows(&self, sheet: &str, primary_key_column: usize) -> Result<()> {
        let filled = self.host.last_data_row(sheet).await?;
        let total = self.host.extents(sheet).await?.rows;

        if filled == 0 {
            // Nothing on the sheet at all.
            return Ok(());
        }
        if total > filled {
            self.host.delete_rows(sheet, filled + 1, total - filled).await?;
        }

        let keys = self
            .host
            .read_range(sheet, 1, primary_key_column, filled, 1)
            .await?;

        // Bottom-up so earlier deletions don't shift pending indices.
        let mut removed = 0usize;
        for (index, row) in keys.iter().enumerate().rev() {
            let empty = row.first().map_or(true, cell_is_empty);
            if empty {
                self.host.delete_rows(sheet, index + 1, 1).await?;
                removed += 1;
            }
        }

        if removed > 0 {
            debug!(sheet, removed, "removed rows with empty keys");
        }
        Ok(())
    }

    /// Build a lookup from a sheet with a known structure, fronted by
    /// the cache.
    ///
    /// Row 1 is assumed to be headers and skipped. The key comes from
    /// `key_column`; each entry is an object of output-name to cell
    /// value from `value_columns`. Columns are 1-based. A solution
    /// whose lookup outgrows the cache ceiling has probably outgrown a
    /// sheet, but the call still returns it, just uncached.
    pub async fn keyed_columns(
        &self,
        sheet: &str,
        key_column: usize,
        value_columns: &[(String, usize)],
        cache: &CacheLayer,
        policy: &CachePolicy,
    ) -> Result<JsonObject> {
        let key = format!("props-{sheet}");

        if policy.reads() {
            if let Some(cached) = cache.get_json::<JsonObject>(&key).await {
                return Ok(cached);
            }
        }

        let filled = self.host.last_data_row(sheet).await?;
        let cols = self.host.extents(sheet).await?.cols;

        let mut lookup = JsonObject::new();
        if filled > 1 {
            let rows = self.host.read_range(sheet, 2, 1, filled - 1, cols).await?;
            for row in &rows {
                let entry_key = match row.get(key_column - 1) {
                    Some(JsonValue::String(s)) => s.clone(),
                    Some(JsonValue::Null) | None => String::new(),
                    Some(other) => other.to_string(),
                };
                let mut entry = JsonObject::new();
                for (name, col) in value_columns {
                    entry.insert(
                        name.clone(),
                        row.get(col - 1).cloned().unwrap_or(JsonValue::Null),
                    );
                }
                lookup.insert(entry_key, JsonValue::Object(entry));
            }
        }

        if policy.writes() {
            cache.put_json(&key, &lookup, policy).await;
        }

        Ok(lookup)
    }
}

impl std::fmt::Debug for SheetSync {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SheetSync").finish_non_exhaustive()
    }
}

/// Validate a dataset is rectangular and return (rows, cols)
fn dataset_extents(data: &Rows) -> Result<(usize, usize)> {
    let Some(first) = data.first() else {
        return Err(Error::sheet_shape("dataset has no rows"));
    };
    let cols = first.len();
    if cols == 0 {
        return Err(Error::sheet_shape("dataset rows have no columns"));
    }
    if let Some(ragged) = data.iter().position(|row| row.len() != cols) {
        return Err(Error::sheet_shape(format!(
            "row {ragged} has {} cells, expected {cols}",
            data[ragged].len()
        )));
    }
    Ok((data.len(), cols))
}
