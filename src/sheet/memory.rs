//! In-memory sheet host
//!
//! A [`SheetHost`] backed by plain vectors, used by tests and as a
//! reference for the contract's index conventions. Records every
//! structural operation so tests can assert the minimal-delta behavior
//! of the sync engine.

use super::host::{SheetExtents, SheetHost};
use crate::error::{Error, Result};
use crate::types::{cell_is_empty, JsonValue, Rows};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

#[derive(Debug, Default)]
struct Grid {
    rows: Rows,
    cols: usize,
}

impl Grid {
    fn blank(rows: usize, cols: usize) -> Self {
        Self {
            rows: vec![vec![JsonValue::Null; cols]; rows],
            cols,
        }
    }

    fn seeded(values: Rows) -> Self {
        let cols = values.first().map_or(0, Vec::len);
        Self { rows: values, cols }
    }
}

/// In-memory sheet host with operation recording
#[derive(Debug, Default)]
pub struct MemorySheet {
    sheets: Mutex<HashMap<String, Grid>>,
    ops: Mutex<Vec<String>>,
}

impl MemorySheet {
    /// An empty host with no sheets
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a blank sheet of the given size
    pub fn with_sheet(self, name: impl Into<String>, rows: usize, cols: usize) -> Self {
        self.sheets
            .lock()
            .expect("sheet lock poisoned")
            .insert(name.into(), Grid::blank(rows, cols));
        self
    }

    /// Add a sheet pre-filled with values
    pub fn with_values(self, name: impl Into<String>, values: Rows) -> Self {
        self.sheets
            .lock()
            .expect("sheet lock poisoned")
            .insert(name.into(), Grid::seeded(values));
        self
    }

    /// Snapshot a sheet's current cells
    pub fn snapshot(&self, name: &str) -> Rows {
        self.sheets
            .lock()
            .expect("sheet lock poisoned")
            .get(name)
            .map(|grid| grid.rows.clone())
            .unwrap_or_default()
    }

    /// The structural operations performed so far, in order
    pub fn ops(&self) -> Vec<String> {
        self.ops.lock().expect("ops lock poisoned").clone()
    }

    fn record(&self, op: String) {
        self.ops.lock().expect("ops lock poisoned").push(op);
    }

    fn with_grid<T>(&self, sheet: &str, f: impl FnOnce(&mut Grid) -> Result<T>) -> Result<T> {
        let mut sheets = self.sheets.lock().expect("sheet lock poisoned");
        let grid = sheets
            .get_mut(sheet)
            .ok_or_else(|| Error::sheet_not_found(sheet))?;
        f(grid)
    }
}

#[async_trait]
impl SheetHost for MemorySheet {
    async fn extents(&self, sheet: &str) -> Result<SheetExtents> {
        self.with_grid(sheet, |grid| {
            Ok(SheetExtents {
                rows: grid.rows.len(),
                cols: grid.cols,
            })
        })
    }

    async fn last_data_row(&self, sheet: &str) -> Result<usize> {
        self.with_grid(sheet, |grid| {
            Ok(grid
                .rows
                .iter()
                .rposition(|row| row.iter().any(|cell| !cell_is_empty(cell)))
                .map_or(0, |index| index + 1))
        })
    }

    async fn insert_rows(&self, sheet: &str, before_row: usize, count: usize) -> Result<()> {
        self.record(format!("insert_rows({before_row}, {count})"));
        self.with_grid(sheet, |grid| {
            if before_row == 0 || before_row > grid.rows.len() + 1 {
                return Err(Error::sheet_shape(format!(
                    "insert before row {before_row} outside sheet"
                )));
            }
            let blank = vec![JsonValue::Null; grid.cols];
            for _ in 0..count {
                grid.rows.insert(before_row - 1, blank.clone());
            }
            Ok(())
        })
    }

    async fn delete_rows(&self, sheet: &str, start_row: usize, count: usize) -> Result<()> {
        self.record(format!("delete_rows({start_row}, {count})"));
        self.with_grid(sheet, |grid| {
            if start_row == 0 || start_row + count - 1 > grid.rows.len() {
                return Err(Error::sheet_shape(format!(
                    "delete of rows {start_row}..{} outside sheet",
                    start_row + count - 1
                )));
            }
            grid.rows.drain(start_row - 1..start_row - 1 + count);
            Ok(())
        })
    }

    async fn insert_cols(&self, sheet: &str, before_col: usize, count: usize) -> Result<()> {
        self.record(format!("insert_cols({before_col}, {count})"));
        self.with_grid(sheet, |grid| {
            if before_col == 0 || before_col > grid.cols + 1 {
                return Err(Error::sheet_shape(format!(
                    "insert before column {before_col} outside sheet"
                )));
            }
            for row in &mut grid.rows {
                for _ in 0..count {
                    row.insert(before_col - 1, JsonValue::Null);
                }
            }
            grid.cols += count;
            Ok(())
        })
    }

    async fn delete_cols(&self, sheet: &str, start_col: usize, count: usize) -> Result<()> {
        self.record(format!("delete_cols({start_col}, {count})"));
        self.with_grid(sheet, |grid| {
            if start_col == 0 || start_col + count - 1 > grid.cols {
                return Err(Error::sheet_shape(format!(
                    "delete of columns {start_col}..{} outside sheet",
                    start_col + count - 1
                )));
            }
            for row in &mut grid.rows {
                row.drain(start_col - 1..start_col - 1 + count);
            }
            grid.cols -= count;
            Ok(())
        })
    }

    async fn read_range(
        &self,
        sheet: &str,
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    ) -> Result<Rows> {
        self.with_grid(sheet, |grid| {
            let mut out = Rows::with_capacity(rows);
            for r in row..row + rows {
                let source = grid.rows.get(r - 1);
                let mut cells = Vec::with_capacity(cols);
                for c in col..col + cols {
                    cells.push(
                        source
                            .and_then(|cells| cells.get(c - 1))
                            .cloned()
                            .unwrap_or(JsonValue::Null),
                    );
                }
                out.push(cells);
            }
            Ok(out)
        })
    }

    async fn write_range(
        &self,
        sheet: &str,
        row: usize,
        col: usize,
        values: &[Vec<JsonValue>],
    ) -> Result<()> {
        self.record(format!(
            "write_range({row}, {col}, {}x{})",
            values.len(),
            values.first().map_or(0, Vec::len)
        ));
        self.with_grid(sheet, |grid| {
            let rows = values.len();
            let cols = values.first().map_or(0, Vec::len);
            if row + rows - 1 > grid.rows.len() || col + cols - 1 > grid.cols {
                return Err(Error::sheet_shape(format!(
                    "write of {rows}x{cols} at ({row}, {col}) outside sheet"
                )));
            }
            for (r, source) in values.iter().enumerate() {
                for (c, value) in source.iter().enumerate() {
                    grid.rows[row - 1 + r][col - 1 + c] = value.clone();
                }
            }
            Ok(())
        })
    }

    async fn remove_duplicates(&self, sheet: &str, key_columns: &[usize]) -> Result<()> {
        self.record(format!("remove_duplicates({key_columns:?})"));
        self.with_grid(sheet, |grid| {
            let mut seen: HashSet<String> = HashSet::new();
            let mut kept = Rows::with_capacity(grid.rows.len());
            for row in grid.rows.drain(..) {
                let key = key_columns
                    .iter()
                    .map(|c| row.get(c - 1).cloned().unwrap_or(JsonValue::Null).to_string())
                    .collect::<Vec<_>>()
                    .join("\u{1f}");
                if seen.insert(key) {
                    kept.push(row);
                }
            }
            grid.rows = kept;
            Ok(())
        })
    }
}
