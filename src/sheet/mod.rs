//! Spreadsheet synchronization
//!
//! Reconciles a rectangular dataset against a named sheet owned by an
//! external host. Two strategies: destructive resize-replace, which
//! adjusts the sheet's extents by the minimal row/column delta and then
//! overwrites the data range in one bulk write, and non-destructive
//! top-insert, which adds new rows at the top and relies on the host's
//! native first-occurrence-wins deduplication during cleanup.
//!
//! Sheets must already exist; creation is the host's business. Because
//! only row/column deltas are mutated, a sheet's identity, frozen rows,
//! and column-spanning formatting survive resynchronization.

mod host;
mod memory;
mod sync;

pub use host::{SheetExtents, SheetHost};
pub use memory::MemorySheet;
pub use sync::SheetSync;
