//! # tabsync
//!
//! A Rust-native data-access layer that retrieves paginated records from
//! two REST backends (a tabular-database service and a job-management
//! service), shields them behind a TTL cache, projects raw records into
//! named lookup tables, and reconciles the results into a live tabular
//! sheet.
//!
//! ## Features
//!
//! - **Unified Pagination**: one fetch loop over two idioms, opaque
//!   continuation tokens and counted pages
//! - **Declarative Filters**: pure condition builders composed
//!   conjunctively into search queries
//! - **Schema-Aware Lookups**: opaque field ids resolved to names,
//!   projected into scalar or object lookup tables
//! - **TTL Caching**: size-capped cache fronting every lookup
//! - **Sheet Reconciliation**: resize-replace and top-insert strategies
//!   that preserve sheet identity and formatting
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tabsync::{
//!     BaseClient, CacheLayer, HttpClient, HttpClientConfig, LookupOptions,
//!     MemoryCache, ProjectionSpec, Result,
//! };
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let http = HttpClient::with_config(
//!         HttpClientConfig::builder().bearer_token("...").build(),
//!     );
//!     let cache = CacheLayer::new(Arc::new(MemoryCache::new()));
//!     let base = BaseClient::new(http, "https://tables.example.com/v0", "appX", cache);
//!
//!     let options = LookupOptions::new(ProjectionSpec::scalar("fldName"));
//!     let lookup = base.lookup_list("tblJobs", &options).await?;
//!     println!("{}", serde_json::to_string_pretty(&lookup)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   ┌─────────────┐
//! │ BaseClient  │   │ JobsClient  │      conditions (pure builders)
//! └──────┬──────┘   └──────┬──────┘
//!        │                 │
//!        ▼                 ▼
//! ┌─────────────────────────────────┐
//! │ fetch engine + paginators       │  ◄── cache layer (TTL, 100k cap)
//! └──────┬──────────────────────────┘
//!        ▼
//!   projection / flatten
//!        ▼
//! ┌─────────────────────────────────┐
//! │ SheetSync over SheetHost        │  resize-replace │ top-insert │ cleanup
//! └─────────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Configuration and endpoint registry
pub mod config;

/// Bearer-token HTTP client
pub mod http;

/// Pagination strategies
pub mod pagination;

/// Shared paginated-fetch engine
pub mod fetch;

/// Search condition builders
pub mod conditions;

/// TTL cache layer
pub mod cache;

/// Tabular-database client
pub mod base;

/// Record projection into lookup tables
pub mod projection;

/// Job-management client
pub mod jobs;

/// Tabular flattening
pub mod flatten;

/// Spreadsheet synchronization
pub mod sheet;

/// Secret store collaborator
pub mod secrets;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use base::{BaseClient, LookupOptions};
pub use cache::{CacheLayer, CachePolicy, CacheStore, MemoryCache};
pub use conditions::{Condition, Filter, JobStatusClass};
pub use config::{Config, EndpointRegistry};
pub use error::{Error, Result};
pub use fetch::{fetch_all, RecordDecoder, RequestTemplate};
pub use flatten::{flatten, ColumnSpec};
pub use http::{HttpClient, HttpClientConfig};
pub use jobs::JobsClient;
pub use pagination::{CountedPaginator, Paginator, TokenPaginator};
pub use projection::{build_lookup, LookupTable, ProjectionSpec};
pub use secrets::{EnvSecrets, SecretStore};
pub use sheet::{MemorySheet, SheetExtents, SheetHost, SheetSync};
pub use types::{FieldMeta, JsonObject, JsonValue, Record, Row, Rows};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
