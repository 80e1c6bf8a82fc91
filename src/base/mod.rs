//! Tabular-database client
//!
//! Works against one base of the tabular-database API: field metadata,
//! token-paginated record listing, single-record create/update, and the
//! cache-fronted lookup builder.

use crate::cache::{cache_key, CacheLayer, CachePolicy};
use crate::error::{Error, Result};
use crate::fetch::{fetch_all, RecordsField, RequestTemplate};
use crate::http::{HttpClient, RequestConfig};
use crate::pagination::TokenPaginator;
use crate::projection::{build_lookup, LookupTable, ProjectionSpec};
use crate::types::{FieldMeta, FieldMetaMap, JsonObject, Record};
use reqwest::Method;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

/// Options for one cache-fronted lookup call
#[derive(Debug, Clone)]
pub struct LookupOptions {
    /// Field id keying the lookup; `None` keys by record id
    pub key_field: Option<String>,
    /// What to project each record into
    pub spec: ProjectionSpec,
    /// Caching behavior for this call
    pub policy: CachePolicy,
    /// Explicit cache key, for multiple lookups against one table
    pub cache_id: Option<String>,
}

impl LookupOptions {
    /// Options with the given projection, record-id keys, and default
    /// cache policy
    pub fn new(spec: ProjectionSpec) -> Self {
        Self {
            key_field: None,
            spec,
            policy: CachePolicy::default(),
            cache_id: None,
        }
    }

    /// Key the lookup by a field instead of the record id
    #[must_use]
    pub fn key_field(mut self, field_id: impl Into<String>) -> Self {
        self.key_field = Some(field_id.into());
        self
    }

    /// Override the cache policy
    #[must_use]
    pub fn policy(mut self, policy: CachePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Override the cache key
    #[must_use]
    pub fn cache_id(mut self, id: impl Into<String>) -> Self {
        self.cache_id = Some(id.into());
        self
    }
}

#[derive(Debug, Deserialize)]
struct TableMeta {
    id: String,
    #[serde(default)]
    fields: Vec<FieldMeta>,
}

#[derive(Debug, Deserialize)]
struct BaseMeta {
    #[serde(default)]
    tables: Vec<TableMeta>,
}

/// Client for one base of the tabular-database API
#[derive(Debug)]
pub struct BaseClient {
    http: HttpClient,
    api_url: String,
    base: String,
    cache: CacheLayer,
}

impl BaseClient {
    /// Create a client for a base.
    ///
    /// `http` must carry the bearer token; `api_url` is the API root.
    pub fn new(
        http: HttpClient,
        api_url: impl Into<String>,
        base: impl Into<String>,
        cache: CacheLayer,
    ) -> Self {
        Self {
            http,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            base: base.into(),
            cache,
        }
    }

    /// The base this client reads
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Resolve field metadata for a table: field id to meta.
    ///
    /// Resolved fresh on every call; schema calls are low-cardinality
    /// and freshness wins over reuse here.
    pub async fn field_meta(&self, table: &str) -> Result<FieldMetaMap> {
        let url = format!("{}/meta/bases/{}/tables", self.api_url, self.base);
        let meta: BaseMeta = self.http.get_json(&url).await?;

        let table_meta = meta
            .tables
            .into_iter()
            .find(|t| t.id == table)
            .ok_or_else(|| Error::table_not_found(table))?;

        Ok(table_meta
            .fields
            .into_iter()
            .map(|f| (f.id.clone(), f))
            .collect())
    }

    /// Retrieve every record from a table, across all pages
    pub async fn records(&self, table: &str) -> Result<Vec<Record>> {
        let template = RequestTemplate::get(self.table_url(table));
        let mut paginator = TokenPaginator::default();

        let raw = fetch_all(&self.http, &template, &mut paginator, &RecordsField).await?;
        raw.into_iter()
            .map(|value| serde_json::from_value(value).map_err(Error::from))
            .collect()
    }

    /// Create one record
    pub async fn create_record(&self, table: &str, fields: JsonObject) -> Result<()> {
        let body = json!({"records": [{"fields": fields}]});
        self.http
            .send(
                Method::POST,
                &self.table_url(table),
                RequestConfig::new().json(body),
            )
            .await?;
        Ok(())
    }

    /// Update fields on an existing record
    pub async fn update_record(
        &self,
        table: &str,
        record_id: &str,
        fields: JsonObject,
    ) -> Result<()> {
        let url = format!("{}/{record_id}", self.table_url(table));
        let body = json!({"fields": fields});
        self.http
            .send(Method::PATCH, &url, RequestConfig::new().json(body))
            .await?;
        Ok(())
    }

    /// Build a lookup table from a table, fronted by the cache.
    ///
    /// A cache hit short-circuits everything. On a miss the metadata is
    /// re-resolved, all records fetched, and the projection built; the
    /// result is then written back under the call's policy (by default
    /// even when the read path was disabled, so the entry is fresh for
    /// the next caller).
    pub async fn lookup_list(&self, table: &str, options: &LookupOptions) -> Result<LookupTable> {
        let key = options
            .cache_id
            .clone()
            .unwrap_or_else(|| cache_key("lookup", &self.base, table));

        if options.policy.reads() {
            if let Some(cached) = self.cache.get_json::<LookupTable>(&key).await {
                return Ok(cached);
            }
        }

        let meta = self.field_meta(table).await?;
        let records = self.records(table).await?;
        let lookup = build_lookup(&records, &meta, options.key_field.as_deref(), &options.spec)?;

        if options.policy.writes() {
            self.cache.put_json(&key, &lookup, &options.policy).await;
        } else {
            debug!(key, "cache write suppressed by policy");
        }

        Ok(lookup)
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}/{table}", self.api_url, self.base)
    }
}
