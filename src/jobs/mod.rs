//! Job-management client
//!
//! Searches the job-management API through the shared fetch engine with
//! counted-page pagination. Every search shares one POST body skeleton;
//! the supplied conditions are AND-ed into its filter groups. A handful
//! of read endpoints use plain GET instead.

use crate::conditions::{self, Condition, JobStatusClass};
use crate::config::EndpointRegistry;
use crate::error::Result;
use crate::fetch::{fetch_all, RequestTemplate, SearchResults};
use crate::http::HttpClient;
use crate::pagination::CountedPaginator;
use crate::types::{JsonObject, JsonValue};
use serde_json::json;
use tracing::debug;

/// Default records per search page
pub const DEFAULT_PAGE_SIZE: u32 = 300;

/// Client for the job-management API
#[derive(Debug)]
pub struct JobsClient {
    http: HttpClient,
    endpoints: EndpointRegistry,
    page_size: u32,
}

impl JobsClient {
    /// Create a client over an endpoint registry.
    ///
    /// `http` must carry the bearer token.
    pub fn new(http: HttpClient, endpoints: EndpointRegistry) -> Self {
        Self {
            http,
            endpoints,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Override the search page size
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// The registry this client searches
    pub fn endpoints(&self) -> &EndpointRegistry {
        &self.endpoints
    }

    // ========================================================================
    // Generic search
    // ========================================================================

    /// Search an endpoint with the given conditions, fetching all pages.
    ///
    /// Conditions combine conjunctively; there is no disjunction across
    /// conditions at this level.
    pub async fn search(&self, endpoint: &str, conditions: &[Condition]) -> Result<Vec<JsonValue>> {
        let template = RequestTemplate::post(endpoint, search_body(conditions));
        let mut paginator = CountedPaginator::new(self.page_size);
        fetch_all(&self.http, &template, &mut paginator, &SearchResults).await
    }

    // ========================================================================
    // Jobs
    // ========================================================================

    /// Get jobs in the given status class
    pub async fn fetch_jobs(&self, status: JobStatusClass) -> Result<Vec<JsonValue>> {
        debug!("Fetching jobs");
        self.search(&self.endpoints.jobs, &[conditions::job_status(status)])
            .await
    }

    /// Get jobs in every status
    pub async fn fetch_all_jobs(&self) -> Result<Vec<JsonValue>> {
        self.fetch_jobs(JobStatusClass::All).await
    }

    /// Get jobs that are not archived
    pub async fn fetch_active_jobs(&self) -> Result<Vec<JsonValue>> {
        self.fetch_jobs(JobStatusClass::Active).await
    }

    /// Get jobs archived within the last `since_days_ago` days.
    ///
    /// You probably don't want all archived jobs since forever.
    pub async fn fetch_archived_jobs(&self, since_days_ago: i64) -> Result<Vec<JsonValue>> {
        debug!("Fetching jobs archived within {since_days_ago} days");
        self.search(
            &self.endpoints.jobs,
            &[
                conditions::job_status(JobStatusClass::Archived),
                conditions::job_archived_from(since_days_ago),
            ],
        )
        .await
    }

    // ========================================================================
    // Job items
    // ========================================================================

    /// Get job items across every job status
    pub async fn fetch_all_job_items(&self) -> Result<Vec<JsonValue>> {
        debug!("Fetching all job items");
        self.search(
            &self.endpoints.job_items,
            &[conditions::job_status(JobStatusClass::All)],
        )
        .await
    }

    /// Get job items of active jobs
    pub async fn fetch_active_job_items(&self) -> Result<Vec<JsonValue>> {
        self.search(
            &self.endpoints.job_items,
            &[conditions::job_status(JobStatusClass::Active)],
        )
        .await
    }

    /// Get job items of jobs archived within `since_days_ago` days
    pub async fn fetch_archived_job_items(&self, since_days_ago: i64) -> Result<Vec<JsonValue>> {
        self.search(
            &self.endpoints.job_items,
            &[
                conditions::job_status(JobStatusClass::Archived),
                conditions::job_archived_from(since_days_ago),
            ],
        )
        .await
    }

    // ========================================================================
    // Companies and users
    // ========================================================================

    /// Get every company
    pub async fn fetch_all_companies(&self) -> Result<Vec<JsonValue>> {
        debug!("Fetching companies");
        self.search(&self.endpoints.companies, &[]).await
    }

    /// Get users. This endpoint is a plain GET, not a paginated search.
    pub async fn fetch_users(&self) -> Result<JsonValue> {
        debug!("Fetching users");
        self.http.get_json(&self.endpoints.users).await
    }

    // ========================================================================
    // Expenses
    // ========================================================================

    /// Get expenses across every job status
    pub async fn fetch_all_expenses(&self) -> Result<Vec<JsonValue>> {
        self.search(
            &self.endpoints.expenses,
            &[conditions::job_status(JobStatusClass::All)],
        )
        .await
    }

    /// Get expenses of active jobs
    pub async fn fetch_expenses_of_active_jobs(&self) -> Result<Vec<JsonValue>> {
        self.search(
            &self.endpoints.expenses,
            &[conditions::job_status(JobStatusClass::Active)],
        )
        .await
    }

    /// Get expenses of jobs archived within `since_days_ago` days
    pub async fn fetch_expenses_of_recent_archived_jobs(
        &self,
        since_days_ago: i64,
    ) -> Result<Vec<JsonValue>> {
        self.search(
            &self.endpoints.expenses,
            &[
                conditions::job_status(JobStatusClass::Archived),
                conditions::job_archived_from(since_days_ago),
            ],
        )
        .await
    }

    // ========================================================================
    // Invoices
    // ========================================================================

    /// Get billable invoices across every job status
    pub async fn fetch_all_invoices(&self) -> Result<Vec<JsonValue>> {
        self.search(
            &self.endpoints.invoices,
            &[
                conditions::job_status(JobStatusClass::All),
                conditions::invoice_status(),
            ],
        )
        .await
    }

    /// Get billable invoices of active jobs
    pub async fn fetch_invoices_of_active_jobs(&self) -> Result<Vec<JsonValue>> {
        self.search(
            &self.endpoints.invoices,
            &[
                conditions::job_status(JobStatusClass::Active),
                conditions::invoice_status(),
            ],
        )
        .await
    }

    /// Get billable invoices of jobs archived within `since_days_ago` days
    pub async fn fetch_invoices_of_recent_archived_jobs(
        &self,
        since_days_ago: i64,
    ) -> Result<Vec<JsonValue>> {
        self.search(
            &self.endpoints.invoices,
            &[
                conditions::job_status(JobStatusClass::Archived),
                conditions::job_archived_from(since_days_ago),
                conditions::invoice_status(),
            ],
        )
        .await
    }

    // ========================================================================
    // Invoice lines
    // ========================================================================

    /// Get all billable invoice lines.
    ///
    /// Job status cannot be used on this endpoint: a date filter forces
    /// archived-job responses on the remote side, so a wide date window
    /// stands in for "all".
    pub async fn fetch_all_invoice_lines(&self) -> Result<Vec<JsonValue>> {
        self.search(
            &self.endpoints.invoice_lines,
            &[
                conditions::invoice_from(1500),
                conditions::invoice_status(),
            ],
        )
        .await
    }

    /// Get unpaid invoice lines
    pub async fn fetch_invoice_lines_unpaid(&self) -> Result<Vec<JsonValue>> {
        self.search(
            &self.endpoints.invoice_lines,
            &[
                conditions::invoice_from(1500),
                conditions::invoice_status_unpaid(),
            ],
        )
        .await
    }

    /// Get billable invoice lines from the last `since_days_ago` days
    pub async fn fetch_invoice_lines_recent(&self, since_days_ago: i64) -> Result<Vec<JsonValue>> {
        self.search(
            &self.endpoints.invoice_lines,
            &[
                conditions::invoice_from(since_days_ago),
                conditions::invoice_status(),
            ],
        )
        .await
    }

    // ========================================================================
    // Quotes
    // ========================================================================

    /// Get open quotes across every job status
    pub async fn fetch_all_quotes(&self) -> Result<Vec<JsonValue>> {
        self.search(
            &self.endpoints.quotes,
            &[
                conditions::job_status(JobStatusClass::All),
                conditions::quote_status(),
            ],
        )
        .await
    }

    /// Get open quotes of active jobs
    pub async fn fetch_quotes_of_active_jobs(&self) -> Result<Vec<JsonValue>> {
        self.search(
            &self.endpoints.quotes,
            &[
                conditions::job_status(JobStatusClass::Active),
                conditions::quote_status(),
            ],
        )
        .await
    }

    /// Get open quotes of jobs archived within `since_days_ago` days
    pub async fn fetch_quotes_of_recent_archived_jobs(
        &self,
        since_days_ago: i64,
    ) -> Result<Vec<JsonValue>> {
        self.search(
            &self.endpoints.quotes,
            &[
                conditions::job_status(JobStatusClass::Archived),
                conditions::job_archived_from(since_days_ago),
                conditions::quote_status(),
            ],
        )
        .await
    }

    // ========================================================================
    // Logged time
    // ========================================================================

    /// Get logged time between two `YYYY-MM-DD` dates.
    ///
    /// The remote comparisons are exclusive of the boundary days.
    pub async fn fetch_time_range(&self, from_date: &str, to_date: &str) -> Result<Vec<JsonValue>> {
        self.search(
            &self.endpoints.time,
            &[
                conditions::job_status(JobStatusClass::All),
                conditions::time_from(from_date),
                conditions::time_to(to_date),
            ],
        )
        .await
    }

    /// Get logged time from `days_ago` days back until now
    pub async fn fetch_time_since(&self, days_ago: i64) -> Result<Vec<JsonValue>> {
        self.search(
            &self.endpoints.time,
            &[
                conditions::job_status(JobStatusClass::All),
                conditions::time_from_days_ago(days_ago),
                conditions::time_to_now(),
            ],
        )
        .await
    }
}

/// The POST body skeleton every search request shares.
///
/// The paginator overlays `offset` and `maxResults` per page; the
/// conditions never change between pages.
fn search_body(conditions: &[Condition]) -> JsonObject {
    let mut body = JsonObject::new();
    body.insert("conditionMatchTypeId".to_string(), json!(1)); // and
    body.insert(
        "filterGroups".to_string(),
        serde_json::to_value(conditions).unwrap_or_else(|_| json!([])),
    );
    body.insert("wildcardSearch".to_string(), json!(""));
    body.insert("sortAscending".to_string(), json!(true));
    body
}

#[cfg(test)]
mod tests;
