//! Paginated fetch engine
//!
//! One loop serves both API clients: issue a request, decode the page,
//! ask the pagination strategy for the next request, repeat. Pages are
//! fetched strictly sequentially and records accumulate in arrival
//! order. A transport failure, non-2xx status, or malformed body on any
//! page aborts the whole fetch with no partial result and no retry.

mod decoders;

pub use decoders::{RecordDecoder, RecordsField, SearchResults};

use crate::error::Result;
use crate::http::{HttpClient, RequestConfig};
use crate::pagination::{NextPage, PageParams, Paginator};
use crate::types::{JsonObject, JsonValue};
use reqwest::Method;
use tracing::{debug, info};

/// The constant parts of every page request: method, URL, and the body
/// template the paginator overlays its fields onto. Conditions live in
/// the template and are therefore identical on every page.
#[derive(Debug, Clone)]
pub struct RequestTemplate {
    /// HTTP method for each page request
    pub method: Method,
    /// Absolute endpoint URL
    pub url: String,
    /// Base JSON body, if the endpoint takes one
    pub body: Option<JsonObject>,
}

impl RequestTemplate {
    /// A GET template with no body
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            url: url.into(),
            body: None,
        }
    }

    /// A POST template around the given body
    pub fn post(url: impl Into<String>, body: JsonObject) -> Self {
        Self {
            method: Method::POST,
            url: url.into(),
            body: Some(body),
        }
    }
}

/// Fetch every page from an endpoint, returning all records in arrival
/// order.
///
/// The paginator decides continuation; the decoder normalizes the page
/// body into records. Emits one observability event per page with the
/// cumulative record count.
pub async fn fetch_all(
    client: &HttpClient,
    template: &RequestTemplate,
    paginator: &mut dyn Paginator,
    decoder: &dyn RecordDecoder,
) -> Result<Vec<JsonValue>> {
    let mut results: Vec<JsonValue> = Vec::new();
    let mut params = paginator.first_page();
    let mut page = 0u32;

    loop {
        let body: JsonValue = client
            .send_json(
                template.method.clone(),
                &template.url,
                page_request(template, &params),
            )
            .await?;

        let records = decoder.records(&body)?;
        let count = records.len();
        results.extend(records);
        page += 1;

        debug!(page, fetched = count, total = results.len(), "fetched page");

        match paginator.next_page(&body, count) {
            NextPage::Continue(next) => params = next,
            NextPage::Done => break,
        }
    }

    info!(
        total = results.len(),
        pages = page,
        url = %template.url,
        "fetch complete"
    );
    Ok(results)
}

/// Merge a template and one page's parameters into a request config
fn page_request(template: &RequestTemplate, params: &PageParams) -> RequestConfig {
    let mut config = RequestConfig::new();
    for (key, value) in &params.query {
        config = config.query(key, value);
    }

    if template.body.is_some() || !params.body.is_empty() {
        let mut body = template.body.clone().unwrap_or_default();
        for (key, value) in &params.body {
            body.insert(key.clone(), value.clone());
        }
        config = config.json(JsonValue::Object(body));
    }

    config
}

#[cfg(test)]
mod tests;
