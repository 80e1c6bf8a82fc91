//! Pagination strategy implementations

use super::types::{NextPage, PageParams, Paginator};
use crate::types::{JsonObject, JsonValue};

// ============================================================================
// Token Continuation
// ============================================================================

/// Token-continuation pagination.
///
/// The response body carries an opaque continuation token under a fixed
/// key. The token must be round-tripped verbatim as a query parameter on
/// the following request; a response without the key is the final page.
#[derive(Debug, Clone)]
pub struct TokenPaginator {
    /// Response body key holding the continuation token
    pub token_key: String,
    /// Query parameter name carrying the token on the next request
    pub token_param: String,
}

impl TokenPaginator {
    /// Create a token paginator reading and sending the same name
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            token_key: name.clone(),
            token_param: name,
        }
    }
}

impl Default for TokenPaginator {
    fn default() -> Self {
        Self::new("offset")
    }
}

impl Paginator for TokenPaginator {
    fn first_page(&mut self) -> PageParams {
        PageParams::none()
    }

    fn next_page(&mut self, body: &JsonValue, _records_in_page: usize) -> NextPage {
        match body.get(&self.token_key) {
            Some(JsonValue::String(token)) if !token.is_empty() => {
                NextPage::Continue(PageParams::with_query(&self.token_param, token))
            }
            Some(JsonValue::Number(token)) => {
                NextPage::Continue(PageParams::with_query(&self.token_param, token.to_string()))
            }
            _ => NextPage::Done,
        }
    }
}

// ============================================================================
// Counted Pages
// ============================================================================

/// Counted-page pagination.
///
/// The client drives: each page advances an offset by a fixed page size,
/// contributed to the request body as `offset` and `maxResults`. The
/// server never signals completion explicitly; the first empty result
/// page terminates the loop.
#[derive(Debug, Clone)]
pub struct CountedPaginator {
    /// Records requested per page
    pub page_size: u32,
    /// Request body field carrying the record offset
    pub offset_field: String,
    /// Request body field carrying the page size
    pub limit_field: String,
    page: u32,
}

impl CountedPaginator {
    /// Create a counted paginator with the given page size
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size,
            offset_field: "offset".to_string(),
            limit_field: "maxResults".to_string(),
            page: 0,
        }
    }

    fn body_for(&self, page: u32) -> JsonObject {
        let mut body = JsonObject::new();
        body.insert(
            self.offset_field.clone(),
            JsonValue::from(u64::from(page) * u64::from(self.page_size)),
        );
        body.insert(self.limit_field.clone(), JsonValue::from(self.page_size));
        body
    }
}

impl Paginator for CountedPaginator {
    fn first_page(&mut self) -> PageParams {
        self.page = 0;
        PageParams::with_body(self.body_for(0))
    }

    fn next_page(&mut self, _body: &JsonValue, records_in_page: usize) -> NextPage {
        if records_in_page == 0 {
            return NextPage::Done;
        }
        self.page += 1;
        NextPage::Continue(PageParams::with_body(self.body_for(self.page)))
    }
}
