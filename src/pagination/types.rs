//! Pagination types and traits

use crate::types::{JsonObject, JsonValue, StringMap};

/// Parameters contributed by a paginator to one page request.
///
/// Token-style strategies speak through query parameters; counted-page
/// strategies overlay fields onto the request body. Either side may be
/// empty.
#[derive(Debug, Clone, Default)]
pub struct PageParams {
    /// Query parameters to add/replace on the request
    pub query: StringMap,
    /// Fields merged over the request body template
    pub body: JsonObject,
}

impl PageParams {
    /// Empty parameters (a bare first request)
    pub fn none() -> Self {
        Self::default()
    }

    /// Parameters carrying a single query parameter
    pub fn with_query(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut query = StringMap::new();
        query.insert(key.into(), value.into());
        Self {
            query,
            body: JsonObject::new(),
        }
    }

    /// Parameters carrying body overlay fields
    pub fn with_body(body: JsonObject) -> Self {
        Self {
            query: StringMap::new(),
            body,
        }
    }
}

/// Result of the next page computation
#[derive(Debug, Clone)]
pub enum NextPage {
    /// More pages available with these parameters
    Continue(PageParams),
    /// No more pages
    Done,
}

impl NextPage {
    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Check if this is a continue result
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue(_))
    }
}

/// Core trait for pagination strategies.
///
/// The engine calls [`first_page`](Paginator::first_page) once, then
/// [`next_page`](Paginator::next_page) after each response, passing the
/// parsed body and the number of records the page produced.
pub trait Paginator: Send {
    /// Parameters for the first request (no continuation yet)
    fn first_page(&mut self) -> PageParams;

    /// Inspect a response and decide whether another page follows
    fn next_page(&mut self, body: &JsonValue, records_in_page: usize) -> NextPage;
}
