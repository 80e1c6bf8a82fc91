//! Pagination strategies
//!
//! Two incompatible pagination idioms share one loop shape:
//!
//! - **Token continuation**: the server returns an opaque token in the
//!   response body; the client round-trips it verbatim as a query
//!   parameter, and its absence signals completion.
//! - **Counted pages**: the client increments a page index against a
//!   fixed page size; an empty result page signals completion.
//!
//! The [`Paginator`] trait unifies both so the fetch engine never
//! branches on response shape.

mod strategies;
mod types;

pub use strategies::{CountedPaginator, TokenPaginator};
pub use types::{NextPage, PageParams, Paginator};
