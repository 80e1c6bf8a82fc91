//! Search condition builders
//!
//! Pure construction of the filter-group values the job-management API's
//! search endpoints accept. Builders take structured parameters and
//! return one [`Condition`]; callers pass an ordered sequence of
//! conditions to a query, which the client combines conjunctively. A
//! condition's internal filters may express an OR through its own match
//! type, but there is no disjunction across conditions.
//!
//! Day-offset parameters resolve to absolute `YYYY-MM-DD` dates at call
//! time, anchored on the current UTC date; relative date matching is
//! never used.

mod builders;
mod types;

pub use builders::{
    date_offset, invoice_from, invoice_status, invoice_status_unpaid, job_archived_from,
    job_status, quote_status, time_from, time_from_days_ago, time_to, time_to_now,
};
pub use types::{Condition, Filter, JobStatusClass};
