//! Condition builder functions
//!
//! Each builder is pure data construction: no side effects, no network.

use super::types::{
    Condition, Filter, JobStatusClass, VALUE_FROM_DATE, VALUE_TO_DATE,
};
use chrono::{Duration, Utc};

// Filter group ids, one per filterable attribute family.
const GROUP_JOB_STATUS: u16 = 3;
const GROUP_TIME_DATE: u16 = 5;
const GROUP_INVOICE_STATUS: u16 = 26;
const GROUP_INVOICE_DATE: u16 = 35;
const GROUP_QUOTE_STATUS: u16 = 36;
const GROUP_JOB_ARCHIVED_DATE: u16 = 134;

// Job status values.
const JOB_IN_PLAY: u32 = 1;
const JOB_DONE: u32 = 2;
const JOB_ARCHIVED: u32 = 4;
const JOB_PAUSED: u32 = 5;

/// Resolve a day offset into an absolute `YYYY-MM-DD` date, anchored on
/// the current UTC date. Positive offsets look forward, negative back.
pub fn date_offset(days: i64) -> String {
    (Utc::now() + Duration::days(days))
        .format("%Y-%m-%d")
        .to_string()
}

/// Filter jobs by status class.
///
/// The classes are mutually exclusive filter sets; requesting `All`
/// sends the explicit union of every status value.
pub fn job_status(class: JobStatusClass) -> Condition {
    let statuses: &[u32] = match class {
        JobStatusClass::Active => &[JOB_IN_PLAY, JOB_DONE, JOB_PAUSED],
        JobStatusClass::Archived => &[JOB_ARCHIVED],
        JobStatusClass::All => &[JOB_IN_PLAY, JOB_DONE, JOB_ARCHIVED, JOB_PAUSED],
    };
    Condition::any_of(
        GROUP_JOB_STATUS,
        statuses.iter().copied().map(Filter::equals).collect(),
    )
}

/// Jobs archived on or after `days_ago` days before today
pub fn job_archived_from(days_ago: i64) -> Condition {
    Condition::all_of(
        GROUP_JOB_ARCHIVED_DATE,
        vec![Filter::absolute_date(
            VALUE_FROM_DATE,
            date_offset(-days_ago),
        )],
    )
}

/// Invoices in a billable state: awaiting payment, paid, or the legacy
/// status 7 carried over from the remote service
pub fn invoice_status() -> Condition {
    // 2 awaiting payment, 3 paid, 7 legacy
    Condition::any_of(
        GROUP_INVOICE_STATUS,
        [2, 3, 7].into_iter().map(Filter::equals).collect(),
    )
}

/// Invoices awaiting payment only
pub fn invoice_status_unpaid() -> Condition {
    Condition::any_of(GROUP_INVOICE_STATUS, vec![Filter::equals(2)])
}

/// Invoices issued on or after `days_ago` days before today
pub fn invoice_from(days_ago: i64) -> Condition {
    Condition::all_of(
        GROUP_INVOICE_DATE,
        vec![Filter::absolute_date(
            VALUE_FROM_DATE,
            date_offset(-days_ago),
        )],
    )
}

/// Quotes in an open state
pub fn quote_status() -> Condition {
    // 1 draft, 2 sent, 5 approved
    Condition::any_of(
        GROUP_QUOTE_STATUS,
        [1, 2, 5].into_iter().map(Filter::equals).collect(),
    )
}

/// Logged time on or after the given `YYYY-MM-DD` date.
///
/// Date comparisons are not inclusive of the boundary on the remote
/// side; callers pad the range when they need the boundary day.
pub fn time_from(date: impl Into<String>) -> Condition {
    Condition::all_of(
        GROUP_TIME_DATE,
        vec![Filter::absolute_date(VALUE_FROM_DATE, date)],
    )
}

/// Logged time on or before the given `YYYY-MM-DD` date
pub fn time_to(date: impl Into<String>) -> Condition {
    Condition::all_of(
        GROUP_TIME_DATE,
        vec![Filter::absolute_date(VALUE_TO_DATE, date)],
    )
}

/// Logged time from `days_ago` days before today onward
pub fn time_from_days_ago(days_ago: i64) -> Condition {
    time_from(date_offset(-days_ago))
}

/// Logged time up to today
pub fn time_to_now() -> Condition {
    time_to(date_offset(0))
}
