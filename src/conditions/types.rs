//! Condition and filter wire types

use crate::types::JsonValue;
use serde::{Deserialize, Serialize};

/// How a group's internal filters combine: all must match (AND)
pub const MATCH_ALL: u8 = 1;

/// How a group's internal filters combine: any may match (OR)
pub const MATCH_ANY: u8 = 2;

/// Value match: equals
pub const VALUE_EQUALS: &str = "1";

/// Value match: on or after a date
pub const VALUE_FROM_DATE: &str = "5";

/// Value match: on or before a date
pub const VALUE_TO_DATE: &str = "6";

/// One filter group sent to a search endpoint.
///
/// Field names serialize exactly as the wire expects them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    /// How the filters inside this group combine (1 = and, 2 = or)
    pub condition_match_type_id: u8,

    /// Which attribute family this group filters on
    pub filter_group_type_id: u16,

    /// The individual value filters
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<Filter>,
}

impl Condition {
    /// A condition matching any of the given filters
    pub fn any_of(filter_group_type_id: u16, filters: Vec<Filter>) -> Self {
        Self {
            condition_match_type_id: MATCH_ANY,
            filter_group_type_id,
            filters,
        }
    }

    /// A condition requiring all of the given filters
    pub fn all_of(filter_group_type_id: u16, filters: Vec<Filter>) -> Self {
        Self {
            condition_match_type_id: MATCH_ALL,
            filter_group_type_id,
            filters,
        }
    }
}

/// One value filter inside a condition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    /// Comparison operator id; the wire carries these as strings
    pub value_match_type_id: String,

    /// Value compared against
    pub value: JsonValue,

    /// Present and `"false"` on date filters: the value is an absolute
    /// date, never a relative one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_relative_date_value_match_type: Option<String>,
}

impl Filter {
    /// An equality filter on a numeric status value
    pub fn equals(value: u32) -> Self {
        Self {
            value_match_type_id: VALUE_EQUALS.to_string(),
            value: JsonValue::from(value),
            is_relative_date_value_match_type: None,
        }
    }

    /// An absolute-date filter with the given comparison operator
    pub fn absolute_date(value_match_type_id: &str, date: impl Into<String>) -> Self {
        Self {
            value_match_type_id: value_match_type_id.to_string(),
            value: JsonValue::String(date.into()),
            is_relative_date_value_match_type: Some("false".to_string()),
        }
    }
}

/// Status classes for job-scoped queries.
///
/// Each class is an explicit, mutually exclusive filter set; `All` is
/// the union of every status value, never the absence of a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JobStatusClass {
    /// Jobs still on the board: in play, done, or paused
    #[default]
    Active,
    /// Archived jobs only
    Archived,
    /// Every status value
    All,
}
