use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::params::ParamValue;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Anything other than exactly `desc` sorts ascending
    pub fn parse_lenient(s: &str) -> Self {
        if s == "desc" {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SortDirective {
    pub field: String,
    pub direction: SortDirection,
}

impl SortDirective {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    /// `field,direction`, one per repeated `sort` parameter upstream
    pub fn to_upstream(&self) -> String {
        format!("{},{}", self.field, self.direction)
    }
}

/// Parse `field_direction` tokens (comma separated, possibly repeated) into
/// sort directives, keeping input order and duplicates.
pub fn build_sort_query(sort: Option<&ParamValue>) -> Vec<SortDirective> {
    let Some(sort) = sort else {
        return Vec::new();
    };

    sort.values()
        .into_iter()
        .flat_map(|value| value.split(','))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .filter_map(|token| {
            let (field, direction) = token.split_once('_').unwrap_or((token, ""));
            if field.is_empty() {
                return None;
            }
            Some(SortDirective::new(field, SortDirection::parse_lenient(direction)))
        })
        .collect()
}
