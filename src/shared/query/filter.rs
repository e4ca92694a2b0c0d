//! Translation of `field[operator]=value` search parameters into the textual
//! filter expression understood by the catalog API.
//!
//! The translation happens in two steps: [`parse_conditions`] turns the raw
//! parameter map into typed [`FilterCondition`]s, validating the operator once,
//! and each condition then renders itself into a clause. Clauses are joined
//! with `" and "`.
//!
//! ```text
//! name[eq]=O'Brien          ->  name eq 'O''Brien'
//! category.id[in]=1,2,3     ->  category.id in ('1','2','3')
//! name[containsIgnoreCase]=hoa  ->  containsIgnoreCase(name, 'hoa')
//! price[ge]=100             ->  price ge 100
//! ```

use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;

use super::params::{ParamValue, SearchParams};
use super::QueryError;

lazy_static! {
    /// `<field-path>[<operator>]`, where the field path may reference nested
    /// fields (`category.id`)
    static ref FILTER_KEY_REGEX: Regex =
        Regex::new(r"^([A-Za-z0-9_.]+)\[([A-Za-z0-9_]+)\]$").unwrap();
}

const CLAUSE_SEPARATOR: &str = " and ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterOperator {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
    Contains,
    ContainsIgnoreCase,
    StartsWith,
    StartsWithIgnoreCase,
    EndsWith,
    EndsWithIgnoreCase,
    Null,
    NotNull,
    Empty,
    NotEmpty,
    In,
    Nin,
}

impl FilterOperator {
    pub const ALL: [FilterOperator; 18] = [
        FilterOperator::Eq,
        FilterOperator::Ne,
        FilterOperator::Gt,
        FilterOperator::Ge,
        FilterOperator::Lt,
        FilterOperator::Le,
        FilterOperator::Contains,
        FilterOperator::ContainsIgnoreCase,
        FilterOperator::StartsWith,
        FilterOperator::StartsWithIgnoreCase,
        FilterOperator::EndsWith,
        FilterOperator::EndsWithIgnoreCase,
        FilterOperator::Null,
        FilterOperator::NotNull,
        FilterOperator::Empty,
        FilterOperator::NotEmpty,
        FilterOperator::In,
        FilterOperator::Nin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperator::Eq => "eq",
            FilterOperator::Ne => "ne",
            FilterOperator::Gt => "gt",
            FilterOperator::Ge => "ge",
            FilterOperator::Lt => "lt",
            FilterOperator::Le => "le",
            FilterOperator::Contains => "contains",
            FilterOperator::ContainsIgnoreCase => "containsIgnoreCase",
            FilterOperator::StartsWith => "startsWith",
            FilterOperator::StartsWithIgnoreCase => "startsWithIgnoreCase",
            FilterOperator::EndsWith => "endsWith",
            FilterOperator::EndsWithIgnoreCase => "endsWithIgnoreCase",
            FilterOperator::Null => "null",
            FilterOperator::NotNull => "notNull",
            FilterOperator::Empty => "empty",
            FilterOperator::NotEmpty => "notEmpty",
            FilterOperator::In => "in",
            FilterOperator::Nin => "nin",
        }
    }

    fn is_relational(&self) -> bool {
        matches!(
            self,
            FilterOperator::Gt | FilterOperator::Ge | FilterOperator::Lt | FilterOperator::Le
        )
    }
}

impl FromStr for FilterOperator {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterOperator::ALL
            .iter()
            .find(|op| op.as_str() == s)
            .copied()
            .ok_or_else(|| QueryError::UnsupportedOperator(s.to_string()))
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One validated `{field, operator, value}` triple
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCondition {
    pub field: String,
    pub operator: FilterOperator,
    pub value: ParamValue,
}

impl FilterCondition {
    /// Render the condition as a single clause of the filter language
    pub fn to_clause(&self) -> String {
        let field = &self.field;
        let op = self.operator.as_str();

        match self.operator {
            FilterOperator::In | FilterOperator::Nin => {
                let items: Vec<&str> = match &self.value {
                    ParamValue::Single(value) => value.split(',').collect(),
                    ParamValue::Multi(values) => values.iter().map(String::as_str).collect(),
                };
                let quoted: Vec<String> = items.into_iter().map(quote).collect();
                format!("{} {} ({})", field, op, quoted.join(","))
            }
            FilterOperator::Contains
            | FilterOperator::ContainsIgnoreCase
            | FilterOperator::StartsWith
            | FilterOperator::StartsWithIgnoreCase
            | FilterOperator::EndsWith
            | FilterOperator::EndsWithIgnoreCase => {
                format!("{}({}, {})", op, field, quote(self.value.first()))
            }
            FilterOperator::Null
            | FilterOperator::NotNull
            | FilterOperator::Empty
            | FilterOperator::NotEmpty => format!("{} {}", field, op),
            _ => {
                let term = self.value.first();
                if self.operator.is_relational() && is_numeric(term) {
                    format!("{} {} {}", field, op, term.trim())
                } else {
                    format!("{} {} {}", field, op, quote(term))
                }
            }
        }
    }
}

impl fmt::Display for FilterCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_clause())
    }
}

/// Escape embedded single quotes by doubling them
pub fn sanitize(term: &str) -> String {
    term.replace('\'', "''")
}

fn quote(term: &str) -> String {
    format!("'{}'", sanitize(term))
}

fn is_numeric(term: &str) -> bool {
    term.trim()
        .parse::<f64>()
        .map(|n| n.is_finite())
        .unwrap_or(false)
}

/// Extract filter conditions from raw search parameters.
///
/// Keys that do not look like `field[operator]` and empty values are skipped:
/// they mean "not filtered on this field". A well-formed key carrying an
/// unknown operator fails the whole call.
pub fn parse_conditions(params: &SearchParams) -> Result<Vec<FilterCondition>, QueryError> {
    let mut conditions = Vec::new();

    for (key, value) in params.iter() {
        let Some(captures) = FILTER_KEY_REGEX.captures(key) else {
            continue;
        };
        if value.is_empty() {
            continue;
        }

        let operator = captures[2].parse::<FilterOperator>()?;
        conditions.push(FilterCondition {
            field: captures[1].to_string(),
            operator,
            value: value.clone(),
        });
    }

    Ok(conditions)
}

/// Build the joined filter expression; an empty string means "no filter"
pub fn build_filter_query(params: &SearchParams) -> Result<String, QueryError> {
    let clauses: Vec<String> = parse_conditions(params)?
        .iter()
        .map(FilterCondition::to_clause)
        .collect();

    Ok(clauses.join(CLAUSE_SEPARATOR))
}
