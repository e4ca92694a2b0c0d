//! Search-parameter translation for list endpoints.
//!
//! The UI sends raw URL parameters (`page`, `size`, `sort`, `field[operator]`);
//! [`ListQuery::from_search_params`] turns them into the paging, sorting and
//! filter parameters the catalog API expects.

pub mod filter;
pub mod params;
pub mod sort;

use thiserror::Error;

use crate::shared::constants::{
    DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PARAM_PAGE, PARAM_SIZE, PARAM_SORT, UPSTREAM_FILTER_PARAM,
};

pub use filter::build_filter_query;
pub use params::SearchParams;
pub use sort::{build_sort_query, SortDirection, SortDirective};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Unsupported operator: {0}")]
    UnsupportedOperator(String),
}

/// Paging, sorting and filtering for one upstream list call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// Zero-based page index
    pub page: u32,
    pub size: u32,
    pub sort: Vec<SortDirective>,
    pub filter: Option<String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort: Vec::new(),
            filter: None,
        }
    }
}

impl ListQuery {
    /// Split `page`, `size` and `sort` off the raw parameters and build the
    /// filter expression from whatever remains.
    pub fn from_search_params(mut params: SearchParams) -> Result<Self, QueryError> {
        let page = params
            .remove(PARAM_PAGE)
            .map(|v| page_index(v.first()))
            .unwrap_or(0);
        let size = params
            .remove(PARAM_SIZE)
            .map(|v| page_size(v.first()))
            .unwrap_or(DEFAULT_PAGE_SIZE);
        let sort = build_sort_query(params.remove(PARAM_SORT).as_ref());

        let filter = build_filter_query(&params)?;

        Ok(Self {
            page,
            size,
            sort,
            filter: (!filter.is_empty()).then_some(filter),
        })
    }

    /// 1-based page number, as shown to users
    pub fn human_page(&self) -> u32 {
        self.page + 1
    }

    /// Query pairs for the upstream request, `sort` repeated once per directive
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            (PARAM_PAGE, self.page.to_string()),
            (PARAM_SIZE, self.size.to_string()),
        ];
        pairs.extend(self.sort.iter().map(|s| (PARAM_SORT, s.to_upstream())));
        if let Some(filter) = &self.filter {
            pairs.push((UPSTREAM_FILTER_PARAM, filter.clone()));
        }
        pairs
    }
}

/// Human page `n` becomes index `n - 1`; anything that is not a positive
/// integer falls back to the first page.
fn page_index(raw: &str) -> u32 {
    match raw.trim().parse::<u32>() {
        Ok(n) if n > 0 => n - 1,
        _ => 0,
    }
}

fn page_size(raw: &str) -> u32 {
    match raw.trim().parse::<u32>() {
        Ok(n) if n > 0 => n.min(MAX_PAGE_SIZE),
        _ => DEFAULT_PAGE_SIZE,
    }
}
