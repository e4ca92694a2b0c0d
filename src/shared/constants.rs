/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: u32 = 100;

/// Number of pages shown on each side of the current page
pub const DEFAULT_SIBLING_COUNT: u32 = 1;

/// Marker rendered in place of skipped page numbers
pub const PAGINATION_ELLIPSIS: &str = "...";

// =============================================================================
// QUERY PARAMETER NAMES
// =============================================================================

/// Human (1-based) page number sent by the UI
pub const PARAM_PAGE: &str = "page";

/// Page size sent by the UI and forwarded upstream
pub const PARAM_SIZE: &str = "size";

/// Sort tokens (`field_direction`), repeatable
pub const PARAM_SORT: &str = "sort";

/// Name of the single filter-expression parameter understood by the catalog API
pub const UPSTREAM_FILTER_PARAM: &str = "$filter";

// =============================================================================
// UPSTREAM
// =============================================================================

/// Default wall-clock budget for one upstream call
pub const DEFAULT_API_TIMEOUT_MS: u64 = 10_000;
