use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::constants::DEFAULT_SIBLING_COUNT;
use crate::shared::pagination::{pagination_range, total_pages, PageItem};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub meta: Option<Meta>,
    pub errors: Option<Vec<String>>,
}

// =============================================================================
// PAGINATION
// =============================================================================

/// Paging metadata attached to list responses
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Meta {
    pub total: i64,
    /// Current page (1-indexed)
    pub page: u32,
    pub size: u32,
    pub total_pages: u32,
    /// Page numbers to render, with `"..."` marking skipped ranges
    #[schema(value_type = Vec<Object>)]
    pub pages: Vec<PageItem>,
}

impl Meta {
    pub fn paginated(total: i64, page: u32, size: u32) -> Self {
        let total_elements = u64::try_from(total).unwrap_or(0);
        Self {
            total,
            page,
            size,
            total_pages: total_pages(total_elements, size),
            pages: pagination_range(page, total_elements, size, DEFAULT_SIBLING_COUNT),
        }
    }
}

impl<T> ApiResponse<T> {
    pub fn success(data: Option<T>, message: Option<String>, meta: Option<Meta>) -> Self {
        Self {
            success: true,
            data,
            message,
            meta,
            errors: None,
        }
    }

    pub fn error(message: Option<String>, errors: Option<Vec<String>>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message,
            meta: None,
            errors,
        }
    }
}
