use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::categories::dtos::{
    CategoryOptionDto, CategoryOptionsQuery, CategoryResponseDto, CategoryTreeDto,
    CreateCategoryDto, UpdateCategoryDto,
};
use crate::features::categories::services::CategoryService;
use crate::shared::query::{ListQuery, SearchParams};
use crate::shared::types::{ApiResponse, Meta};

/// Key of the list flag that switches to a nested response
const TREE_PARAM: &str = "tree";

/// List categories
///
/// Returns one page of categories as a flat list, or nested by parent when
/// `tree=true`. Accepts the shared list parameters (`page`, `size`, `sort`,
/// `field[operator]=value`). When the catalog API is unavailable an empty page
/// is returned.
#[utoipa::path(
    get,
    path = "/api/categories",
    params(
        ("page" = Option<u32>, Query, description = "Page number (1-indexed)"),
        ("size" = Option<u32>, Query, description = "Items per page (max 100)"),
        ("sort" = Option<String>, Query, description = "Comma separated `field_direction` tokens"),
        ("tree" = Option<bool>, Query, description = "Nest the page by parent if true")
    ),
    responses(
        (status = 200, description = "Page of categories", body = ApiResponse<Vec<CategoryResponseDto>>),
        (status = 400, description = "Unsupported filter operator")
    ),
    tag = "categories"
)]
pub async fn list_categories(
    State(service): State<Arc<CategoryService>>,
    mut params: SearchParams,
) -> Result<Json<ApiResponse<serde_json::Value>>> {
    let tree = params
        .remove(TREE_PARAM)
        .is_some_and(|v| v.first().eq_ignore_ascii_case("true"));
    let query = ListQuery::from_search_params(params)?;

    let (value, total) = if tree {
        let (forest, total) = service.list_nested(&query).await;
        (to_value(forest)?, total)
    } else {
        let (items, total) = service.list_flat(&query).await;
        (to_value(items)?, total)
    };

    Ok(Json(ApiResponse::success(
        Some(value),
        None,
        Some(Meta::paginated(total, query.human_page(), query.size)),
    )))
}

/// Get the whole category hierarchy
#[utoipa::path(
    get,
    path = "/api/categories/tree",
    responses(
        (status = 200, description = "Category forest", body = ApiResponse<Vec<CategoryTreeDto>>),
        (status = 502, description = "Catalog API error")
    ),
    tag = "categories"
)]
pub async fn get_category_tree(
    State(service): State<Arc<CategoryService>>,
) -> Result<Json<ApiResponse<Vec<CategoryTreeDto>>>> {
    let tree = service.tree().await?;
    Ok(Json(ApiResponse::success(Some(tree), None, None)))
}

/// Parent picker options
///
/// Flattened hierarchy in display order. The category given in `disable` and
/// all of its descendants are flagged `disabled`.
#[utoipa::path(
    get,
    path = "/api/categories/options",
    params(CategoryOptionsQuery),
    responses(
        (status = 200, description = "Flattened categories", body = ApiResponse<Vec<CategoryOptionDto>>),
        (status = 502, description = "Catalog API error")
    ),
    tag = "categories"
)]
pub async fn list_category_options(
    State(service): State<Arc<CategoryService>>,
    Query(query): Query<CategoryOptionsQuery>,
) -> Result<Json<ApiResponse<Vec<CategoryOptionDto>>>> {
    let options = service.options(query.disable).await?;
    Ok(Json(ApiResponse::success(Some(options), None, None)))
}

/// Get category by id
#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    params(
        ("id" = i64, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category found", body = ApiResponse<CategoryResponseDto>),
        (status = 404, description = "Category not found")
    ),
    tag = "categories"
)]
pub async fn get_category(
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    let category = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(category), None, None)))
}

/// Create a category
#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = CreateCategoryDto,
    responses(
        (status = 201, description = "Category created", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Slug already in use")
    ),
    tag = "categories"
)]
pub async fn create_category(
    State(service): State<Arc<CategoryService>>,
    AppJson(dto): AppJson<CreateCategoryDto>,
) -> Result<(StatusCode, Json<ApiResponse<CategoryResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let category = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(category),
            Some("Category created successfully".to_string()),
            None,
        )),
    ))
}

/// Update a category
///
/// Rejects a `parent_id` that is the category itself or one of its
/// descendants.
#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    params(
        ("id" = i64, Path, description = "Category ID")
    ),
    request_body = UpdateCategoryDto,
    responses(
        (status = 200, description = "Category updated", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Validation error or invalid parent"),
        (status = 404, description = "Category not found")
    ),
    tag = "categories"
)]
pub async fn update_category(
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<UpdateCategoryDto>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let category = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(category),
        Some("Category updated successfully".to_string()),
        None,
    )))
}

/// Delete a category
#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    params(
        ("id" = i64, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category deleted"),
        (status = 404, description = "Category not found")
    ),
    tag = "categories"
)]
pub async fn delete_category(
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Category deleted successfully".to_string()),
        None,
    )))
}

fn to_value<T: serde::Serialize>(value: T) -> Result<serde_json::Value> {
    serde_json::to_value(value)
        .map_err(|e| AppError::Internal(format!("Failed to serialize categories: {}", e)))
}
