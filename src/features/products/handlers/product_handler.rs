use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::products::dtos::{
    ChangeStatusDto, CreateProductDto, ProductResponseDto, UpdateProductDto,
};
use crate::features::products::services::ProductService;
use crate::shared::query::{ListQuery, SearchParams};
use crate::shared::types::{ApiResponse, Meta};

/// List products
///
/// Accepts the shared list parameters: `page` (1-indexed), `size`, `sort`
/// (`field_asc` / `field_desc`) and `field[operator]=value` filters, e.g.
/// `name[containsIgnoreCase]=rose&status[eq]=APPROVED`.
#[utoipa::path(
    get,
    path = "/api/products",
    params(
        ("page" = Option<u32>, Query, description = "Page number (1-indexed)"),
        ("size" = Option<u32>, Query, description = "Items per page (max 100)"),
        ("sort" = Option<String>, Query, description = "Comma separated `field_direction` tokens"),
    ),
    responses(
        (status = 200, description = "Page of products", body = ApiResponse<Vec<ProductResponseDto>>),
        (status = 400, description = "Unsupported filter operator"),
        (status = 502, description = "Catalog API error")
    ),
    tag = "products"
)]
pub async fn list_products(
    State(service): State<Arc<ProductService>>,
    params: SearchParams,
) -> Result<Json<ApiResponse<Vec<ProductResponseDto>>>> {
    let query = ListQuery::from_search_params(params)?;
    let (items, total) = service.list(&query).await?;

    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta::paginated(total, query.human_page(), query.size)),
    )))
}

/// Get product by id
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = ApiResponse<ProductResponseDto>),
        (status = 404, description = "Product not found")
    ),
    tag = "products"
)]
pub async fn get_product(
    State(service): State<Arc<ProductService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<ProductResponseDto>>> {
    let product = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(product), None, None)))
}

/// Create a product
///
/// New products start in `DRAFT`.
#[utoipa::path(
    post,
    path = "/api/products",
    request_body = CreateProductDto,
    responses(
        (status = 201, description = "Product created", body = ApiResponse<ProductResponseDto>),
        (status = 400, description = "Validation error")
    ),
    tag = "products"
)]
pub async fn create_product(
    State(service): State<Arc<ProductService>>,
    AppJson(dto): AppJson<CreateProductDto>,
) -> Result<(StatusCode, Json<ApiResponse<ProductResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let product = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(product),
            Some("Product created successfully".to_string()),
            None,
        )),
    ))
}

/// Update a product
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    request_body = UpdateProductDto,
    responses(
        (status = 200, description = "Product updated", body = ApiResponse<ProductResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Product not found")
    ),
    tag = "products"
)]
pub async fn update_product(
    State(service): State<Arc<ProductService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<UpdateProductDto>,
) -> Result<Json<ApiResponse<ProductResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let product = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(product),
        Some("Product updated successfully".to_string()),
        None,
    )))
}

/// Change product status
#[utoipa::path(
    patch,
    path = "/api/products/{id}/status",
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    request_body = ChangeStatusDto,
    responses(
        (status = 200, description = "Status changed", body = ApiResponse<ProductResponseDto>),
        (status = 400, description = "Unknown status"),
        (status = 404, description = "Product not found")
    ),
    tag = "products"
)]
pub async fn change_product_status(
    State(service): State<Arc<ProductService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<ChangeStatusDto>,
) -> Result<Json<ApiResponse<ProductResponseDto>>> {
    let product = service.change_status(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(product), None, None)))
}
