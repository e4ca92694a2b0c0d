use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::debug;

use crate::core::error::{AppError, Result};
use crate::features::medias::dtos::{
    is_image_content_type, MediaResponseDto, UploadMediaDto, MAX_MEDIA_SIZE,
};
use crate::features::medias::models::MediaUpload;
use crate::features::medias::services::MediaService;
use crate::shared::query::{ListQuery, SearchParams};
use crate::shared::types::{ApiResponse, Meta};

/// List media
///
/// Accepts the shared list parameters: `page` (1-indexed), `size`, `sort`
/// (`field_asc` / `field_desc`) and `field[operator]=value` filters.
#[utoipa::path(
    get,
    path = "/api/medias",
    params(
        ("page" = Option<u32>, Query, description = "Page number (1-indexed)"),
        ("size" = Option<u32>, Query, description = "Items per page (max 100)"),
        ("sort" = Option<String>, Query, description = "Comma separated `field_direction` tokens"),
    ),
    responses(
        (status = 200, description = "Page of media", body = ApiResponse<Vec<MediaResponseDto>>),
        (status = 400, description = "Unsupported filter operator"),
        (status = 502, description = "Catalog API error")
    ),
    tag = "medias"
)]
pub async fn list_media(
    State(service): State<Arc<MediaService>>,
    params: SearchParams,
) -> Result<Json<ApiResponse<Vec<MediaResponseDto>>>> {
    let query = ListQuery::from_search_params(params)?;
    let (items, total) = service.list(&query).await?;

    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta::paginated(total, query.human_page(), query.size)),
    )))
}

/// Upload an image to the media library
///
/// Accepts multipart/form-data with:
/// - `file`: The image to upload (required)
/// - `altText`: Alternative text (optional)
#[utoipa::path(
    post,
    path = "/api/medias/upload",
    tag = "medias",
    request_body(
        content = UploadMediaDto,
        content_type = "multipart/form-data",
        description = "Image upload form with optional alternative text",
    ),
    responses(
        (status = 201, description = "Media uploaded successfully", body = ApiResponse<MediaResponseDto>),
        (status = 400, description = "Missing file, non-image file or file too large"),
        (status = 502, description = "Catalog API error")
    )
)]
pub async fn upload_media(
    State(service): State<Arc<MediaService>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<MediaResponseDto>>)> {
    let mut upload: Option<MediaUpload> = None;
    let mut alt_text: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "file" => {
                let content_type = field.content_type().map(|s| s.to_string());
                let file_name = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "unnamed".to_string());

                let data = field.bytes().await.map_err(|e| {
                    debug!("Failed to read file bytes: {}", e);
                    AppError::BadRequest(format!("Failed to read file data: {}", e))
                })?;

                upload = Some(MediaUpload {
                    file_name,
                    content_type,
                    bytes: data.to_vec(),
                    alt_text: None,
                });
            }
            "altText" | "alt_text" => {
                let text = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read altText field: {}", e))
                })?;
                if !text.trim().is_empty() {
                    alt_text = Some(text);
                }
            }
            _ => {
                debug!("Ignoring unknown field: {}", field_name);
            }
        }
    }

    let mut upload = upload.ok_or_else(|| AppError::BadRequest("File is required".to_string()))?;
    upload.alt_text = alt_text;

    if upload.bytes.is_empty() {
        return Err(AppError::BadRequest("File is empty".to_string()));
    }

    if upload.bytes.len() > MAX_MEDIA_SIZE {
        return Err(AppError::BadRequest(format!(
            "File too large. Maximum size is {} MB",
            MAX_MEDIA_SIZE / 1024 / 1024
        )));
    }

    match upload.content_type.as_deref() {
        Some(ct) if is_image_content_type(ct) => {}
        other => {
            return Err(AppError::BadRequest(format!(
                "File type '{}' is not allowed. Only images can be uploaded",
                other.unwrap_or("unknown")
            )));
        }
    }

    let media = service.upload(upload).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(media),
            Some("Media uploaded successfully".to_string()),
            None,
        )),
    ))
}
