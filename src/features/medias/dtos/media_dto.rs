use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::medias::models::Media;

/// Response DTO for a media record
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MediaResponseDto {
    pub id: i64,
    pub name: Option<String>,
    pub alt_text: Option<String>,
    /// URL of the file as uploaded
    pub url_original: String,
    pub url_large: Option<String>,
    pub url_medium: Option<String>,
    pub url_thumbnail: Option<String>,
    /// Size in bytes
    pub size: Option<i64>,
}

impl From<Media> for MediaResponseDto {
    fn from(m: Media) -> Self {
        Self {
            id: m.id,
            name: m.name,
            alt_text: m.alt_text,
            url_original: m.url_original,
            url_large: m.url_large,
            url_medium: m.url_medium,
            url_thumbnail: m.url_thumbnail,
            size: m.size,
        }
    }
}

/// Upload media request DTO for OpenAPI documentation
/// Note: This struct is for Swagger UI documentation only.
/// The actual handler uses axum's Multipart extractor directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadMediaDto {
    /// The file to upload
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub file: String,
    /// Optional alternative text stored with the media
    #[schema(example = "Bouquet of red roses")]
    pub alt_text: Option<String>,
}

/// Maximum upload size in bytes (5MB)
pub const MAX_MEDIA_SIZE: usize = 5 * 1024 * 1024;

/// Only images are accepted as media
pub fn is_image_content_type(content_type: &str) -> bool {
    content_type
        .get(..6)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("image/"))
        && content_type.len() > 6
}
