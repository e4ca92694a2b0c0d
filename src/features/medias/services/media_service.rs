use std::sync::Arc;

use crate::core::error::Result;
use crate::features::medias::dtos::MediaResponseDto;
use crate::features::medias::models::MediaUpload;
use crate::modules::catalog_api::CatalogApi;
use crate::shared::query::ListQuery;

/// Service for the media library
pub struct MediaService {
    api: Arc<dyn CatalogApi>,
}

impl MediaService {
    pub fn new(api: Arc<dyn CatalogApi>) -> Self {
        Self { api }
    }

    /// One page of media plus the total element count
    pub async fn list(&self, query: &ListQuery) -> Result<(Vec<MediaResponseDto>, i64)> {
        let page = self.api.list_media(query).await?.map(MediaResponseDto::from);
        Ok((page.content, page.total_elements))
    }

    pub async fn upload(&self, upload: MediaUpload) -> Result<MediaResponseDto> {
        tracing::debug!(
            "Uploading media {} ({} bytes)",
            upload.file_name,
            upload.bytes.len()
        );
        let media = self.api.upload_media(upload).await?;
        Ok(media.into())
    }
}
