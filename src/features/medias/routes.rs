use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::features::medias::dtos::MAX_MEDIA_SIZE;
use crate::features::medias::handlers;
use crate::features::medias::services::MediaService;

/// Create routes for the media library
pub fn routes(service: Arc<MediaService>) -> Router {
    Router::new()
        .route("/api/medias", get(handlers::list_media))
        .route(
            "/api/medias/upload",
            post(handlers::upload_media).layer(DefaultBodyLimit::max(MAX_MEDIA_SIZE + 1024 * 1024)),
        )
        .with_state(service)
}
