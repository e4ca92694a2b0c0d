use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::features::medias::models::Media;

/// Category node as returned by the catalog API.
///
/// `children` is only populated by the tree endpoint; list and detail
/// responses leave it empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub image: Option<Media>,
    #[serde(default)]
    pub created_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub last_modified_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub parent_id: Option<i64>,
    #[serde(default)]
    pub children: Vec<Category>,
}

/// Body of `POST /categories` on the catalog API
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_id: Option<i64>,
}

/// Body of `PUT /categories/{id}` on the catalog API
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryRequest {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_id: Option<i64>,
}
