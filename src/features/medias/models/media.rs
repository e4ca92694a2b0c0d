use serde::{Deserialize, Serialize};

/// Media record as returned by the catalog API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub alt_text: Option<String>,
    pub url_original: String,
    #[serde(default)]
    pub url_large: Option<String>,
    #[serde(default)]
    pub url_medium: Option<String>,
    #[serde(default)]
    pub url_thumbnail: Option<String>,
    #[serde(default)]
    pub size: Option<i64>,
}

/// File received from the UI, forwarded as multipart to the catalog API
#[derive(Debug, Clone)]
pub struct MediaUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
    pub alt_text: Option<String>,
}
