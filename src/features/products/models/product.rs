use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::categories::models::Category;
use crate::features::medias::models::Media;

/// Product as returned by the catalog API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub sku: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub origin_price: Option<f64>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub image: Option<Media>,
    pub status: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductStatus {
    Draft,
    Approved,
}

impl ProductStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Draft => "DRAFT",
            ProductStatus::Approved => "APPROVED",
        }
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `POST /products` on the catalog API
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: String,
    pub description: String,
    pub category_id: i64,
}

/// Body of `PUT /products/{id}` on the catalog API
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category_id: i64,
}

/// Body of `PATCH /products/{id}/status` on the catalog API
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeStatusRequest {
    pub status: ProductStatus,
}
