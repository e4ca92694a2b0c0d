use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::categories::dtos::CategoryResponseDto;
use crate::features::medias::dtos::MediaResponseDto;
use crate::features::products::models::{Product, ProductStatus};

/// Response DTO for product
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductResponseDto {
    pub id: i64,
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    /// Price before discount, if any
    pub origin_price: Option<f64>,
    pub category: Option<CategoryResponseDto>,
    pub image: Option<MediaResponseDto>,
    /// `DRAFT` or `APPROVED`
    pub status: String,
}

impl From<Product> for ProductResponseDto {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            sku: p.sku,
            name: p.name,
            description: p.description,
            price: p.price,
            origin_price: p.origin_price,
            category: p.category.map(Into::into),
            image: p.image.map(Into::into),
            status: p.status,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProductDto {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    #[validate(length(max = 5000, message = "Description must not exceed 5000 characters"))]
    #[serde(default)]
    pub description: String,

    pub category_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProductDto {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    #[validate(length(max = 5000, message = "Description must not exceed 5000 characters"))]
    #[serde(default)]
    pub description: String,

    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price: f64,

    pub category_id: i64,
}

/// Request DTO for moving a product between workflow states
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChangeStatusDto {
    pub status: ProductStatus,
}
