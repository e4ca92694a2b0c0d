use std::sync::Arc;

use crate::core::error::Result;
use crate::features::products::dtos::{
    ChangeStatusDto, CreateProductDto, ProductResponseDto, UpdateProductDto,
};
use crate::features::products::models::{
    ChangeStatusRequest, CreateProductRequest, UpdateProductRequest,
};
use crate::modules::catalog_api::CatalogApi;
use crate::shared::query::ListQuery;

/// Service for product operations
pub struct ProductService {
    api: Arc<dyn CatalogApi>,
}

impl ProductService {
    pub fn new(api: Arc<dyn CatalogApi>) -> Self {
        Self { api }
    }

    /// One page of products plus the total element count
    pub async fn list(&self, query: &ListQuery) -> Result<(Vec<ProductResponseDto>, i64)> {
        let page = self.api.list_products(query).await?.map(ProductResponseDto::from);
        Ok((page.content, page.total_elements))
    }

    pub async fn get(&self, id: i64) -> Result<ProductResponseDto> {
        let product = self.api.get_product(id).await?;
        Ok(product.into())
    }

    pub async fn create(&self, dto: CreateProductDto) -> Result<ProductResponseDto> {
        let request = CreateProductRequest {
            name: dto.name,
            description: dto.description,
            category_id: dto.category_id,
        };

        let product = self.api.create_product(&request).await?;
        Ok(product.into())
    }

    pub async fn update(&self, id: i64, dto: UpdateProductDto) -> Result<ProductResponseDto> {
        let request = UpdateProductRequest {
            name: dto.name,
            description: dto.description,
            price: dto.price,
            category_id: dto.category_id,
        };

        let product = self.api.update_product(id, &request).await?;
        Ok(product.into())
    }

    pub async fn change_status(&self, id: i64, dto: ChangeStatusDto) -> Result<ProductResponseDto> {
        let request = ChangeStatusRequest { status: dto.status };

        let product = self.api.change_product_status(id, &request).await?;
        Ok(product.into())
    }
}
