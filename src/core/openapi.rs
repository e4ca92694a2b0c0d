use utoipa::{Modify, OpenApi};

use crate::features::categories::tree::FlattenedCategory;
use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::medias::{dtos as medias_dtos, handlers as medias_handlers};
use crate::features::products::{
    dtos as products_dtos, handlers as products_handlers, models as products_models,
};
use crate::shared::query::{SortDirection, SortDirective};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Categories
        categories_handlers::list_categories,
        categories_handlers::get_category_tree,
        categories_handlers::list_category_options,
        categories_handlers::get_category,
        categories_handlers::create_category,
        categories_handlers::update_category,
        categories_handlers::delete_category,
        // Products
        products_handlers::list_products,
        products_handlers::get_product,
        products_handlers::create_product,
        products_handlers::update_product,
        products_handlers::change_product_status,
        // Medias
        medias_handlers::list_media,
        medias_handlers::upload_media,
    ),
    components(
        schemas(
            // Shared
            Meta,
            SortDirection,
            SortDirective,
            // Categories
            FlattenedCategory,
            categories_dtos::CategoryResponseDto,
            categories_dtos::CategoryTreeDto,
            categories_dtos::CategoryOptionDto,
            categories_dtos::CreateCategoryDto,
            categories_dtos::UpdateCategoryDto,
            ApiResponse<Vec<categories_dtos::CategoryResponseDto>>,
            ApiResponse<Vec<categories_dtos::CategoryTreeDto>>,
            ApiResponse<Vec<categories_dtos::CategoryOptionDto>>,
            ApiResponse<categories_dtos::CategoryResponseDto>,
            // Products
            products_models::ProductStatus,
            products_dtos::ProductResponseDto,
            products_dtos::CreateProductDto,
            products_dtos::UpdateProductDto,
            products_dtos::ChangeStatusDto,
            ApiResponse<Vec<products_dtos::ProductResponseDto>>,
            ApiResponse<products_dtos::ProductResponseDto>,
            // Medias
            medias_dtos::MediaResponseDto,
            medias_dtos::UploadMediaDto,
            ApiResponse<Vec<medias_dtos::MediaResponseDto>>,
            ApiResponse<medias_dtos::MediaResponseDto>,
        )
    ),
    tags(
        (name = "categories", description = "Category hierarchy management"),
        (name = "products", description = "Product management and approval workflow"),
        (name = "medias", description = "Media library"),
    ),
    info(
        title = "Catalog Backoffice API",
        version = "0.1.0",
        description = "Back-office gateway for the catalog API",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_all_routes() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for expected in [
            "/api/categories",
            "/api/categories/tree",
            "/api/categories/options",
            "/api/categories/{id}",
            "/api/products",
            "/api/products/{id}",
            "/api/products/{id}/status",
            "/api/medias",
            "/api/medias/upload",
        ] {
            assert!(paths.contains(&expected), "missing path {}", expected);
        }
    }

    #[test]
    fn test_info_modifier() {
        let mut doc = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Shop Admin".to_string(),
            version: "2.0.0".to_string(),
            description: "Internal".to_string(),
        }
        .modify(&mut doc);

        assert_eq!(doc.info.title, "Shop Admin");
        assert_eq!(doc.info.version, "2.0.0");
    }
}
