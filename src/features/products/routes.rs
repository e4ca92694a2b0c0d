use std::sync::Arc;

use axum::{
    routing::{get, patch},
    Router,
};

use crate::features::products::handlers;
use crate::features::products::services::ProductService;

/// Create routes for the products feature
pub fn routes(service: Arc<ProductService>) -> Router {
    Router::new()
        .route(
            "/api/products",
            get(handlers::list_products).post(handlers::create_product),
        )
        .route(
            "/api/products/{id}",
            get(handlers::get_product).put(handlers::update_product),
        )
        .route(
            "/api/products/{id}/status",
            patch(handlers::change_product_status),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{category, product, FakeCatalogApi};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    fn server() -> (TestServer, Arc<FakeCatalogApi>) {
        let api = Arc::new(
            FakeCatalogApi::new()
                .with_categories(vec![category(1, "Flowers", None)])
                .with_products((1..=12).map(|id| product(id, "Bouquet")).collect()),
        );
        let service = Arc::new(ProductService::new(api.clone()));
        (TestServer::new(routes(service)).unwrap(), api)
    }

    #[tokio::test]
    async fn test_list_products_translates_query() {
        let (server, api) = server();

        let response = server
            .get("/api/products?page=2&sort=price_desc,name&status%5Bin%5D=DRAFT,APPROVED&price%5Bge%5D=10")
            .await;
        response.assert_status_ok();

        let query = api.last_query().unwrap();
        assert_eq!(query.page, 1);
        let sort: Vec<String> = query.sort.iter().map(|s| s.to_upstream()).collect();
        assert_eq!(sort, vec!["price,desc", "name,asc"]);
        assert_eq!(
            query.filter.as_deref(),
            Some("status in ('DRAFT','APPROVED') and price ge 10")
        );

        let body: Value = response.json();
        assert_eq!(body["data"].as_array().unwrap().len(), 2);
        assert_eq!(body["meta"]["total"], 12);
        assert_eq!(body["meta"]["total_pages"], 2);
    }

    #[tokio::test]
    async fn test_list_products_upstream_failure() {
        let service = Arc::new(ProductService::new(Arc::new(FakeCatalogApi::new().failing())));
        let server = TestServer::new(routes(service)).unwrap();

        server
            .get("/api/products")
            .await
            .assert_status(StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_get_product() {
        let (server, _) = server();

        let response = server.get("/api/products/3").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["data"]["id"], 3);

        server
            .get("/api/products/300")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_product() {
        let (server, _) = server();

        let response = server
            .post("/api/products")
            .json(&json!({
                "name": "Lily vase",
                "description": "White lilies",
                "category_id": 1
            }))
            .await;
        response.assert_status(StatusCode::CREATED);

        let body: Value = response.json();
        assert_eq!(body["data"]["status"], "DRAFT");
        assert_eq!(body["data"]["category"]["id"], 1);
    }

    #[tokio::test]
    async fn test_update_product_rejects_negative_price() {
        let (server, _) = server();

        let response = server
            .put("/api/products/1")
            .json(&json!({
                "name": "Bouquet",
                "price": -1.0,
                "category_id": 1
            }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_product() {
        let (server, api) = server();

        let response = server
            .put("/api/products/1")
            .json(&json!({
                "name": "Grand bouquet",
                "description": "Bigger",
                "price": 49.5,
                "category_id": 1
            }))
            .await;
        response.assert_status_ok();

        let stored = api.product(1).unwrap();
        assert_eq!(stored.name, "Grand bouquet");
        assert_eq!(stored.price, 49.5);
    }

    #[tokio::test]
    async fn test_change_status() {
        let (server, _) = server();

        let response = server
            .patch("/api/products/2/status")
            .json(&json!({ "status": "APPROVED" }))
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["data"]["status"], "APPROVED");
    }

    #[tokio::test]
    async fn test_change_status_rejects_unknown() {
        let (server, _) = server();

        server
            .patch("/api/products/2/status")
            .json(&json!({ "status": "PUBLISHED" }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
}
