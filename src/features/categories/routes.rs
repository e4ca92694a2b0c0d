use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::categories::handlers;
use crate::features::categories::services::CategoryService;

/// Create routes for the categories feature
pub fn routes(service: Arc<CategoryService>) -> Router {
    Router::new()
        .route(
            "/api/categories",
            get(handlers::list_categories).post(handlers::create_category),
        )
        .route("/api/categories/tree", get(handlers::get_category_tree))
        .route(
            "/api/categories/options",
            get(handlers::list_category_options),
        )
        .route(
            "/api/categories/{id}",
            get(handlers::get_category)
                .put(handlers::update_category)
                .delete(handlers::delete_category),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{category, FakeCatalogApi};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    fn catalog() -> FakeCatalogApi {
        FakeCatalogApi::new().with_categories(vec![
            category(1, "Flowers", None),
            category(2, "Roses", Some(1)),
            category(3, "Tulips", Some(1)),
            category(4, "Red roses", Some(2)),
            category(5, "Gifts", None),
        ])
    }

    fn server(api: FakeCatalogApi) -> (TestServer, Arc<FakeCatalogApi>) {
        let api = Arc::new(api);
        let service = Arc::new(CategoryService::new(api.clone()));
        (TestServer::new(routes(service)).unwrap(), api)
    }

    #[tokio::test]
    async fn test_list_forwards_translated_query() {
        let (server, api) = server(catalog());

        let response = server
            .get("/api/categories?page=2&size=2&sort=name_desc&name%5BcontainsIgnoreCase%5D=ro")
            .await;
        response.assert_status_ok();

        let query = api.last_query().unwrap();
        assert_eq!(query.page, 1);
        assert_eq!(query.size, 2);
        assert_eq!(query.sort[0].to_upstream(), "name,desc");
        assert_eq!(
            query.filter.as_deref(),
            Some("containsIgnoreCase(name, 'ro')")
        );

        let body: Value = response.json();
        assert_eq!(body["meta"]["page"], 2);
        assert_eq!(body["meta"]["size"], 2);
        assert_eq!(body["meta"]["total"], 5);
    }

    #[tokio::test]
    async fn test_list_unsupported_operator() {
        let (server, _) = server(catalog());

        let response = server.get("/api/categories?name%5Bregex%5D=ro").await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Unsupported operator: regex");
    }

    #[tokio::test]
    async fn test_list_degrades_when_upstream_fails() {
        let (server, _) = server(FakeCatalogApi::new().failing());

        let response = server.get("/api/categories").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["data"], json!([]));
        assert_eq!(body["meta"]["total"], 0);
        assert_eq!(body["meta"]["pages"], json!([]));
    }

    #[tokio::test]
    async fn test_list_as_tree() {
        let (server, api) = server(catalog());

        let response = server.get("/api/categories?tree=true").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["data"].as_array().unwrap().len(), 2);
        assert_eq!(body["data"][0]["children"][0]["name"], "Roses");
        assert_eq!(api.last_query().unwrap().filter, None);
    }

    #[tokio::test]
    async fn test_tree_endpoint() {
        let (server, _) = server(catalog());

        let response = server.get("/api/categories/tree").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["data"][0]["id"], 1);
        assert_eq!(body["data"][0]["children"][0]["children"][0]["id"], 4);
        assert_eq!(body["data"][1]["id"], 5);
    }

    #[tokio::test]
    async fn test_tree_endpoint_propagates_failure() {
        let (server, _) = server(FakeCatalogApi::new().failing());

        let response = server.get("/api/categories/tree").await;
        response.assert_status(StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_options_with_disable() {
        let (server, _) = server(catalog());

        let response = server.get("/api/categories/options?disable=2").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(
            body["data"],
            json!([
                {"id": 1, "name": "Flowers", "level": 0, "disabled": false},
                {"id": 2, "name": "Roses", "level": 1, "disabled": true},
                {"id": 4, "name": "Red roses", "level": 2, "disabled": true},
                {"id": 3, "name": "Tulips", "level": 1, "disabled": false},
                {"id": 5, "name": "Gifts", "level": 0, "disabled": false}
            ])
        );
    }

    #[tokio::test]
    async fn test_get_category_not_found() {
        let (server, _) = server(catalog());

        let response = server.get("/api/categories/42").await;
        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_category() {
        let (server, api) = server(catalog());

        let response = server
            .post("/api/categories")
            .json(&json!({
                "name": "Dried Flowers",
                "description": "Lasts forever",
                "parent_id": 1
            }))
            .await;
        response.assert_status(StatusCode::CREATED);

        let body: Value = response.json();
        assert_eq!(body["data"]["slug"], "dried-flowers");
        let id = body["data"]["id"].as_i64().unwrap();
        assert_eq!(api.category(id).unwrap().parent_id, Some(1));
    }

    #[tokio::test]
    async fn test_create_category_validation() {
        let (server, _) = server(catalog());

        let response = server
            .post("/api/categories")
            .json(&json!({
                "name": "Dried Flowers",
                "slug": "Dried Flowers",
                "description": "Lasts forever"
            }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_category_duplicate_slug() {
        let (server, _) = server(catalog());

        let response = server
            .post("/api/categories")
            .json(&json!({
                "name": "Roses",
                "slug": "roses",
                "description": "Again"
            }))
            .await;
        response.assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_update_rejects_cycle() {
        let (server, _) = server(catalog());

        let response = server
            .put("/api/categories/1")
            .json(&json!({
                "name": "Flowers",
                "slug": "flowers",
                "description": "All flowers",
                "parent_id": 4
            }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_category() {
        let (server, api) = server(catalog());

        let response = server
            .put("/api/categories/3")
            .json(&json!({
                "name": "Tulips",
                "slug": "tulips",
                "description": "Spring tulips",
                "parent_id": 5,
                "active": false
            }))
            .await;
        response.assert_status_ok();

        let stored = api.category(3).unwrap();
        assert_eq!(stored.parent_id, Some(5));
        assert!(!stored.active);
    }

    #[tokio::test]
    async fn test_delete_category() {
        let (server, api) = server(catalog());

        server.delete("/api/categories/5").await.assert_status_ok();
        assert!(api.category(5).is_none());

        server
            .delete("/api/categories/5")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}
