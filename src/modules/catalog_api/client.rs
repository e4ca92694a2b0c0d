//! HTTP client for the upstream catalog REST API.
//!
//! Every call carries the configured bearer token and is bounded by the
//! configured timeout; an elapsed timeout aborts the in-flight request. There
//! are no retries and no caching: each call reflects the upstream state at the
//! time it is made.

use async_trait::async_trait;
use reqwest::{multipart, Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::core::config::UpstreamConfig;
use crate::core::error::{AppError, Result};
use crate::features::categories::models::{
    Category, CreateCategoryRequest, UpdateCategoryRequest,
};
use crate::features::medias::models::{Media, MediaUpload};
use crate::features::products::models::{
    ChangeStatusRequest, CreateProductRequest, Product, UpdateProductRequest,
};
use crate::modules::catalog_api::Page;
use crate::shared::query::ListQuery;

/// Operations the gateway needs from the catalog API
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn list_categories(&self, query: &ListQuery) -> Result<Page<Category>>;
    async fn category_tree(&self) -> Result<Vec<Category>>;
    async fn get_category(&self, id: i64) -> Result<Category>;
    async fn create_category(&self, request: &CreateCategoryRequest) -> Result<Category>;
    async fn update_category(&self, id: i64, request: &UpdateCategoryRequest) -> Result<Category>;
    async fn delete_category(&self, id: i64) -> Result<()>;

    async fn list_products(&self, query: &ListQuery) -> Result<Page<Product>>;
    async fn get_product(&self, id: i64) -> Result<Product>;
    async fn create_product(&self, request: &CreateProductRequest) -> Result<Product>;
    async fn update_product(&self, id: i64, request: &UpdateProductRequest) -> Result<Product>;
    async fn change_product_status(
        &self,
        id: i64,
        request: &ChangeStatusRequest,
    ) -> Result<Product>;

    async fn list_media(&self, query: &ListQuery) -> Result<Page<Media>>;
    async fn upload_media(&self, upload: MediaUpload) -> Result<Media>;
}

/// [`CatalogApi`] backed by reqwest
pub struct CatalogApiClient {
    config: UpstreamConfig,
    http_client: Client,
}

impl CatalogApiClient {
    pub fn new(config: UpstreamConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.config.api_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder, url: &str) -> Result<Response> {
        let response = self
            .authorize(builder)
            .send()
            .await
            .map_err(|e| map_transport_error(e, url))?;

        check_status(response, url).await
    }

    async fn fetch<T: DeserializeOwned>(&self, builder: RequestBuilder, url: &str) -> Result<T> {
        let response = self.send(builder, url).await?;

        response.json::<T>().await.map_err(|e| {
            tracing::error!("Failed to parse catalog API response from {}: {}", url, e);
            AppError::ExternalServiceError(format!("Invalid response from catalog API: {}", e))
        })
    }

    async fn get_list<T: DeserializeOwned>(&self, path: &str, query: &ListQuery) -> Result<Page<T>> {
        let url = self.config.url(path);
        tracing::debug!("Fetching list from catalog API: {} {:?}", url, query);

        let builder = self.http_client.get(&url).query(&query.to_query_pairs());
        self.fetch(builder, &url).await
    }
}

#[async_trait]
impl CatalogApi for CatalogApiClient {
    async fn list_categories(&self, query: &ListQuery) -> Result<Page<Category>> {
        self.get_list("/categories", query).await
    }

    async fn category_tree(&self) -> Result<Vec<Category>> {
        let url = self.config.url("/categories/tree");
        self.fetch(self.http_client.get(&url), &url).await
    }

    async fn get_category(&self, id: i64) -> Result<Category> {
        let url = self.config.url(&format!("/categories/{}", id));
        self.fetch(self.http_client.get(&url), &url).await
    }

    async fn create_category(&self, request: &CreateCategoryRequest) -> Result<Category> {
        let url = self.config.url("/categories");
        let category: Category = self
            .fetch(self.http_client.post(&url).json(request), &url)
            .await?;

        tracing::info!("Created category {} ({})", category.id, category.slug);
        Ok(category)
    }

    async fn update_category(&self, id: i64, request: &UpdateCategoryRequest) -> Result<Category> {
        let url = self.config.url(&format!("/categories/{}", id));
        let category: Category = self
            .fetch(self.http_client.put(&url).json(request), &url)
            .await?;

        tracing::info!("Updated category {}", id);
        Ok(category)
    }

    async fn delete_category(&self, id: i64) -> Result<()> {
        let url = self.config.url(&format!("/categories/{}", id));
        self.send(self.http_client.delete(&url), &url).await?;

        tracing::info!("Deleted category {}", id);
        Ok(())
    }

    async fn list_products(&self, query: &ListQuery) -> Result<Page<Product>> {
        self.get_list("/products", query).await
    }

    async fn get_product(&self, id: i64) -> Result<Product> {
        let url = self.config.url(&format!("/products/{}", id));
        self.fetch(self.http_client.get(&url), &url).await
    }

    async fn create_product(&self, request: &CreateProductRequest) -> Result<Product> {
        let url = self.config.url("/products");
        let product: Product = self
            .fetch(self.http_client.post(&url).json(request), &url)
            .await?;

        tracing::info!("Created product {} ({})", product.id, product.sku);
        Ok(product)
    }

    async fn update_product(&self, id: i64, request: &UpdateProductRequest) -> Result<Product> {
        let url = self.config.url(&format!("/products/{}", id));
        self.fetch(self.http_client.put(&url).json(request), &url)
            .await
    }

    async fn change_product_status(
        &self,
        id: i64,
        request: &ChangeStatusRequest,
    ) -> Result<Product> {
        let url = self.config.url(&format!("/products/{}/status", id));
        let product: Product = self
            .fetch(self.http_client.patch(&url).json(request), &url)
            .await?;

        tracing::info!("Product {} moved to status {}", id, request.status);
        Ok(product)
    }

    async fn list_media(&self, query: &ListQuery) -> Result<Page<Media>> {
        self.get_list("/medias", query).await
    }

    async fn upload_media(&self, upload: MediaUpload) -> Result<Media> {
        let url = self.config.url("/medias/upload");

        let mut part = multipart::Part::bytes(upload.bytes).file_name(upload.file_name.clone());
        if let Some(content_type) = &upload.content_type {
            part = part.mime_str(content_type).map_err(|e| {
                AppError::BadRequest(format!("Invalid content type '{}': {}", content_type, e))
            })?;
        }
        let mut form = multipart::Form::new().part("file", part);
        if let Some(alt_text) = upload.alt_text {
            form = form.text("altText", alt_text);
        }

        let media: Media = self
            .fetch(self.http_client.post(&url).multipart(form), &url)
            .await?;

        tracing::info!("Uploaded media {} ({})", media.id, upload.file_name);
        Ok(media)
    }
}

fn map_transport_error(e: reqwest::Error, url: &str) -> AppError {
    if e.is_timeout() {
        tracing::error!("Catalog API call timed out: {}", url);
        AppError::UpstreamTimeout(format!("Request to {} timed out", url))
    } else {
        tracing::error!("Failed to reach catalog API at {}: {}", url, e);
        AppError::ExternalServiceError(format!("Failed to reach catalog API: {}", e))
    }
}

async fn check_status(response: Response, url: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    tracing::error!("Catalog API error: HTTP {} - {} (URL: {})", status, body, url);
    Err(map_status_error(status, body))
}

fn map_status_error(status: StatusCode, body: String) -> AppError {
    let message = if body.trim().is_empty() {
        status
            .canonical_reason()
            .unwrap_or("Catalog API error")
            .to_string()
    } else {
        body
    };

    match status {
        StatusCode::NOT_FOUND => AppError::NotFound(message),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => AppError::BadRequest(message),
        StatusCode::UNAUTHORIZED => AppError::Unauthorized(message),
        StatusCode::FORBIDDEN => AppError::Forbidden(message),
        StatusCode::CONFLICT => AppError::Conflict(message),
        _ => AppError::ExternalServiceError(format!("Catalog API error: HTTP {} - {}", status, message)),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::extract::Query;
    use axum::http::Uri;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;
    use tokio_test::{assert_err, assert_ok};

    use super::*;
    use crate::shared::query::{SortDirection, SortDirective};

    fn client_for(base_url: String, api_token: Option<&str>, timeout: Duration) -> CatalogApiClient {
        CatalogApiClient::new(UpstreamConfig {
            base_url,
            api_token: api_token.map(str::to_string),
            timeout,
        })
        .unwrap()
    }

    /// Accept one connection, capture the request head and answer with `response`
    async fn serve_once(response: impl Into<String>) -> (String, oneshot::Receiver<String>) {
        let response = response.into();
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&buf[..n]);
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            let _ = tx.send(String::from_utf8_lossy(&head).into_owned());
        });

        (base_url, rx)
    }

    fn json_response(body: &str) -> String {
        format!(
            "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
            body.len(),
            body
        )
    }

    /// Decoded query pairs of the captured request line
    fn query_pairs(head: &str) -> Vec<(String, String)> {
        let target = head
            .lines()
            .next()
            .and_then(|line| line.split_whitespace().nth(1))
            .unwrap();
        let uri: Uri = target.parse().unwrap();
        let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(&uri).unwrap();
        pairs
    }

    fn has_header(head: &str, line: &str) -> bool {
        head.to_ascii_lowercase()
            .lines()
            .any(|l| l.trim() == line.to_ascii_lowercase())
    }

    #[test]
    fn test_map_status_error() {
        assert!(matches!(
            map_status_error(StatusCode::NOT_FOUND, "Category 9 not found".into()),
            AppError::NotFound(ref msg) if msg == "Category 9 not found"
        ));
        assert!(matches!(
            map_status_error(StatusCode::UNPROCESSABLE_ENTITY, "slug taken".into()),
            AppError::BadRequest(_)
        ));
        assert!(matches!(
            map_status_error(StatusCode::CONFLICT, String::new()),
            AppError::Conflict(ref msg) if msg == "Conflict"
        ));
        assert!(matches!(
            map_status_error(StatusCode::SERVICE_UNAVAILABLE, "down".into()),
            AppError::ExternalServiceError(ref msg) if msg.contains("503")
        ));
    }

    #[test]
    fn test_client_builds_from_config() {
        let client = client_for(
            "http://catalog.local".to_string(),
            Some("token"),
            Duration::from_millis(250),
        );

        assert_eq!(client.base_url(), "http://catalog.local");
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_external_error() {
        let client = client_for("http://127.0.0.1:9".to_string(), None, Duration::from_millis(500));

        let result = client.category_tree().await;
        assert!(matches!(
            result,
            Err(AppError::ExternalServiceError(_)) | Err(AppError::UpstreamTimeout(_))
        ));
    }

    #[tokio::test]
    async fn test_silent_upstream_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        tokio::spawn(async move {
            // Hold the connection open without ever answering
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
        });

        let client = client_for(base_url, None, Duration::from_millis(200));
        let result = client.category_tree().await;

        assert!(matches!(
            result,
            Err(AppError::UpstreamTimeout(ref msg)) if msg.contains("/categories/tree")
        ));
    }

    #[tokio::test]
    async fn test_list_sends_token_and_query_pairs() {
        let body = r#"{
            "content": [{"id": 1, "name": "Roses", "slug": "roses", "active": true}],
            "pageable": {"pageNumber": 1, "pageSize": 10, "offset": 10, "paged": true, "unpaged": false},
            "last": true, "totalElements": 11, "totalPages": 2, "size": 10, "number": 1,
            "first": false, "numberOfElements": 1, "empty": false
        }"#;
        let (base_url, captured) = serve_once(json_response(body)).await;
        let client = client_for(base_url, Some("secret-token"), Duration::from_secs(5));

        let query = ListQuery {
            page: 1,
            size: 10,
            sort: vec![
                SortDirective::new("name", SortDirection::Asc),
                SortDirective::new("createdDate", SortDirection::Desc),
            ],
            filter: Some("status eq 'DRAFT' and price ge 10".to_string()),
        };
        let page = assert_ok!(client.list_categories(&query).await);
        assert_eq!(page.total_elements, 11);
        assert_eq!(page.content[0].slug, "roses");

        let head = captured.await.unwrap();
        assert!(head.starts_with("GET /categories?"));
        assert!(has_header(&head, "authorization: Bearer secret-token"));
        assert_eq!(
            query_pairs(&head),
            vec![
                ("page".to_string(), "1".to_string()),
                ("size".to_string(), "10".to_string()),
                ("sort".to_string(), "name,asc".to_string()),
                ("sort".to_string(), "createdDate,desc".to_string()),
                (
                    "$filter".to_string(),
                    "status eq 'DRAFT' and price ge 10".to_string()
                ),
            ]
        );
    }

    #[tokio::test]
    async fn test_no_authorization_without_token() {
        let (base_url, captured) = serve_once(json_response("[]")).await;
        let client = client_for(base_url, None, Duration::from_secs(5));

        let forest = assert_ok!(client.category_tree().await);
        assert!(forest.is_empty());

        let head = captured.await.unwrap();
        assert!(!head.to_ascii_lowercase().contains("authorization:"));
    }

    #[tokio::test]
    async fn test_delete_accepts_empty_success_bodies() {
        for response in [
            "HTTP/1.1 204 No Content\r\nconnection: close\r\n\r\n",
            "HTTP/1.1 200 OK\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
        ] {
            let (base_url, captured) = serve_once(response).await;
            let client = client_for(base_url, Some("secret-token"), Duration::from_secs(5));

            assert_ok!(client.delete_category(7).await);

            let head = captured.await.unwrap();
            assert!(head.starts_with("DELETE /categories/7 HTTP/1.1"));
            assert!(has_header(&head, "authorization: Bearer secret-token"));
        }
    }

    #[tokio::test]
    async fn test_upstream_status_is_mapped() {
        let (base_url, _captured) = serve_once(
            "HTTP/1.1 404 Not Found\r\ncontent-length: 20\r\nconnection: close\r\n\r\nCategory 9 not found",
        )
        .await;
        let client = client_for(base_url, None, Duration::from_secs(5));

        let err = assert_err!(client.get_category(9).await);
        assert!(matches!(err, AppError::NotFound(ref msg) if msg == "Category 9 not found"));
    }
}
