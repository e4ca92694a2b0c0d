use std::env;
use std::time::Duration;

use crate::shared::constants::DEFAULT_API_TIMEOUT_MS;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub upstream: UpstreamConfig,
    pub swagger: SwaggerConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub max_request_body_size: usize,
}

/// Catalog REST API the gateway forwards to
#[derive(Clone)]
pub struct UpstreamConfig {
    /// Base URL without trailing slash, e.g. `https://api.example.com/api/v1`
    pub base_url: String,
    /// Bearer token sent with every upstream call
    pub api_token: Option<String>,
    /// Wall-clock budget for one upstream call
    pub timeout: Duration,
}

impl std::fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("base_url", &self.base_url)
            .field("api_token", &self.api_token.as_ref().map(|_| "***"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            // Only error if it's not "file not found" - that's acceptable
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            upstream: UpstreamConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
        })
    }
}

impl AppConfig {
    const DEFAULT_MAX_REQUEST_BODY_SIZE: usize = 10 * 1024 * 1024; // 10MB

    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_request_body_size = env::var("MAX_REQUEST_BODY_SIZE")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_REQUEST_BODY_SIZE.to_string())
            .parse::<usize>()
            .map_err(|_| "MAX_REQUEST_BODY_SIZE must be a valid number".to_string())?;

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
            max_request_body_size,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl UpstreamConfig {
    pub fn from_env() -> Result<Self, String> {
        let base_url = env::var("API_BASE_URL")
            .map_err(|_| "API_BASE_URL environment variable is required".to_string())?;
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err("API_BASE_URL must not be empty".to_string());
        }

        let api_token = env::var("API_TOKEN").ok().filter(|s| !s.is_empty());

        let timeout_ms = env::var("API_TIMEOUT_MS")
            .unwrap_or_else(|_| DEFAULT_API_TIMEOUT_MS.to_string())
            .parse::<u64>()
            .map_err(|_| "API_TIMEOUT_MS must be a valid number".to_string())?;

        Ok(Self {
            base_url,
            api_token,
            timeout: Duration::from_millis(timeout_ms),
        })
    }

    /// Join a path (starting with `/`) onto the base URL
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title =
            env::var("SWAGGER_TITLE").unwrap_or_else(|_| "Catalog Backoffice API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "Back-office gateway for the catalog API".to_string());

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_url_join() {
        let config = UpstreamConfig {
            base_url: "http://catalog.local/api".to_string(),
            api_token: None,
            timeout: Duration::from_millis(DEFAULT_API_TIMEOUT_MS),
        };
        assert_eq!(
            config.url("/categories/tree"),
            "http://catalog.local/api/categories/tree"
        );
    }

    #[test]
    fn test_upstream_debug_hides_token() {
        let config = UpstreamConfig {
            base_url: "http://catalog.local".to_string(),
            api_token: Some("secret-token".to_string()),
            timeout: Duration::from_secs(1),
        };
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("***"));
    }

    #[test]
    fn test_swagger_credentials() {
        let mut swagger = SwaggerConfig {
            username: Some("admin".to_string()),
            password: None,
            title: String::new(),
            version: String::new(),
            description: String::new(),
        };
        assert_eq!(swagger.credentials(), None);

        swagger.password = Some("pw".to_string());
        assert_eq!(swagger.credentials(), Some("admin:pw".to_string()));
    }
}
