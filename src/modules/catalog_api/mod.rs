//! Catalog API module
//!
//! Client for the upstream catalog REST API (categories, products, media)
//! and the Spring-style `Page<T>` envelope its list endpoints return.

mod client;
pub mod page;

pub use client::{CatalogApi, CatalogApiClient};
pub use page::Page;
