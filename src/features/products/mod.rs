//! Product management backed by the catalog API.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/products` | List products (paged, sortable, filterable) |
//! | POST | `/api/products` | Create product (starts as `DRAFT`) |
//! | GET | `/api/products/{id}` | Product detail |
//! | PUT | `/api/products/{id}` | Update product |
//! | PATCH | `/api/products/{id}/status` | Move between `DRAFT` and `APPROVED` |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::ProductService;
