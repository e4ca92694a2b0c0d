//! Media library backed by the catalog API.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/medias` | List media (paged, sortable, filterable) |
//! | POST | `/api/medias/upload` | Upload an image (multipart) |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::MediaService;
