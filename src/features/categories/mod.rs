//! Category management backed by the catalog API.
//!
//! Besides plain CRUD this feature owns the category hierarchy: the tree is
//! normalized through [`tree::CategoryTree`], flattened for the parent picker
//! and used to keep a category from being moved under its own subtree.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/categories` | List categories (paged; `tree=true` nests the page) |
//! | POST | `/api/categories` | Create category |
//! | GET | `/api/categories/tree` | Whole hierarchy |
//! | GET | `/api/categories/options` | Parent picker entries (`disable=<id>`) |
//! | GET | `/api/categories/{id}` | Category detail |
//! | PUT | `/api/categories/{id}` | Update category |
//! | DELETE | `/api/categories/{id}` | Delete category |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod tree;

pub use services::CategoryService;
