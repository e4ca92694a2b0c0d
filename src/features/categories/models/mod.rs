mod category;

pub use category::{Category, CreateCategoryRequest, UpdateCategoryRequest};
