mod product;

pub use product::{
    ChangeStatusRequest, CreateProductRequest, Product, ProductStatus, UpdateProductRequest,
};
