pub mod categories;
pub mod medias;
pub mod products;
