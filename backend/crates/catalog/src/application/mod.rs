//! Application Layer

pub mod product_catalog;

pub use product_catalog::{CreateProductInput, ProductCatalogUseCase, UpdateProductInput};
