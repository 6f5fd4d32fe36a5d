//! Domain Layer

pub mod entity;
pub mod repository;
pub mod value_object;

pub use entity::product::{NewProduct, Product, ProductChanges};
pub use repository::ProductRepository;
