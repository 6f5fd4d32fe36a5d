//! Presentation Layer

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::CatalogAppState;
pub use router::{products_router, products_router_generic};
