//! Catalog Backend Module
//!
//! Product resource with the same layering as `auth`:
//! - `domain/` - Product entity, value objects, repository trait
//! - `application/` - Catalog use case
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! Reads are public. Create, update and delete require an admin bearer token,
//! checked by `auth`'s gate.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


pub use error::{CatalogError, CatalogResult};
pub use infra::{memory::InMemoryCatalogRepository, postgres::PgCatalogRepository};
pub use presentation::router::{products_router, products_router_generic};
