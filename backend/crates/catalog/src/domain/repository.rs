//! Repository Traits

use crate::domain::entity::product::{NewProduct, Product, ProductChanges};
use crate::domain::value_object::product_id::ProductPublicId;
use crate::error::CatalogResult;

/// Product repository trait
#[trait_variant::make(ProductRepository: Send)]
pub trait LocalProductRepository {
    async fn create(&self, product: &NewProduct) -> CatalogResult<Product>;

    async fn find_by_public_id(&self, public_id: &ProductPublicId)
    -> CatalogResult<Option<Product>>;

    /// All products, newest first
    async fn list(&self) -> CatalogResult<Vec<Product>>;

    /// Persist only the present fields; `None` when the product does not exist
    async fn update(
        &self,
        public_id: &ProductPublicId,
        changes: &ProductChanges,
    ) -> CatalogResult<Option<Product>>;

    /// `false` when nothing was deleted
    async fn delete(&self, public_id: &ProductPublicId) -> CatalogResult<bool>;
}
