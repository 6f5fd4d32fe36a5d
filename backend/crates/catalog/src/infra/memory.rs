//! In-Memory Repository Implementation
//!
//! Mirrors [`PgCatalogRepository`](super::postgres::PgCatalogRepository)
//! behind one mutex; used by router tests.

use chrono::Utc;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::entity::product::{NewProduct, Product, ProductChanges};
use crate::domain::repository::ProductRepository;
use crate::domain::value_object::product_id::{ProductId, ProductPublicId};
use crate::error::{CatalogError, CatalogResult};

#[derive(Default)]
struct Store {
    products: Vec<Product>,
    next_id: i64,
}

#[derive(Clone, Default)]
pub struct InMemoryCatalogRepository {
    store: Arc<Mutex<Store>>,
}

impl InMemoryCatalogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> CatalogResult<MutexGuard<'_, Store>> {
        self.store
            .lock()
            .map_err(|_| CatalogError::Internal("In-memory store poisoned".to_string()))
    }
}

impl ProductRepository for InMemoryCatalogRepository {
    async fn create(&self, product: &NewProduct) -> CatalogResult<Product> {
        let mut store = self.lock()?;
        store.next_id += 1;
        let now = Utc::now();
        let stored = Product {
            id: ProductId::new(store.next_id),
            public_id: product.public_id,
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            stock: product.stock,
            created_by: product.created_by,
            created_at: now,
            updated_at: now,
        };
        store.products.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_public_id(
        &self,
        public_id: &ProductPublicId,
    ) -> CatalogResult<Option<Product>> {
        Ok(self
            .lock()?
            .products
            .iter()
            .find(|p| &p.public_id == public_id)
            .cloned())
    }

    async fn list(&self) -> CatalogResult<Vec<Product>> {
        let mut products = self.lock()?.products.clone();
        products.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.get().cmp(&a.id.get()))
        });
        Ok(products)
    }

    async fn update(
        &self,
        public_id: &ProductPublicId,
        changes: &ProductChanges,
    ) -> CatalogResult<Option<Product>> {
        let mut store = self.lock()?;
        Ok(store
            .products
            .iter_mut()
            .find(|p| &p.public_id == public_id)
            .map(|product| {
                product.apply(changes, Utc::now());
                product.clone()
            }))
    }

    async fn delete(&self, public_id: &ProductPublicId) -> CatalogResult<bool> {
        let mut store = self.lock()?;
        let before = store.products.len();
        store.products.retain(|p| &p.public_id != public_id);
        Ok(store.products.len() != before)
    }
}
