//! Product Catalog Use Case
//!
//! Reads are public; writes are reachable only through the admin gate.

use auth::domain::value_object::user_id::UserId;
use std::sync::Arc;

use crate::domain::entity::product::{NewProduct, Product, ProductChanges};
use crate::domain::repository::ProductRepository;
use crate::domain::value_object::{
    price::Price, product_id::ProductPublicId, product_name::ProductName, stock::Stock,
};
use crate::error::{CatalogError, CatalogResult};

#[derive(Debug)]
pub struct CreateProductInput {
    pub name: ProductName,
    pub description: Option<String>,
    pub price: Price,
    pub stock: Stock,
}

#[derive(Debug, Default)]
pub struct UpdateProductInput {
    pub name: Option<ProductName>,
    pub description: Option<Option<String>>,
    pub price: Option<Price>,
    pub stock: Option<Stock>,
}

pub struct ProductCatalogUseCase<P>
where
    P: ProductRepository,
{
    repo: Arc<P>,
}

impl<P> ProductCatalogUseCase<P>
where
    P: ProductRepository,
{
    pub fn new(repo: Arc<P>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> CatalogResult<Vec<Product>> {
        self.repo.list().await
    }

    pub async fn get(&self, public_id: &ProductPublicId) -> CatalogResult<Product> {
        self.repo
            .find_by_public_id(public_id)
            .await?
            .ok_or(CatalogError::ProductNotFound)
    }

    /// `created_by` is the acting admin
    pub async fn create(
        &self,
        input: CreateProductInput,
        created_by: UserId,
    ) -> CatalogResult<Product> {
        let new_product = NewProduct::new(
            input.name,
            input.description,
            input.price,
            input.stock,
            Some(created_by),
        );
        let product = self.repo.create(&new_product).await?;

        tracing::info!(
            public_id = %product.public_id,
            created_by = %created_by,
            "Product created"
        );

        Ok(product)
    }

    /// An empty update returns the current record
    pub async fn update(
        &self,
        public_id: &ProductPublicId,
        input: UpdateProductInput,
    ) -> CatalogResult<Product> {
        let changes = ProductChanges {
            name: input.name,
            description: input.description,
            price: input.price,
            stock: input.stock,
        };

        if changes.is_empty() {
            return self.get(public_id).await;
        }

        let product = self
            .repo
            .update(public_id, &changes)
            .await?
            .ok_or(CatalogError::ProductNotFound)?;

        tracing::info!(public_id = %product.public_id, "Product updated");

        Ok(product)
    }

    pub async fn delete(&self, public_id: &ProductPublicId) -> CatalogResult<()> {
        if !self.repo.delete(public_id).await? {
            return Err(CatalogError::ProductNotFound);
        }

        tracing::info!(public_id = %public_id, "Product deleted");

        Ok(())
    }
}
