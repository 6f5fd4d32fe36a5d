//! PostgreSQL Repository Implementation

use auth::domain::value_object::user_id::UserId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::domain::entity::product::{NewProduct, Product, ProductChanges};
use crate::domain::repository::ProductRepository;
use crate::domain::value_object::{
    price::Price,
    product_id::{ProductId, ProductPublicId},
    product_name::ProductName,
    stock::Stock,
};
use crate::error::CatalogResult;

const PRODUCT_COLUMNS: &str =
    "id, uuid, name, description, price, stock, created_by, created_at, updated_at";

#[derive(Clone)]
pub struct PgCatalogRepository {
    pool: PgPool,
}

impl PgCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ProductRepository for PgCatalogRepository {
    async fn create(&self, product: &NewProduct) -> CatalogResult<Product> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            INSERT INTO products (uuid, name, description, price, stock, created_by)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(product.public_id.as_uuid())
        .bind(product.name.as_str())
        .bind(product.description.as_deref())
        .bind(product.price.amount())
        .bind(product.stock.units())
        .bind(product.created_by.map(|id| id.get()))
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_product())
    }

    async fn find_by_public_id(
        &self,
        public_id: &ProductPublicId,
    ) -> CatalogResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE uuid = $1"
        ))
        .bind(public_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ProductRow::into_product))
    }

    async fn list(&self) -> CatalogResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ProductRow::into_product).collect())
    }

    async fn update(
        &self,
        public_id: &ProductPublicId,
        changes: &ProductChanges,
    ) -> CatalogResult<Option<Product>> {
        if changes.is_empty() {
            return self.find_by_public_id(public_id).await;
        }

        let mut builder = QueryBuilder::<Postgres>::new("UPDATE products SET ");
        let mut set = builder.separated(", ");
        if let Some(name) = &changes.name {
            set.push("name = ").push_bind_unseparated(name.as_str());
        }
        if let Some(description) = &changes.description {
            set.push("description = ")
                .push_bind_unseparated(description.as_deref());
        }
        if let Some(price) = changes.price {
            set.push("price = ").push_bind_unseparated(price.amount());
        }
        if let Some(stock) = changes.stock {
            set.push("stock = ").push_bind_unseparated(stock.units());
        }
        set.push("updated_at = NOW()");

        builder
            .push(" WHERE uuid = ")
            .push_bind(*public_id.as_uuid())
            .push(" RETURNING ")
            .push(PRODUCT_COLUMNS);

        let row = builder
            .build_query_as::<ProductRow>()
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(ProductRow::into_product))
    }

    async fn delete(&self, public_id: &ProductPublicId) -> CatalogResult<bool> {
        let deleted = sqlx::query("DELETE FROM products WHERE uuid = $1")
            .bind(public_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: i64,
    uuid: Uuid,
    name: String,
    description: Option<String>,
    price: Decimal,
    stock: i32,
    created_by: Option<i64>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProductRow {
    fn into_product(self) -> Product {
        Product {
            id: ProductId::new(self.id),
            public_id: ProductPublicId::from_uuid(self.uuid),
            name: ProductName::from_db(self.name),
            description: self.description,
            price: Price::from_db(self.price),
            stock: Stock::from_db(self.stock),
            created_by: self.created_by.map(UserId::new),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
