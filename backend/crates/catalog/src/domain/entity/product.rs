//! Product Entity

use auth::domain::value_object::user_id::UserId;
use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    price::Price,
    product_id::{ProductId, ProductPublicId},
    product_name::ProductName,
    stock::Stock,
};

#[derive(Debug, Clone)]
pub struct Product {
    pub id: ProductId,
    pub public_id: ProductPublicId,
    pub name: ProductName,
    pub description: Option<String>,
    pub price: Price,
    pub stock: Stock,
    /// Creating admin; `None` once that account is deleted
    pub created_by: Option<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Apply a partial update in place
    pub fn apply(&mut self, changes: &ProductChanges, now: DateTime<Utc>) {
        if changes.is_empty() {
            return;
        }
        if let Some(name) = &changes.name {
            self.name = name.clone();
        }
        if let Some(description) = &changes.description {
            self.description = description.clone();
        }
        if let Some(price) = changes.price {
            self.price = price;
        }
        if let Some(stock) = changes.stock {
            self.stock = stock;
        }
        self.updated_at = now;
    }
}

/// Insert payload
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub public_id: ProductPublicId,
    pub name: ProductName,
    pub description: Option<String>,
    pub price: Price,
    pub stock: Stock,
    pub created_by: Option<UserId>,
}

impl NewProduct {
    pub fn new(
        name: ProductName,
        description: Option<String>,
        price: Price,
        stock: Stock,
        created_by: Option<UserId>,
    ) -> Self {
        Self {
            public_id: ProductPublicId::new(),
            name,
            description,
            price,
            stock,
            created_by,
        }
    }
}

/// Partial update; `description: Some(None)` clears it
#[derive(Debug, Clone, Default)]
pub struct ProductChanges {
    pub name: Option<ProductName>,
    pub description: Option<Option<String>>,
    pub price: Option<Price>,
    pub stock: Option<Stock>,
}

impl ProductChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.stock.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Product {
        let now = Utc::now();
        Product {
            id: ProductId::new(1),
            public_id: ProductPublicId::new(),
            name: ProductName::new("Lamp").unwrap(),
            description: Some("Desk lamp".to_string()),
            price: Price::parse("10").unwrap(),
            stock: Stock::new(3).unwrap(),
            created_by: Some(UserId::new(7)),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_apply_present_fields_only() {
        let mut product = sample();
        let changes = ProductChanges {
            stock: Some(Stock::new(0).unwrap()),
            ..ProductChanges::default()
        };
        product.apply(&changes, Utc::now());
        assert_eq!(product.stock.units(), 0);
        assert_eq!(product.name.as_str(), "Lamp");
        assert_eq!(product.description.as_deref(), Some("Desk lamp"));
        assert_eq!(product.created_by, Some(UserId::new(7)));
    }

    #[test]
    fn test_clear_description() {
        let mut product = sample();
        let changes = ProductChanges {
            description: Some(None),
            ..ProductChanges::default()
        };
        product.apply(&changes, Utc::now());
        assert!(product.description.is_none());
    }
}
