//! API DTOs
//!
//! `price` and `stock` arrive as raw JSON so that numbers and numeric strings
//! are both accepted and every bad field is reported, rather than failing the
//! whole body at deserialization.

use chrono::{DateTime, Utc};
use kernel::error::validation::ValidationErrors;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::{CreateProductInput, UpdateProductInput};
use crate::domain::entity::product::Product;
use crate::domain::value_object::{
    price::Price,
    product_id::ProductPublicId,
    product_name::{ProductName, ProductNameError},
    stock::Stock,
};

const PRICE_MESSAGE: &str = "Price must be a valid number";
const STOCK_MESSAGE: &str = "Stock must be a non-negative integer";

/// Parse a path id
pub fn product_public_id(raw: &str) -> Result<ProductPublicId, ValidationErrors> {
    ProductPublicId::parse_str(raw)
        .map_err(|_| ValidationErrors::single("uuid", "Valid uuid required"))
}

fn name(errors: &mut ValidationErrors, raw: &str, empty_message: &str) -> Option<ProductName> {
    errors.check(
        "name",
        ProductName::new(raw).map_err(|e| match e {
            ProductNameError::Empty => empty_message.to_string(),
            ProductNameError::TooLong => format!("Name {e}"),
        }),
    )
}

fn price(errors: &mut ValidationErrors, raw: &Value) -> Option<Price> {
    let parsed = match raw {
        Value::Number(n) => Price::parse(&n.to_string()).ok(),
        Value::String(s) => Price::parse(s).ok(),
        _ => None,
    };
    if parsed.is_none() {
        errors.add("price", PRICE_MESSAGE);
    }
    parsed
}

fn stock(errors: &mut ValidationErrors, raw: &Value) -> Option<Stock> {
    let parsed = match raw {
        Value::Number(n) => n.as_i64().and_then(|u| Stock::new(u).ok()),
        Value::String(s) => Stock::parse(s).ok(),
        _ => None,
    };
    if parsed.is_none() {
        errors.add("stock", STOCK_MESSAGE);
    }
    parsed
}

/// Create request
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Value>,
    pub stock: Option<Value>,
}

impl CreateProductRequest {
    pub fn validate(self) -> Result<CreateProductInput, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = name(
            &mut errors,
            self.name.as_deref().unwrap_or_default(),
            "Name required",
        );
        let price = price(&mut errors, &self.price.unwrap_or(Value::Null));
        let stock = stock(&mut errors, &self.stock.unwrap_or(Value::Null));

        match (name, price, stock) {
            (Some(name), Some(price), Some(stock)) => Ok(CreateProductInput {
                name,
                description: self.description,
                price,
                stock,
            }),
            _ => Err(errors),
        }
    }
}

/// Partial update request
///
/// `description: null` clears it; `null` on any other field counts as absent.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    #[serde(deserialize_with = "kernel::patch::deserialize_some")]
    pub description: Option<Option<String>>,
    pub price: Option<Value>,
    pub stock: Option<Value>,
}

impl UpdateProductRequest {
    pub fn validate(self) -> Result<UpdateProductInput, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let input = UpdateProductInput {
            name: self
                .name
                .and_then(|v| name(&mut errors, &v, "Name cannot be empty")),
            description: self.description,
            price: self.price.and_then(|v| price(&mut errors, &v)),
            stock: self.stock.and_then(|v| stock(&mut errors, &v)),
        };

        errors.into_result().map(|()| input)
    }
}

/// Client-facing product
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub uuid: ProductPublicId,
    pub name: String,
    pub description: Option<String>,
    pub price: Price,
    pub stock: Stock,
    /// Creator's surrogate id
    pub created_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Product> for ProductResponse {
    fn from(product: &Product) -> Self {
        Self {
            uuid: product.public_id,
            name: product.name.as_str().to_string(),
            description: product.description.clone(),
            price: product.price,
            stock: product.stock,
            created_by: product.created_by.map(|id| id.get()),
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create(body: Value) -> Result<CreateProductInput, ValidationErrors> {
        serde_json::from_value::<CreateProductRequest>(body)
            .unwrap()
            .validate()
    }

    #[test]
    fn test_create_accepts_numeric_strings() {
        let input = create(json!({ "name": "Lamp", "price": "12.50", "stock": "3" })).unwrap();
        assert_eq!(input.price.to_string(), "12.50");
        assert_eq!(input.stock.units(), 3);
        assert!(input.description.is_none());
    }

    #[test]
    fn test_create_reports_every_field() {
        let errors = create(json!({ "price": -1, "stock": 1.5 })).unwrap_err();
        assert_eq!(errors.fields(), vec!["name", "price", "stock"]);
        assert_eq!(errors.errors()[0].message, "Name required");
        assert_eq!(errors.errors()[1].message, PRICE_MESSAGE);
        assert_eq!(errors.errors()[2].message, STOCK_MESSAGE);
    }

    #[test]
    fn test_create_rejects_non_numeric_types() {
        let errors = create(json!({ "name": "Lamp", "price": true, "stock": [1] })).unwrap_err();
        assert_eq!(errors.fields(), vec!["price", "stock"]);
    }

    #[test]
    fn test_update_distinguishes_null_description() {
        let req: UpdateProductRequest =
            serde_json::from_value(json!({ "description": null })).unwrap();
        let input = req.validate().unwrap();
        assert_eq!(input.description, Some(None));
        assert!(input.name.is_none());

        let req: UpdateProductRequest = serde_json::from_value(json!({})).unwrap();
        assert!(req.validate().unwrap().description.is_none());
    }

    #[test]
    fn test_update_empty_name_rejected() {
        let req: UpdateProductRequest = serde_json::from_value(json!({ "name": " " })).unwrap();
        let errors = req.validate().unwrap_err();
        assert_eq!(errors.errors()[0].message, "Name cannot be empty");
    }

    #[test]
    fn test_bad_path_id() {
        let errors = product_public_id("123").unwrap_err();
        assert_eq!(errors.errors()[0].message, "Valid uuid required");
    }
}
