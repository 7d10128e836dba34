//! Products

use std::fmt::{Display, Formatter, Result as FmtResult};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Product Identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(i64);

impl ProductId {
    /// Wrap a raw backend identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// The raw backend identifier.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

/// Product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product identifier
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Product unit price
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub price: Decimal,
}

impl Product {
    /// Create a new product.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
        }
    }
}

/// Errors raised when a product form is not fit for submission.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProductValidationError {
    /// The product name is empty or whitespace.
    #[error("product name is required")]
    BlankName,

    /// The product price is zero or negative.
    #[error("product price must be greater than zero, got {0}")]
    NonPositivePrice(Decimal),
}

/// New Product
///
/// Body of a product creation request; the backend assigns the identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    /// Product name
    pub name: String,

    /// Product unit price
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub price: Decimal,
}

impl NewProduct {
    /// Build a validated product creation request.
    ///
    /// # Errors
    ///
    /// - [`ProductValidationError::BlankName`]: the name is empty after trimming.
    /// - [`ProductValidationError::NonPositivePrice`]: the price is not greater than zero.
    pub fn new(name: &str, price: Decimal) -> Result<Self, ProductValidationError> {
        let name = name.trim();

        if name.is_empty() {
            return Err(ProductValidationError::BlankName);
        }

        if price <= Decimal::ZERO {
            return Err(ProductValidationError::NonPositivePrice(price));
        }

        Ok(Self {
            name: name.to_string(),
            price,
        })
    }
}

/// Find a product in a catalog by its identifier.
pub fn find_product(catalog: &[Product], id: ProductId) -> Option<&Product> {
    catalog.iter().find(|product| product.id == id)
}
