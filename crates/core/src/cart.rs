//! Cart
//!
//! The cart holds the line items of an invoice being composed. It is only ever changed through
//! [`Cart::add_item`] and [`Cart::remove_item`], each of which returns a new cart and leaves the
//! receiver untouched, so a view can keep the previous state around until it commits the new one.

use std::num::NonZeroU32;

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::{
    draft::{Customer, DraftField, DraftItem, InvoiceDraft, ValidationFailed},
    products::{Product, ProductId},
};

/// Errors raised when a quantity is not a positive integer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuantityError {
    /// Quantity was zero or negative.
    #[error("quantity must be at least 1, got {0}")]
    NotPositive(i64),

    /// Quantity does not fit in the supported range.
    #[error("quantity {0} is too large")]
    TooLarge(i64),
}

/// Quantity of a product on a line, always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Quantity(NonZeroU32);

impl Quantity {
    /// A single unit.
    pub const ONE: Self = Self(NonZeroU32::MIN);

    /// Validate a raw quantity as entered by a user.
    ///
    /// # Errors
    ///
    /// - [`QuantityError::NotPositive`]: the value is zero or negative.
    /// - [`QuantityError::TooLarge`]: the value does not fit in a `u32`.
    pub fn new(value: i64) -> Result<Self, QuantityError> {
        if value <= 0 {
            return Err(QuantityError::NotPositive(value));
        }

        u32::try_from(value)
            .ok()
            .and_then(NonZeroU32::new)
            .map(Self)
            .ok_or(QuantityError::TooLarge(value))
    }

    /// The quantity as an integer.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.get()).map(Self)
    }
}

impl TryFrom<i64> for Quantity {
    type Error = QuantityError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for Decimal {
    fn from(quantity: Quantity) -> Self {
        Decimal::from(quantity.get())
    }
}

/// Errors that can occur while changing a cart.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// Merging quantities for a product would overflow.
    #[error("quantity for product {0} overflows")]
    QuantityOverflow(ProductId),

    /// A line total or the cart total exceeds the decimal range.
    #[error("amount for product {0} overflows")]
    AmountOverflow(ProductId),
}

/// A product, its quantity and the derived line total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    product: Product,
    quantity: Quantity,
    line_total: Decimal,
}

impl LineItem {
    /// Create a line for the given product and quantity.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::AmountOverflow`] if the line total cannot be represented.
    pub fn new(product: Product, quantity: Quantity) -> Result<Self, CartError> {
        let line_total = line_total(&product, quantity)?;

        Ok(Self {
            product,
            quantity,
            line_total,
        })
    }

    /// The product on this line.
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// The ordered quantity.
    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// `quantity * product.price`
    pub fn line_total(&self) -> Decimal {
        self.line_total
    }
}

fn line_total(product: &Product, quantity: Quantity) -> Result<Decimal, CartError> {
    product
        .price
        .checked_mul(Decimal::from(quantity))
        .ok_or(CartError::AmountOverflow(product.id))
}

/// Cart
///
/// Line items in insertion order, at most one per product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` of `product`, merging into the existing line for the same product.
    ///
    /// A merged line keeps its position and has its total recomputed from the product passed
    /// here; an unknown product is appended at the end.
    ///
    /// # Errors
    ///
    /// - [`CartError::QuantityOverflow`]: the merged quantity does not fit.
    /// - [`CartError::AmountOverflow`]: the line total cannot be represented.
    pub fn add_item(&self, product: &Product, quantity: Quantity) -> Result<Self, CartError> {
        let mut items = self.items.clone();

        match items.iter_mut().find(|item| item.product.id == product.id) {
            Some(existing) => {
                let merged = existing
                    .quantity
                    .checked_add(quantity)
                    .ok_or(CartError::QuantityOverflow(product.id))?;

                *existing = LineItem::new(product.clone(), merged)?;
            }
            None => items.push(LineItem::new(product.clone(), quantity)?),
        }

        Ok(Self { items })
    }

    /// Remove the line for `product`. Removing an absent product returns an equal cart.
    #[must_use]
    pub fn remove_item(&self, product: ProductId) -> Self {
        Self {
            items: self
                .items
                .iter()
                .filter(|item| item.product.id != product)
                .cloned()
                .collect(),
        }
    }

    /// Sum of all line totals; zero for an empty cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::AmountOverflow`] naming the first line whose addition overflows.
    pub fn total_amount(&self) -> Result<Decimal, CartError> {
        self.items.iter().try_fold(Decimal::ZERO, |total, item| {
            total
                .checked_add(item.line_total)
                .ok_or(CartError::AmountOverflow(item.product.id))
        })
    }

    /// Project the cart into the payload sent to the invoice backend.
    ///
    /// Prices and line totals are left out; the backend prices the invoice itself.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationFailed`] listing every missing or invalid field, including
    /// [`DraftField::Items`] when the cart is empty.
    pub fn to_draft(
        &self,
        customer_name: &str,
        customer_email: &str,
    ) -> Result<InvoiceDraft, ValidationFailed> {
        let customer = Customer::new(customer_name, customer_email);

        let mut failed = customer.as_ref().err().cloned().unwrap_or_default();

        if self.is_empty() {
            failed.push(DraftField::Items);
        }

        match customer {
            Ok(customer) if failed.is_empty() => Ok(InvoiceDraft::new(
                customer,
                self.items
                    .iter()
                    .map(|item| DraftItem::new(item.product.id, item.quantity))
                    .collect(),
            )),
            _ => Err(failed),
        }
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Iterate over the line items in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &LineItem> {
        self.items.iter()
    }

    /// Find the line for a product.
    pub fn get(&self, product: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.product.id == product)
    }

    /// Number of distinct products in the cart.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
