//! Invoices

use std::fmt::{Display, Formatter, Result as FmtResult};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::products::Product;

/// Invoice Identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvoiceId(i64);

impl InvoiceId {
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

impl Display for InvoiceId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "#{}", self.0)
    }
}

/// A persisted invoice line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceLine {
    /// Product as priced by the backend
    pub product: Product,

    /// Ordered quantity
    pub quantity: u32,
}

impl InvoiceLine {
    /// `quantity * product.price`, or `None` if it cannot be represented.
    pub fn line_total(&self) -> Option<Decimal> {
        self.product.price.checked_mul(Decimal::from(self.quantity))
    }
}

/// Invoice
///
/// An invoice as listed by the backend. The backend owns `total_amount`; it is not recomputed
/// from the lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    /// Invoice identifier
    pub id: InvoiceId,

    /// Customer name
    pub customer_name: String,

    /// Customer email
    pub customer_email: String,

    /// Invoice total as computed by the backend
    #[serde(default)]
    pub total_amount: Decimal,

    /// Creation timestamp, displayed as sent
    #[serde(default)]
    pub created_at: String,

    /// Invoice lines
    #[serde(default)]
    pub items: Vec<InvoiceLine>,
}

impl Invoice {
    /// Find an invoice by identifier.
    pub fn find(invoices: &[Invoice], id: InvoiceId) -> Option<&Invoice> {
        invoices.iter().find(|invoice| invoice.id == id)
    }
}
