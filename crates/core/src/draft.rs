//! Invoice Drafts

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use crate::{cart::Quantity, products::ProductId};

/// A field of the invoice form that can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    /// Customer name is blank.
    CustomerName,

    /// Customer email is blank or not a plausible address.
    CustomerEmail,

    /// The cart has no items.
    Items,
}

impl Display for DraftField {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(match self {
            DraftField::CustomerName => "customer name",
            DraftField::CustomerEmail => "customer email",
            DraftField::Items => "items",
        })
    }
}

/// Validation failure naming every field that needs correcting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("missing or invalid {}", join_fields(.fields))]
pub struct ValidationFailed {
    fields: SmallVec<[DraftField; 3]>,
}

impl ValidationFailed {
    /// Record a failing field. Each field is recorded once.
    pub fn push(&mut self, field: DraftField) {
        if !self.fields.contains(&field) {
            self.fields.push(field);
        }
    }

    /// Failing fields in the order they were checked.
    pub fn fields(&self) -> &[DraftField] {
        &self.fields
    }

    /// Whether `field` failed.
    pub fn contains(&self, field: DraftField) -> bool {
        self.fields.contains(&field)
    }

    /// No field failed.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<DraftField> for ValidationFailed {
    fn from(field: DraftField) -> Self {
        let mut failed = Self::default();
        failed.push(field);
        failed
    }
}

fn join_fields(fields: &[DraftField]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Customer details entered on the invoice form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    name: String,
    email: String,
}

impl Customer {
    /// Validate the customer name and email.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationFailed`] naming [`DraftField::CustomerName`] and/or
    /// [`DraftField::CustomerEmail`].
    pub fn new(name: &str, email: &str) -> Result<Self, ValidationFailed> {
        let name = name.trim();
        let email = email.trim();

        let mut failed = ValidationFailed::default();

        if name.is_empty() {
            failed.push(DraftField::CustomerName);
        }

        if !is_plausible_email(email) {
            failed.push(DraftField::CustomerEmail);
        }

        if !failed.is_empty() {
            return Err(failed);
        }

        Ok(Self {
            name: name.to_string(),
            email: email.to_string(),
        })
    }

    /// Customer name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Customer email
    pub fn email(&self) -> &str {
        &self.email
    }
}

/// Loose syntactic check: one `@`, a local part, and a dotted domain.
pub fn is_plausible_email(email: &str) -> bool {
    if email.is_empty() || email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') {
        return false;
    }

    domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

/// Reference to a product by identifier only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRef {
    /// Product identifier
    pub id: ProductId,
}

/// One line of an invoice draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DraftItem {
    /// The ordered product
    pub product: ProductRef,

    /// The ordered quantity
    pub quantity: Quantity,
}

impl DraftItem {
    /// Create a draft line.
    pub fn new(product: ProductId, quantity: Quantity) -> Self {
        Self {
            product: ProductRef { id: product },
            quantity,
        }
    }
}

/// Invoice Draft
///
/// Payload of an invoice creation request. Carries no prices; the backend is the source of truth
/// for pricing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDraft {
    customer_name: String,
    customer_email: String,
    items: Vec<DraftItem>,
}

impl InvoiceDraft {
    pub(crate) fn new(customer: Customer, items: Vec<DraftItem>) -> Self {
        Self {
            customer_name: customer.name,
            customer_email: customer.email,
            items,
        }
    }

    /// Customer name
    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    /// Customer email
    pub fn customer_email(&self) -> &str {
        &self.customer_email
    }

    /// Draft lines in cart order.
    pub fn items(&self) -> &[DraftItem] {
        &self.items
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn plausible_emails() {
        for email in ["a@b.co", "first.last@example.com", "x+tag@mail.example.in"] {
            assert!(is_plausible_email(email), "{email} should be plausible");
        }
    }

    #[test]
    fn implausible_emails() {
        for email in [
            "",
            "plain",
            "@example.com",
            "user@",
            "user@localhost",
            "user@.com",
            "user@example.",
            "a@b@c.com",
            "user name@example.com",
        ] {
            assert!(!is_plausible_email(email), "{email} should be rejected");
        }
    }

    #[test]
    fn customer_trims_input() -> TestResult {
        let customer = Customer::new("  Asha ", " asha@example.com ")?;

        assert_eq!(customer.name(), "Asha");
        assert_eq!(customer.email(), "asha@example.com");

        Ok(())
    }

    #[test]
    fn customer_reports_both_fields() {
        let result = Customer::new("", "nope");

        assert_eq!(
            result.map_err(|failed| failed.fields().to_vec()),
            Err(vec![DraftField::CustomerName, DraftField::CustomerEmail])
        );
    }

    #[test]
    fn validation_failed_records_fields_once() {
        let mut failed = ValidationFailed::from(DraftField::Items);
        failed.push(DraftField::Items);

        assert_eq!(failed.fields(), [DraftField::Items]);
    }

    #[test]
    fn validation_failed_message_names_fields() {
        let mut failed = ValidationFailed::from(DraftField::CustomerName);
        failed.push(DraftField::Items);

        assert_eq!(
            failed.to_string(),
            "missing or invalid customer name, items"
        );
    }

    #[test]
    fn validation_failed_is_a_std_error() {
        let error: Box<dyn std::error::Error> =
            Box::new(ValidationFailed::from(DraftField::CustomerEmail));

        assert_eq!(error.to_string(), "missing or invalid customer email");
        assert!(error.source().is_none());
    }

    #[test]
    fn draft_serializes_without_prices() -> TestResult {
        let customer = Customer::new("Asha", "asha@example.com")?;
        let draft = InvoiceDraft::new(
            customer,
            vec![DraftItem::new(ProductId::new(1), Quantity::new(3)?)],
        );

        assert_eq!(
            serde_json::to_value(&draft)?,
            serde_json::json!({
                "customerName": "Asha",
                "customerEmail": "asha@example.com",
                "items": [{ "product": { "id": 1 }, "quantity": 3 }],
            })
        );

        Ok(())
    }
}
