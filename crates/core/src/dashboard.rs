//! Dashboard statistics

use rust_decimal::Decimal;
use rustc_hash::FxHashSet;

use crate::{invoices::Invoice, products::Product};

/// Invoice-derived figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvoiceStats {
    /// Sum of every invoice's backend total, `None` if the sum overflows
    pub total_revenue: Option<Decimal>,

    /// Number of invoices
    pub invoice_count: usize,

    /// Number of distinct customer emails
    pub unique_customers: usize,
}

/// Dashboard Stats
///
/// Each half is `None` when the corresponding list could not be fetched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardStats {
    /// Figures derived from the invoice list
    pub invoices: Option<InvoiceStats>,

    /// Number of products in the catalog
    pub product_count: Option<usize>,
}

impl DashboardStats {
    /// Fill the invoice figures from a fetched invoice list.
    #[must_use]
    pub fn with_invoices(mut self, invoices: &[Invoice]) -> Self {
        self.invoices = Some(InvoiceStats::from_invoices(invoices));
        self
    }

    /// Fill the product count from a fetched catalog.
    #[must_use]
    pub fn with_products(mut self, products: &[Product]) -> Self {
        self.product_count = Some(products.len());
        self
    }
}

impl InvoiceStats {
    /// Compute revenue, invoice count and distinct customers.
    pub fn from_invoices(invoices: &[Invoice]) -> Self {
        let customers: FxHashSet<&str> = invoices
            .iter()
            .map(|invoice| invoice.customer_email.as_str())
            .collect();

        Self {
            total_revenue: invoices
                .iter()
                .try_fold(Decimal::ZERO, |total, invoice| {
                    total.checked_add(invoice.total_amount)
                }),
            invoice_count: invoices.len(),
            unique_customers: customers.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use crate::invoices::InvoiceId;

    use super::*;

    fn invoice(id: i64, email: &str, total: Decimal) -> Invoice {
        Invoice {
            id: InvoiceId::new(id),
            customer_name: "Customer".to_string(),
            customer_email: email.to_string(),
            total_amount: total,
            created_at: String::new(),
            items: Vec::new(),
        }
    }

    #[test]
    fn sums_revenue_and_counts_distinct_customers() {
        let invoices = [
            invoice(1, "a@example.com", dec!(100.10)),
            invoice(2, "b@example.com", dec!(0.20)),
            invoice(3, "a@example.com", dec!(49.70)),
        ];

        let stats = InvoiceStats::from_invoices(&invoices);

        assert_eq!(stats.total_revenue, Some(dec!(150)));
        assert_eq!(stats.invoice_count, 3);
        assert_eq!(stats.unique_customers, 2);
    }

    #[test]
    fn overflowing_revenue_is_unavailable() {
        let invoices = [
            invoice(1, "a@example.com", Decimal::MAX),
            invoice(2, "b@example.com", dec!(1)),
        ];

        let stats = InvoiceStats::from_invoices(&invoices);

        assert_eq!(stats.total_revenue, None);
        assert_eq!(stats.invoice_count, 2);
        assert_eq!(stats.unique_customers, 2);
    }

    #[test]
    fn empty_lists_give_zeroes() {
        let stats = DashboardStats::default()
            .with_invoices(&[])
            .with_products(&[]);

        assert_eq!(
            stats.invoices,
            Some(InvoiceStats {
                total_revenue: Some(Decimal::ZERO),
                invoice_count: 0,
                unique_customers: 0,
            })
        );
        assert_eq!(stats.product_count, Some(0));
    }

    #[test]
    fn halves_are_independent() {
        let stats = DashboardStats::default().with_products(&[Product::new(1, "Pen", dec!(10))]);

        assert!(stats.invoices.is_none());
        assert_eq!(stats.product_count, Some(1));
    }
}
