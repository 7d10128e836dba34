//! Test Helpers

use std::sync::Arc;

use invoicer::{
    invoices::{Invoice, InvoiceId, InvoiceLine},
    products::Product,
};
use reqwest::StatusCode;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::{
    client::TransportError,
    context::AppContext,
    domain::{invoices::MockInvoicesService, products::MockProductsService},
    notify::RecordingNotifier,
};

pub(crate) fn pen() -> Product {
    Product::new(1, "Pen", dec!(10))
}

pub(crate) fn notebook() -> Product {
    Product::new(2, "Notebook", dec!(50))
}

pub(crate) fn invoice(id: i64, email: &str, total: Decimal) -> Invoice {
    Invoice {
        id: InvoiceId::new(id),
        customer_name: "Asha Rao".to_string(),
        customer_email: email.to_string(),
        total_amount: total,
        created_at: "2024-11-02T10:15:00".to_string(),
        items: vec![InvoiceLine {
            product: pen(),
            quantity: 2,
        }],
    }
}

pub(crate) fn backend_error(status: StatusCode, body: &str) -> TransportError {
    TransportError::UnexpectedStatus {
        status,
        body: body.to_string(),
    }
}

pub(crate) fn strict_products_mock() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_list_products().never();
    products.expect_create_product().never();
    products.expect_update_product().never();
    products.expect_delete_product().never();

    products
}

pub(crate) fn strict_invoices_mock() -> MockInvoicesService {
    let mut invoices = MockInvoicesService::new();

    invoices.expect_list_invoices().never();
    invoices.expect_create_invoice().never();
    invoices.expect_resend_invoice().never();

    invoices
}

pub(crate) fn context(
    products: MockProductsService,
    invoices: MockInvoicesService,
) -> (AppContext, RecordingNotifier) {
    let notifier = RecordingNotifier::default();

    let ctx = AppContext {
        products: Arc::new(products),
        invoices: Arc::new(invoices),
        notifier: Arc::new(notifier.clone()),
    };

    (ctx, notifier)
}
