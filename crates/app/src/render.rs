//! Terminal rendering

use std::{io, ops::Range};

use invoicer::{
    cart::Cart,
    dashboard::DashboardStats,
    invoices::Invoice,
    money::format_amount,
    products::Product,
};
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

/// Errors that can occur when rendering output.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Writing to the output failed.
    #[error("failed to write output")]
    Io(#[from] io::Error),

    /// A cart total could not be represented.
    #[error(transparent)]
    Cart(#[from] invoicer::cart::CartError),
}

const UNAVAILABLE: &str = "unavailable";

fn write_table(
    out: &mut impl io::Write,
    builder: Builder,
    numeric: Columns<Range<usize>>,
) -> Result<(), RenderError> {
    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(numeric, Alignment::right());

    writeln!(out, "{table}")?;

    Ok(())
}

/// Render the product catalog.
///
/// # Errors
///
/// Returns an error when the output cannot be written.
pub fn write_products(mut out: impl io::Write, products: &[Product]) -> Result<(), RenderError> {
    let mut builder = Builder::default();

    builder.push_record(["ID", "Name", "Price"]);

    for product in products {
        builder.push_record([
            product.id.to_string(),
            product.name.clone(),
            format_amount(product.price),
        ]);
    }

    write_table(&mut out, builder, Columns::new(2..3))
}

/// Render the invoice list.
///
/// # Errors
///
/// Returns an error when the output cannot be written.
pub fn write_invoices(mut out: impl io::Write, invoices: &[Invoice]) -> Result<(), RenderError> {
    let mut builder = Builder::default();

    builder.push_record(["Invoice ID", "Customer Name", "Email", "Total Amount", "Date"]);

    for invoice in invoices {
        builder.push_record([
            invoice.id.to_string(),
            invoice.customer_name.clone(),
            invoice.customer_email.clone(),
            format_amount(invoice.total_amount),
            invoice.created_at.clone(),
        ]);
    }

    write_table(&mut out, builder, Columns::new(3..4))
}

/// Render one invoice with its lines.
///
/// # Errors
///
/// Returns an error when the output cannot be written.
pub fn write_invoice(mut out: impl io::Write, invoice: &Invoice) -> Result<(), RenderError> {
    writeln!(out, "Invoice {}", invoice.id)?;
    writeln!(
        out,
        "Customer: {} <{}>",
        invoice.customer_name, invoice.customer_email
    )?;
    writeln!(out, "Date: {}", invoice.created_at)?;

    let mut builder = Builder::default();

    builder.push_record(["Product", "Quantity", "Unit Price", "Line Total"]);

    for line in &invoice.items {
        builder.push_record([
            line.product.name.clone(),
            line.quantity.to_string(),
            format_amount(line.product.price),
            line.line_total()
                .map_or_else(|| UNAVAILABLE.to_string(), format_amount),
        ]);
    }

    write_table(&mut out, builder, Columns::new(1..4))?;

    writeln!(out, "Total: {}", format_amount(invoice.total_amount))?;

    Ok(())
}

/// Render a cart and its grand total.
///
/// # Errors
///
/// Returns an error when the output cannot be written or the total overflows.
pub fn write_cart(mut out: impl io::Write, cart: &Cart) -> Result<(), RenderError> {
    let mut builder = Builder::default();

    builder.push_record(["Product", "Quantity", "Unit Price", "Line Total"]);

    for item in cart {
        builder.push_record([
            item.product().name.clone(),
            item.quantity().get().to_string(),
            format_amount(item.product().price),
            format_amount(item.line_total()),
        ]);
    }

    write_table(&mut out, builder, Columns::new(1..4))?;

    writeln!(out, "Total: {}", format_amount(cart.total_amount()?))?;

    Ok(())
}

/// Render the dashboard statistics.
///
/// # Errors
///
/// Returns an error when the output cannot be written.
pub fn write_dashboard(mut out: impl io::Write, stats: &DashboardStats) -> Result<(), RenderError> {
    let invoices = stats.invoices;

    let revenue = invoices
        .and_then(|s| s.total_revenue)
        .map(format_amount);
    let invoice_count = invoices.map(|s| s.invoice_count.to_string());
    let customers = invoices.map(|s| s.unique_customers.to_string());
    let products = stats.product_count.map(|count| count.to_string());

    let mut builder = Builder::default();

    for (label, value) in [
        ("Total Revenue", revenue),
        ("Active Invoices", invoice_count),
        ("Products", products),
        ("Customers", customers),
    ] {
        builder.push_record([
            label.to_string(),
            value.unwrap_or_else(|| UNAVAILABLE.to_string()),
        ]);
    }

    write_table(&mut out, builder, Columns::new(1..2))
}
