//! Invoicer
//!
//! Invoicer is the domain core of an invoice dashboard: a product catalog, a cart of line items
//! reconciled by product, and the draft payload submitted to the invoice backend.

pub mod cart;
pub mod dashboard;
pub mod draft;
pub mod invoices;
pub mod money;
pub mod products;
