//! Invoicer Backend Gateway

pub mod invoices;
pub mod products;
