//! Invoices

pub mod errors;
pub mod service;

pub use errors::InvoicesServiceError;
pub use service::*;
