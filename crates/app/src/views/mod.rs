//! Screens
//!
//! Each view owns its state and reports every outcome through the context's notifier.

pub mod compose;
pub mod dashboard;
pub mod invoices;
pub mod products;

pub use compose::ComposeView;
pub use dashboard::DashboardView;
pub use invoices::InvoicesView;
pub use products::ProductsView;
