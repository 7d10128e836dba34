//! Invoices View

use invoicer::invoices::{Invoice, InvoiceId};
use tracing::warn;

use crate::{
    context::AppContext, domain::invoices::InvoicesServiceError, notify::Notification,
};

/// The invoice list and the invoice selected for detail.
pub struct InvoicesView {
    ctx: AppContext,
    invoices: Vec<Invoice>,
    selected: Option<InvoiceId>,
}

impl InvoicesView {
    #[must_use]
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            invoices: Vec::new(),
            selected: None,
        }
    }

    /// Invoices from the last successful load.
    pub fn invoices(&self) -> &[Invoice] {
        &self.invoices
    }

    /// Replace the list with the backend's.
    ///
    /// # Errors
    ///
    /// Returns the service error; the previous list is kept.
    pub async fn load(&mut self) -> Result<&[Invoice], InvoicesServiceError> {
        match self.ctx.invoices.list_invoices().await {
            Ok(invoices) => {
                self.invoices = invoices;

                Ok(&self.invoices)
            }
            Err(source) => {
                warn!("failed to load invoices: {source}");

                self.ctx.notifier.notify(Notification {
                    description: Some("Could not fetch invoices from server".to_string()),
                    ..Notification::failure("Failed to Load")
                });

                Err(source)
            }
        }
    }

    /// Select an invoice for the detail view. Unknown identifiers clear the selection.
    pub fn select(&mut self, invoice: InvoiceId) -> Option<&Invoice> {
        self.selected = Invoice::find(&self.invoices, invoice).map(|found| found.id);

        self.selected()
    }

    /// The invoice shown in the detail view.
    pub fn selected(&self) -> Option<&Invoice> {
        self.selected
            .and_then(|invoice| Invoice::find(&self.invoices, invoice))
    }

    /// Ask the backend to email an invoice again.
    ///
    /// # Errors
    ///
    /// Returns the service error after notifying the failure.
    pub async fn resend(&self, invoice: InvoiceId) -> Result<(), InvoicesServiceError> {
        match self.ctx.invoices.resend_invoice(invoice).await {
            Ok(()) => {
                self.ctx.notifier.notify(Notification::success(format!(
                    "Invoice {invoice} resent successfully!"
                )));

                Ok(())
            }
            Err(source) => {
                self.ctx.notifier.notify(Notification::error(format!(
                    "Failed to resend invoice {invoice}"
                )));

                Err(source)
            }
        }
    }
}
