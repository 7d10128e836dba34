//! Invoices service errors.

use invoicer::invoices::InvoiceId;
use thiserror::Error;

use crate::client::TransportError;

#[derive(Debug, Error)]
pub enum InvoicesServiceError {
    #[error("invoice {0} not found")]
    NotFound(InvoiceId, #[source] TransportError),

    #[error("backend request failed")]
    Transport(#[from] TransportError),
}

impl InvoicesServiceError {
    pub(crate) fn for_invoice(invoice: InvoiceId, error: TransportError) -> Self {
        match error {
            TransportError::UnexpectedStatus { status, .. } if status.as_u16() == 404 => {
                Self::NotFound(invoice, error)
            }
            error => Self::Transport(error),
        }
    }

    /// The backend's response text, when it sent any.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            Self::NotFound(_, error) | Self::Transport(error) => error.backend_message(),
        }
    }
}
