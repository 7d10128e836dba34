//! Products service errors.

use invoicer::products::ProductId;
use thiserror::Error;

use crate::client::TransportError;

#[derive(Debug, Error)]
pub enum ProductsServiceError {
    #[error("product {0} not found")]
    NotFound(ProductId, #[source] TransportError),

    #[error("backend request failed")]
    Transport(#[from] TransportError),
}

impl ProductsServiceError {
    /// Classify a failed request against a single product.
    pub(crate) fn for_product(product: ProductId, error: TransportError) -> Self {
        match error {
            TransportError::UnexpectedStatus { status, .. } if status.as_u16() == 404 => {
                Self::NotFound(product, error)
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

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use super::*;

    fn status(status: StatusCode, body: &str) -> TransportError {
        TransportError::UnexpectedStatus {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn not_found_status_names_the_product() {
        let error = ProductsServiceError::for_product(
            ProductId::new(7),
            status(StatusCode::NOT_FOUND, "no such product"),
        );

        assert!(
            matches!(error, ProductsServiceError::NotFound(id, _) if id == ProductId::new(7)),
            "unexpected error {error:?}"
        );
        assert_eq!(error.backend_message(), Some("no such product"));
    }

    #[test]
    fn other_statuses_stay_transport_errors() {
        let error = ProductsServiceError::for_product(
            ProductId::new(7),
            status(StatusCode::BAD_REQUEST, "in use"),
        );

        assert!(
            matches!(error, ProductsServiceError::Transport(_)),
            "unexpected error {error:?}"
        );
    }
}
