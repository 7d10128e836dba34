//! Invoices service.

use async_trait::async_trait;
use invoicer::{
    draft::InvoiceDraft,
    invoices::{Invoice, InvoiceId},
};
use mockall::automock;
use reqwest::Method;
use tracing::info;

use crate::{client::ApiClient, domain::invoices::errors::InvoicesServiceError};

#[derive(Debug, Clone)]
pub struct HttpInvoicesService {
    client: ApiClient,
}

impl HttpInvoicesService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl InvoicesService for HttpInvoicesService {
    #[tracing::instrument(name = "invoices.service.list_invoices", skip(self), err)]
    async fn list_invoices(&self) -> Result<Vec<Invoice>, InvoicesServiceError> {
        let invoices: Vec<Invoice> = self
            .client
            .fetch_json(self.client.request(Method::GET, "/invoices"))
            .await?;

        Ok(invoices)
    }

    #[tracing::instrument(
        name = "invoices.service.create_invoice",
        skip(self, draft),
        fields(item_count = draft.items().len()),
        err
    )]
    async fn create_invoice(&self, draft: InvoiceDraft) -> Result<(), InvoicesServiceError> {
        self.client
            .execute(self.client.request(Method::POST, "/invoice").json(&draft))
            .await?;

        info!(customer_email = draft.customer_email(), "created invoice");

        Ok(())
    }

    #[tracing::instrument(
        name = "invoices.service.resend_invoice",
        skip(self),
        fields(invoice_id = invoice.get()),
        err
    )]
    async fn resend_invoice(&self, invoice: InvoiceId) -> Result<(), InvoicesServiceError> {
        let path = format!("/invoices/{}/resend", invoice.get());

        self.client
            .execute(self.client.request(Method::POST, &path))
            .await
            .map_err(|error| InvoicesServiceError::for_invoice(invoice, error))?;

        info!(invoice_id = invoice.get(), "resent invoice email");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait InvoicesService: Send + Sync {
    /// Retrieves every invoice.
    async fn list_invoices(&self) -> Result<Vec<Invoice>, InvoicesServiceError>;

    /// Submits a draft; the backend prices, stores and emails the invoice.
    async fn create_invoice(&self, draft: InvoiceDraft) -> Result<(), InvoicesServiceError>;

    /// Asks the backend to email an existing invoice again.
    async fn resend_invoice(&self, invoice: InvoiceId) -> Result<(), InvoicesServiceError>;
}

#[cfg(test)]
mod tests {
    use invoicer::{
        cart::{Cart, Quantity},
        products::Product,
    };
    use reqwest::Url;
    use rust_decimal_macros::dec;
    use serde_json::json;
    use testresult::TestResult;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_json, method, path},
    };

    use super::*;

    fn service(server: &MockServer) -> TestResult<HttpInvoicesService> {
        let base = Url::parse(&server.uri())?;

        Ok(HttpInvoicesService::new(ApiClient::new(&base)))
    }

    #[tokio::test]
    async fn list_invoices_decodes_backend_shape() -> TestResult {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/invoices"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "id": 5,
                "customerName": "Asha Rao",
                "customerEmail": "asha@example.com",
                "totalAmount": 140,
                "createdAt": "2024-11-02T10:15:00",
                "items": [{ "product": { "id": 1, "name": "Pen", "price": 10 }, "quantity": 14 }]
            }])))
            .mount(&server)
            .await;

        let invoices = service(&server)?.list_invoices().await?;

        assert_eq!(invoices.len(), 1);
        assert_eq!(
            invoices.first().map(|invoice| invoice.total_amount),
            Some(dec!(140))
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_invoice_sends_ids_and_quantities_only() -> TestResult {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/invoice"))
            .and(body_json(json!({
                "customerName": "Asha Rao",
                "customerEmail": "asha@example.com",
                "items": [{ "product": { "id": 1 }, "quantity": 3 }],
            })))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let draft = Cart::new()
            .add_item(&Product::new(1, "Pen", dec!(10)), Quantity::new(3)?)?
            .to_draft("Asha Rao", "asha@example.com")?;

        service(&server)?.create_invoice(draft).await?;

        Ok(())
    }

    #[tokio::test]
    async fn create_invoice_failure_keeps_backend_text() -> TestResult {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/invoice"))
            .respond_with(ResponseTemplate::new(500).set_body_string("SMTP unavailable"))
            .mount(&server)
            .await;

        let draft = Cart::new()
            .add_item(&Product::new(1, "Pen", dec!(10)), Quantity::ONE)?
            .to_draft("Asha Rao", "asha@example.com")?;

        let result = service(&server)?.create_invoice(draft).await;

        assert_eq!(
            result.as_ref().err().and_then(InvoicesServiceError::backend_message),
            Some("SMTP unavailable")
        );

        Ok(())
    }

    #[tokio::test]
    async fn resend_posts_to_invoice_path() -> TestResult {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/invoices/12/resend"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        service(&server)?.resend_invoice(InvoiceId::new(12)).await?;

        Ok(())
    }
}
