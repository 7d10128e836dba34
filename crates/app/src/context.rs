//! App Context

use std::sync::Arc;

use reqwest::{Client, Url};
use thiserror::Error;

use crate::{
    client::ApiClient,
    domain::{
        invoices::{HttpInvoicesService, InvoicesService},
        products::{HttpProductsService, ProductsService},
    },
    notify::Notifier,
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to build http client")]
    HttpClient(#[source] reqwest::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub invoices: Arc<dyn InvoicesService>,
    pub notifier: Arc<dyn Notifier>,
}

impl AppContext {
    /// Build application context for the backend at `api_url`.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be constructed.
    pub fn from_api_url(api_url: &Url, notifier: Arc<dyn Notifier>) -> Result<Self, AppInitError> {
        let http = Client::builder()
            .user_agent(concat!("invoicer/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(AppInitError::HttpClient)?;

        let client = ApiClient::with_client(http, api_url);

        Ok(Self {
            products: Arc::new(HttpProductsService::new(client.clone())),
            invoices: Arc::new(HttpInvoicesService::new(client)),
            notifier,
        })
    }
}
