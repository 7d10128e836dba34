//! Backend HTTP client.

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when talking to the invoice backend.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request could not be sent or the response body could not be read.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status.
    #[error("backend responded with status {status}: {body}")]
    UnexpectedStatus {
        /// Response status
        status: StatusCode,

        /// Response body text, as sent
        body: String,
    },
}

impl TransportError {
    /// The backend's response text, when it sent any.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            Self::UnexpectedStatus { body, .. } if !body.trim().is_empty() => Some(body.trim()),
            Self::UnexpectedStatus { .. } | Self::Http(_) => None,
        }
    }
}

/// HTTP client rooted at the backend's base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base: String,
}

impl ApiClient {
    /// Create a client for the backend at `base`.
    #[must_use]
    pub fn new(base: &Url) -> Self {
        Self::with_client(Client::new(), base)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    #[must_use]
    pub fn with_client(http: Client, base: &Url) -> Self {
        Self {
            http,
            base: base.as_str().trim_end_matches('/').to_string(),
        }
    }

    /// Absolute URL of a backend path such as `/products/3`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base, path.trim_start_matches('/'))
    }

    /// Start a request to a backend path.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, self.endpoint(path))
    }

    /// Send a request, turning non-2xx responses into [`TransportError::UnexpectedStatus`].
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-2xx status.
    pub async fn execute(&self, request: RequestBuilder) -> Result<Response, TransportError> {
        let response = request.send().await?;
        let status = response.status();

        debug!(url = %response.url(), %status, "backend responded");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();

            return Err(TransportError::UnexpectedStatus { status, body });
        }

        Ok(response)
    }

    /// Send a request and decode its JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-2xx status or an undecodable body.
    pub async fn fetch_json<T>(&self, request: RequestBuilder) -> Result<T, TransportError>
    where
        T: DeserializeOwned,
    {
        Ok(self.execute(request).await?.json().await?)
    }
}
