//! Products service.

use async_trait::async_trait;
use invoicer::products::{NewProduct, Product, ProductId};
use mockall::automock;
use reqwest::Method;
use tracing::info;

use crate::{client::ApiClient, domain::products::errors::ProductsServiceError};

#[derive(Debug, Clone)]
pub struct HttpProductsService {
    client: ApiClient,
}

impl HttpProductsService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProductsService for HttpProductsService {
    #[tracing::instrument(name = "products.service.list_products", skip(self), err)]
    async fn list_products(&self) -> Result<Vec<Product>, ProductsServiceError> {
        let products: Vec<Product> = self
            .client
            .fetch_json(self.client.request(Method::GET, "/products"))
            .await?;

        Ok(products)
    }

    #[tracing::instrument(
        name = "products.service.create_product",
        skip(self, product),
        fields(product_name = %product.name),
        err
    )]
    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError> {
        let created: Product = self
            .client
            .fetch_json(self.client.request(Method::POST, "/products").json(&product))
            .await?;

        info!(product_id = %created.id, "created product");

        Ok(created)
    }

    #[tracing::instrument(
        name = "products.service.update_product",
        skip(self, product),
        fields(product_id = %product.id),
        err
    )]
    async fn update_product(&self, product: Product) -> Result<(), ProductsServiceError> {
        let path = format!("/products/{}", product.id);

        self.client
            .execute(self.client.request(Method::PUT, &path).json(&product))
            .await
            .map_err(|error| ProductsServiceError::for_product(product.id, error))?;

        info!(product_id = %product.id, "updated product");

        Ok(())
    }

    #[tracing::instrument(
        name = "products.service.delete_product",
        skip(self),
        fields(product_id = %product),
        err
    )]
    async fn delete_product(&self, product: ProductId) -> Result<(), ProductsServiceError> {
        let path = format!("/products/{product}");

        self.client
            .execute(self.client.request(Method::DELETE, &path))
            .await
            .map_err(|error| ProductsServiceError::for_product(product, error))?;

        info!(product_id = %product, "deleted product");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves the product catalog.
    async fn list_products(&self) -> Result<Vec<Product>, ProductsServiceError>;

    /// Creates a product; the backend assigns its identifier.
    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError>;

    /// Replaces a product's name and price.
    async fn update_product(&self, product: Product) -> Result<(), ProductsServiceError>;

    /// Deletes a product.
    async fn delete_product(&self, product: ProductId) -> Result<(), ProductsServiceError>;
}
