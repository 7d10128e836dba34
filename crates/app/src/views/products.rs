//! Products View

use invoicer::products::{NewProduct, Product, ProductId, ProductValidationError};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::warn;

use crate::{
    context::AppContext, domain::products::ProductsServiceError, notify::Notification,
};

/// Errors that can occur while managing the catalog.
#[derive(Debug, Error)]
pub enum ProductActionError {
    /// The product form was rejected before any request was made.
    #[error(transparent)]
    Invalid(#[from] ProductValidationError),

    /// The backend request failed.
    #[error(transparent)]
    Service(#[from] ProductsServiceError),
}

/// The product catalog and its mutations.
pub struct ProductsView {
    ctx: AppContext,
    products: Vec<Product>,
}

impl ProductsView {
    #[must_use]
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            products: Vec::new(),
        }
    }

    /// Current catalog, in backend order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Replace the catalog with the backend's.
    ///
    /// # Errors
    ///
    /// Returns the service error; the previous catalog is kept.
    pub async fn load(&mut self) -> Result<&[Product], ProductsServiceError> {
        match self.ctx.products.list_products().await {
            Ok(products) => {
                self.products = products;

                Ok(&self.products)
            }
            Err(source) => {
                warn!("failed to load products: {source}");

                self.ctx
                    .notifier
                    .notify(Notification::error("Failed to load products from server"));

                Err(source)
            }
        }
    }

    /// Create a product and append the backend's copy to the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`ProductActionError::Invalid`] without a request when the name is blank or the
    /// price is not positive, or [`ProductActionError::Service`] when the backend rejects it.
    pub async fn add(&mut self, name: &str, price: Decimal) -> Result<Product, ProductActionError> {
        let product = NewProduct::new(name, price).inspect_err(|_| {
            self.ctx.notifier.notify(Notification::error(
                "Please fill in all fields with valid values",
            ));
        })?;

        match self.ctx.products.create_product(product).await {
            Ok(created) => {
                self.products.push(created.clone());

                self.ctx
                    .notifier
                    .notify(Notification::success("Product added successfully"));

                Ok(created)
            }
            Err(source) => {
                self.ctx
                    .notifier
                    .notify(Notification::error("Failed to add product"));

                Err(source.into())
            }
        }
    }

    /// Update a product, then reload the whole catalog.
    ///
    /// # Errors
    ///
    /// Returns [`ProductActionError::Invalid`] for a blank name or non-positive price, or
    /// [`ProductActionError::Service`] when the update or the reload fails.
    pub async fn edit(&mut self, product: Product) -> Result<(), ProductActionError> {
        let validated = NewProduct::new(&product.name, product.price).inspect_err(|_| {
            self.ctx.notifier.notify(Notification::error(
                "Please fill in all fields with valid values",
            ));
        })?;

        let product = Product::new(product.id, validated.name, validated.price);

        if let Err(source) = self.ctx.products.update_product(product).await {
            self.ctx
                .notifier
                .notify(Notification::error("Failed to update product"));

            return Err(source.into());
        }

        self.load().await?;

        self.ctx
            .notifier
            .notify(Notification::success("Product updated successfully"));

        Ok(())
    }

    /// Delete a product. It leaves the catalog only once the backend confirms.
    ///
    /// # Errors
    ///
    /// Returns the service error; the catalog is unchanged.
    pub async fn delete(&mut self, product: ProductId) -> Result<(), ProductsServiceError> {
        if let Err(source) = self.ctx.products.delete_product(product).await {
            let message = source.backend_message().unwrap_or("Failed to delete product");

            self.ctx.notifier.notify(Notification::error(message));

            return Err(source);
        }

        self.products.retain(|existing| existing.id != product);

        self.ctx
            .notifier
            .notify(Notification::success("Product deleted successfully"));

        Ok(())
    }
}
