//! Invoice Composition View
//!
//! Owns the state of one invoice being composed: the catalog to pick from, the cart, the
//! product/quantity inputs and the customer fields. Every cart change goes through the pure
//! [`Cart`] operations; the view only commits the returned cart.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use invoicer::{
    cart::{Cart, CartError, Quantity, QuantityError},
    draft::ValidationFailed,
    products::{Product, ProductId, find_product},
};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    context::AppContext,
    domain::{invoices::InvoicesServiceError, products::ProductsServiceError},
    notify::Notification,
};

/// Errors raised when adding the selected product to the cart.
#[derive(Debug, Error)]
pub enum AddItemError {
    /// No product is selected.
    #[error("no product selected")]
    NoProductSelected,

    /// The selected product is not in the loaded catalog.
    #[error("product {0} is not in the catalog")]
    UnknownProduct(ProductId),

    /// The quantity input is not a positive integer.
    #[error(transparent)]
    Quantity(#[from] QuantityError),

    /// The cart could not take the line.
    #[error(transparent)]
    Cart(#[from] CartError),
}

/// Errors raised when submitting the invoice.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The form is incomplete; nothing was sent.
    #[error(transparent)]
    Validation(#[from] ValidationFailed),

    /// A submission is already outstanding.
    #[error("an invoice submission is already in flight")]
    InFlight,

    /// The backend rejected the invoice; the cart is kept for another attempt.
    #[error("failed to create invoice")]
    Service(#[from] InvoicesServiceError),
}

/// Marks a submission as in flight until dropped.
#[derive(Debug)]
struct InFlightGuard(Arc<AtomicBool>);

impl InFlightGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(Arc::clone(flag)))
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Invoice composition state.
pub struct ComposeView {
    ctx: AppContext,
    catalog: Vec<Product>,
    cart: Cart,
    selected_product: Option<ProductId>,
    quantity: i64,
    customer_name: String,
    customer_email: String,
    in_flight: Arc<AtomicBool>,
}

impl ComposeView {
    #[must_use]
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            catalog: Vec::new(),
            cart: Cart::new(),
            selected_product: None,
            quantity: 1,
            customer_name: String::new(),
            customer_email: String::new(),
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Load the catalog products can be picked from.
    ///
    /// # Errors
    ///
    /// Returns the service error; the previous catalog is kept.
    pub async fn load_catalog(&mut self) -> Result<&[Product], ProductsServiceError> {
        match self.ctx.products.list_products().await {
            Ok(products) => {
                self.catalog = products;

                Ok(&self.catalog)
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

    /// Catalog products can be picked from.
    pub fn catalog(&self) -> &[Product] {
        &self.catalog
    }

    /// The cart being composed.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Grand total of the cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::AmountOverflow`] if the total cannot be represented.
    pub fn total(&self) -> Result<Decimal, CartError> {
        self.cart.total_amount()
    }

    /// Choose the product the next [`ComposeView::add_selected`] adds.
    pub fn select_product(&mut self, product: Option<ProductId>) {
        self.selected_product = product;
    }

    /// The product currently selected.
    pub fn selected_product(&self) -> Option<ProductId> {
        self.selected_product
    }

    /// Set the raw quantity input.
    pub fn set_quantity(&mut self, quantity: i64) {
        self.quantity = quantity;
    }

    /// The raw quantity input; one by default.
    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Set the customer name input.
    pub fn set_customer_name(&mut self, name: impl Into<String>) {
        self.customer_name = name.into();
    }

    /// Set the customer email input.
    pub fn set_customer_email(&mut self, email: impl Into<String>) {
        self.customer_email = email.into();
    }

    /// Customer name input
    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    /// Customer email input
    pub fn customer_email(&self) -> &str {
        &self.customer_email
    }

    /// Shared handle on the in-flight flag, for renderers that disable submission.
    pub fn in_flight(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.in_flight)
    }

    /// Whether a submission is outstanding.
    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Add the selected product with the entered quantity, merging with an existing line.
    ///
    /// On success the selection is cleared and the quantity reset to one. On failure the cart
    /// and inputs are left as they were.
    ///
    /// # Errors
    ///
    /// Returns an [`AddItemError`] when no known product is selected, the quantity is not
    /// positive, or the line would overflow.
    pub fn add_selected(&mut self) -> Result<&Cart, AddItemError> {
        match self.try_add_selected() {
            Ok(cart) => {
                self.cart = cart;
                self.selected_product = None;
                self.quantity = 1;

                Ok(&self.cart)
            }
            Err(error) => {
                let description = match &error {
                    AddItemError::Cart(source) => source.to_string(),
                    AddItemError::NoProductSelected
                    | AddItemError::UnknownProduct(_)
                    | AddItemError::Quantity(_) => {
                        "Please select a product and enter a valid quantity".to_string()
                    }
                };

                self.ctx.notifier.notify(Notification::error(description));

                Err(error)
            }
        }
    }

    fn try_add_selected(&self) -> Result<Cart, AddItemError> {
        let product_id = self
            .selected_product
            .ok_or(AddItemError::NoProductSelected)?;

        let quantity = Quantity::new(self.quantity)?;

        let product = find_product(&self.catalog, product_id)
            .ok_or(AddItemError::UnknownProduct(product_id))?;

        Ok(self.cart.add_item(product, quantity)?)
    }

    /// Remove a product's line from the cart.
    pub fn remove(&mut self, product: ProductId) -> &Cart {
        self.cart = self.cart.remove_item(product);

        &self.cart
    }

    /// Abandon the invoice: empty the cart and reset every input.
    pub fn clear(&mut self) {
        self.cart = Cart::new();
        self.selected_product = None;
        self.quantity = 1;
        self.customer_name.clear();
        self.customer_email.clear();
    }

    /// Submit the invoice.
    ///
    /// Nothing is sent while another submission is in flight or when the form is incomplete.
    /// On success the customer fields and the cart are cleared; on failure everything is kept.
    ///
    /// # Errors
    ///
    /// Returns a [`SubmitError`] describing why the invoice was not created.
    pub async fn submit(&mut self) -> Result<(), SubmitError> {
        let Some(guard) = InFlightGuard::acquire(&self.in_flight) else {
            warn!("invoice submission already in flight");

            return Err(SubmitError::InFlight);
        };

        let draft = self
            .cart
            .to_draft(&self.customer_name, &self.customer_email)
            .inspect_err(|failed| {
                warn!("invoice draft rejected: {failed}");

                self.ctx.notifier.notify(Notification::error(
                    "Please fill in all required fields and add at least one item",
                ));
            })?;

        let result = self.ctx.invoices.create_invoice(draft).await;

        drop(guard);

        match result {
            Ok(()) => {
                info!(lines = self.cart.len(), "invoice submitted");

                self.customer_name.clear();
                self.customer_email.clear();
                self.cart = Cart::new();

                self.ctx.notifier.notify(Notification::success(
                    "Invoice created and emailed successfully!",
                ));

                Ok(())
            }
            Err(source) => {
                let reason = source
                    .backend_message()
                    .map_or_else(|| source.to_string(), str::to_string);

                self.ctx.notifier.notify(Notification::error(format!(
                    "Failed to create invoice: {reason}"
                )));

                Err(source.into())
            }
        }
    }
}
