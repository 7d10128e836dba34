//! Dashboard View

use invoicer::dashboard::DashboardStats;
use tracing::warn;

use crate::{context::AppContext, notify::Notification};

/// Headline statistics over the invoice and product lists.
pub struct DashboardView {
    ctx: AppContext,
    stats: DashboardStats,
}

impl DashboardView {
    #[must_use]
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            stats: DashboardStats::default(),
        }
    }

    /// Fetch both lists. Each fetch fails independently and leaves its half of the stats empty.
    pub async fn load(&mut self) -> DashboardStats {
        let mut stats = DashboardStats::default();

        match self.ctx.invoices.list_invoices().await {
            Ok(invoices) => stats = stats.with_invoices(&invoices),
            Err(source) => {
                warn!("failed to load invoices: {source}");

                self.ctx
                    .notifier
                    .notify(Notification::failure("Failed to load invoices"));
            }
        }

        match self.ctx.products.list_products().await {
            Ok(products) => stats = stats.with_products(&products),
            Err(source) => {
                warn!("failed to load products: {source}");

                self.ctx
                    .notifier
                    .notify(Notification::failure("Failed to load products"));
            }
        }

        self.stats = stats;

        stats
    }

    /// Statistics from the last load.
    pub fn stats(&self) -> DashboardStats {
        self.stats
    }
}
