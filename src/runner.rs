use chrono::Utc;
use std::time::Duration;
use tracing::{error, info};

use crate::Result;
use crate::evaluator::evaluate;
use crate::extractor::PriceExtractor;
use crate::fetcher::PageSource;
use crate::models::{Deal, TrackedItem};
use crate::notifier::Notifier;

/// One-shot pass over the tracked-item list: fetch → extract → evaluate per
/// item, then at most one notification. Holds no state across cycles.
pub struct CycleRunner<S, N> {
    items: Vec<TrackedItem>,
    source: S,
    notifier: N,
    extractor: PriceExtractor,
    item_delay: Duration,
}

impl<S: PageSource, N: Notifier> CycleRunner<S, N> {
    pub fn new(
        items: Vec<TrackedItem>,
        source: S,
        notifier: N,
        item_delay: Duration,
    ) -> Result<Self> {
        Ok(Self {
            items,
            source,
            notifier,
            extractor: PriceExtractor::new()?,
            item_delay,
        })
    }

    /// Run one full check cycle. Per-item faults are contained here: a failed
    /// fetch or parse is logged and the remaining items still run. A failed
    /// notification is logged and the cycle still counts as complete.
    pub async fn run_cycle(&self) {
        info!(
            "checking {} item(s) at {}",
            self.items.len(),
            Utc::now().format("%Y-%m-%d %H:%M:%S")
        );

        let mut deals: Vec<Deal> = Vec::new();

        for item in &self.items {
            info!(item = %item.name, target = %item.target_price, "checking item");

            match self.check_item(item).await {
                Ok(Some(deal)) => deals.push(deal),
                Ok(None) => {}
                Err(e) => error!(url = %item.url, error = %e, "error checking item"),
            }

            // Self-throttling between items to avoid rate limiting upstream.
            tokio::time::sleep(self.item_delay).await;
        }

        if deals.is_empty() {
            info!("price check complete, no deals found");
        } else if let Err(e) = self.notifier.notify(&deals).await {
            error!(error = %e, "failed to send price alert");
        }
    }

    async fn check_item(&self, item: &TrackedItem) -> Result<Option<Deal>> {
        let body = self.source.fetch(&item.url).await?;
        let extraction = self.extractor.extract(&body, &item.url)?;

        if let Some(price) = extraction.price {
            info!(item = %item.name, price = %price, "current price");
        }

        Ok(evaluate(item, &extraction))
    }
}
