use rust_decimal::Decimal;
use url::Url;

/// Fallback title used when a product page has no recognizable title element.
/// Deals never display this value; they fall back to the configured item name.
pub const UNKNOWN_PRODUCT: &str = "Unknown Product";

/// One product/price-target pair under monitoring. Built once at startup,
/// immutable for the process lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedItem {
    pub name: String,
    pub url: Url,
    pub target_price: Decimal,
}

/// Result of one extraction attempt against a fetched page.
///
/// An absent price means the price element was not found; in that case title
/// extraction is skipped too, so `title` is also `None`. A present price comes
/// with a title that is either the page's or the [`UNKNOWN_PRODUCT`] fallback.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    pub price: Option<Decimal>,
    pub title: Option<String>,
}

/// A tracked item whose observed price fell strictly below its target.
/// Collected per cycle, discarded after notification.
#[derive(Debug, Clone, PartialEq)]
pub struct Deal {
    pub title: String,
    pub current_price: Decimal,
    pub target_price: Decimal,
    pub url: Url,
}

impl Deal {
    /// Amount saved relative to the target. Non-negative by construction,
    /// since a deal requires `current_price < target_price`.
    pub fn savings(&self) -> Decimal {
        self.target_price - self.current_price
    }
}
