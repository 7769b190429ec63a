use rust_decimal::Decimal;
use scraper::{Html, Selector};
use std::str::FromStr;
use tracing::warn;
use url::Url;

use crate::models::{Extraction, UNKNOWN_PRODUCT};
use crate::{AppError, Result};

/// Class marker on the offscreen/display price node.
const PRICE_SELECTOR: &str = ".a-offscreen";
/// Id marker on the product title node.
const TITLE_SELECTOR: &str = "#productTitle";

pub struct PriceExtractor {
    price_selector: Selector,
    title_selector: Selector,
}

impl PriceExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            price_selector: parse_selector(PRICE_SELECTOR)?,
            title_selector: parse_selector(TITLE_SELECTOR)?,
        })
    }

    /// Locate and parse the price and title in a fetched page.
    ///
    /// A missing price element is not an error: it yields an absent price
    /// (with a warning) and skips title extraction entirely. Price text that
    /// is present but unparseable after currency stripping is an error, to be
    /// contained at the per-item boundary. A missing title element falls back
    /// to the [`UNKNOWN_PRODUCT`] sentinel.
    pub fn extract(&self, html: &str, url: &Url) -> Result<Extraction> {
        let document = Html::parse_document(html);

        let Some(price_element) = document.select(&self.price_selector).next() else {
            warn!(%url, selector = PRICE_SELECTOR, "could not find price element");
            return Ok(Extraction::default());
        };

        let price_text = price_element.text().collect::<String>();
        let price = parse_price(&price_text)?;

        let title = match document.select(&self.title_selector).next() {
            Some(element) => element.text().collect::<String>().trim().to_string(),
            None => {
                warn!(%url, selector = TITLE_SELECTOR, "could not find title element");
                UNKNOWN_PRODUCT.to_string()
            }
        };

        Ok(Extraction {
            price: Some(price),
            title: Some(title),
        })
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| AppError::Selector {
        selector: selector.to_string(),
        message: format!("{e:?}"),
    })
}

/// Strip known currency symbols and thousands separators. Idempotent.
pub fn strip_currency(text: &str) -> String {
    text.replace('$', "")
        .replace("INR", "")
        .replace('₹', "")
        .replace(',', "")
        .trim()
        .to_string()
}

/// Strip currency markers and parse the remainder as a decimal price.
pub fn parse_price(text: &str) -> Result<Decimal> {
    let cleaned = strip_currency(text);
    Decimal::from_str(&cleaned).map_err(|_| AppError::PriceParse {
        text: text.trim().to_string(),
    })
}
