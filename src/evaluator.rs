use tracing::info;

use crate::models::{Deal, Extraction, TrackedItem, UNKNOWN_PRODUCT};

/// Classify one extraction against its item's target price.
///
/// A present price strictly below the target produces a deal titled with the
/// extracted page title, unless that title is the sentinel fallback, in which
/// case the configured item name is used. An absent price produces nothing.
/// A present price at or above target produces nothing but logs the shortfall.
pub fn evaluate(item: &TrackedItem, extraction: &Extraction) -> Option<Deal> {
    let price = extraction.price?;

    if price < item.target_price {
        info!(item = %item.name, price = %price, "deal found, price is below target");
        let title = match extraction.title.as_deref() {
            Some(title) if title != UNKNOWN_PRODUCT => title.to_string(),
            _ => item.name.clone(),
        };
        Some(Deal {
            title,
            current_price: price,
            target_price: item.target_price,
            url: item.url.clone(),
        })
    } else {
        info!(
            item = %item.name,
            shortfall = %(price - item.target_price),
            "no deal yet, price is above target"
        );
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use url::Url;

    fn item(target: &str) -> TrackedItem {
        TrackedItem {
            name: "Instant Pot Duo Plus".to_string(),
            url: Url::parse("https://www.amazon.com/dp/B075CYMYK6").unwrap(),
            target_price: Decimal::from_str(target).unwrap(),
        }
    }

    fn extraction(price: &str, title: &str) -> Extraction {
        Extraction {
            price: Some(Decimal::from_str(price).unwrap()),
            title: Some(title.to_string()),
        }
    }

    #[test]
    fn test_price_below_target_produces_deal() {
        let deal = evaluate(&item("8000"), &extraction("7999.99", "Instant Pot")).unwrap();

        assert_eq!(deal.current_price, Decimal::from_str("7999.99").unwrap());
        assert_eq!(deal.target_price, Decimal::from_str("8000").unwrap());
        assert_eq!(deal.savings(), Decimal::from_str("0.01").unwrap());
    }

    #[test]
    fn test_price_at_target_is_no_deal() {
        assert!(evaluate(&item("8000"), &extraction("8000.00", "Instant Pot")).is_none());
    }

    #[test]
    fn test_price_above_target_is_no_deal() {
        assert!(evaluate(&item("8000"), &extraction("9499.00", "Instant Pot")).is_none());
    }

    #[test]
    fn test_absent_price_is_no_deal() {
        assert!(evaluate(&item("8000"), &Extraction::default()).is_none());
    }

    #[test]
    fn test_deal_uses_extracted_title() {
        let deal = evaluate(&item("8000"), &extraction("7500", "Instant Pot Duo Plus 9-in-1"))
            .unwrap();
        assert_eq!(deal.title, "Instant Pot Duo Plus 9-in-1");
    }

    #[test]
    fn test_sentinel_title_falls_back_to_item_name() {
        let deal = evaluate(&item("8000"), &extraction("7500", UNKNOWN_PRODUCT)).unwrap();
        assert_eq!(deal.title, "Instant Pot Duo Plus");
    }

    #[test]
    fn test_missing_title_falls_back_to_item_name() {
        let ext = Extraction {
            price: Some(Decimal::from_str("7500").unwrap()),
            title: None,
        };
        let deal = evaluate(&item("8000"), &ext).unwrap();
        assert_eq!(deal.title, "Instant Pot Duo Plus");
    }
}
