use async_trait::async_trait;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use dealwatch::config::FetcherConfig;
use dealwatch::fetcher::PageFetcher;
use dealwatch::models::{Deal, TrackedItem};
use dealwatch::notifier::{Notifier, format_body};
use dealwatch::runner::CycleRunner;

/// Shares its call log so a clone can go into the runner while the test
/// keeps a handle for assertions.
#[derive(Clone, Default)]
struct RecordingNotifier {
    calls: Arc<Mutex<Vec<Vec<Deal>>>>,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, deals: &[Deal]) -> dealwatch::Result<()> {
        self.calls.lock().unwrap().push(deals.to_vec());
        Ok(())
    }
}

fn product_page(title: &str, price: &str) -> String {
    format!(
        r#"<html><body>
            <span id="productTitle">{title}</span>
            <span class="a-offscreen">{price}</span>
        </body></html>"#
    )
}

fn tracked_item(server: &MockServer, name: &str, item_path: &str, target: &str) -> TrackedItem {
    TrackedItem {
        name: name.to_string(),
        url: Url::parse(&format!("{}{item_path}", server.uri())).unwrap(),
        target_price: Decimal::from_str(target).unwrap(),
    }
}

async fn mount_page(server: &MockServer, item_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(item_path))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

fn runner(
    items: Vec<TrackedItem>,
    notifier: RecordingNotifier,
) -> CycleRunner<PageFetcher, RecordingNotifier> {
    let fetcher = PageFetcher::new(&FetcherConfig::default()).unwrap();
    CycleRunner::new(items, fetcher, notifier, Duration::ZERO).unwrap()
}

#[tokio::test]
async fn two_items_one_deal_sends_one_alert_with_one_section() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/pot",
        product_page("Instant Pot Duo Plus", "₹7,999.99"),
    )
    .await;
    mount_page(&server, "/mixer", product_page("Stand Mixer", "₹34,999.00")).await;

    let notifier = RecordingNotifier::default();
    let runner = runner(
        vec![
            tracked_item(&server, "Instant Pot", "/pot", "8000"),
            tracked_item(&server, "Stand Mixer", "/mixer", "30000"),
        ],
        notifier.clone(),
    );

    runner.run_cycle().await;

    let calls = notifier.calls.lock().unwrap();
    assert_eq!(calls.len(), 1, "notifier should be called exactly once");
    assert_eq!(calls[0].len(), 1, "only the deal item should be included");

    let body = format_body(&calls[0]);
    assert_eq!(body.matches("📦").count(), 1);
    assert!(body.contains("Instant Pot Duo Plus"));
    assert!(body.contains("Savings: ₹0.01"));
}

#[tokio::test]
async fn no_deals_no_alert() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/pot",
        product_page("Instant Pot Duo Plus", "₹8,000.00"),
    )
    .await;

    let notifier = RecordingNotifier::default();
    let runner = runner(
        vec![tracked_item(&server, "Instant Pot", "/pot", "8000")],
        notifier.clone(),
    );

    runner.run_cycle().await;

    // Price equal to target is not a deal
    assert!(notifier.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn server_error_skips_item_and_cycle_completes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pot"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_page(&server, "/mixer", product_page("Stand Mixer", "₹24,999.00")).await;

    let notifier = RecordingNotifier::default();
    let runner = runner(
        vec![
            tracked_item(&server, "Instant Pot", "/pot", "8000"),
            tracked_item(&server, "Stand Mixer", "/mixer", "30000"),
        ],
        notifier.clone(),
    );

    runner.run_cycle().await;

    let calls = notifier.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].len(), 1);
    assert_eq!(calls[0][0].title, "Stand Mixer");
}

#[tokio::test]
async fn page_without_price_element_is_skipped() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/pot",
        "<html><body><span id=\"productTitle\">Pot</span></body></html>".to_string(),
    )
    .await;
    mount_page(
        &server,
        "/mixer",
        product_page("Stand Mixer", "₹24,999.00"),
    )
    .await;

    let notifier = RecordingNotifier::default();
    let runner = runner(
        vec![
            tracked_item(&server, "Instant Pot", "/pot", "8000"),
            tracked_item(&server, "Stand Mixer", "/mixer", "30000"),
        ],
        notifier.clone(),
    );

    runner.run_cycle().await;

    let calls = notifier.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0][0].title, "Stand Mixer");
}

#[tokio::test]
async fn fallback_title_uses_configured_name() {
    let server = MockServer::start().await;
    // Page has a price but no title element
    mount_page(
        &server,
        "/pot",
        "<html><body><span class=\"a-offscreen\">₹7,499.00</span></body></html>".to_string(),
    )
    .await;

    let notifier = RecordingNotifier::default();
    let runner = runner(
        vec![tracked_item(&server, "Instant Pot Duo Plus", "/pot", "8000")],
        notifier.clone(),
    );

    runner.run_cycle().await;

    let calls = notifier.calls.lock().unwrap();
    assert_eq!(calls[0][0].title, "Instant Pot Duo Plus");
}
