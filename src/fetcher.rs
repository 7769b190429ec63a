use async_trait::async_trait;
use reqwest::header::{ACCEPT_LANGUAGE, HeaderMap, HeaderValue, USER_AGENT};
use url::Url;

use crate::Result;
use crate::config::FetcherConfig;

/// Source of raw page content. The HTTP implementation lives in
/// [`PageFetcher`]; tests substitute canned pages.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<String>;
}

pub struct PageFetcher {
    client: reqwest::Client,
}

impl PageFetcher {
    /// Build a client that sends a desktop-browser user agent and an English
    /// language preference on every request, to reduce the chance of
    /// bot-detection or localized content.
    pub fn new(config: &FetcherConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_str(&config.user_agent)?);
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_str(&config.accept_language)?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageSource for PageFetcher {
    /// One GET per call. No retry; a non-success status or transport error
    /// surfaces as an error for the caller to contain at the item boundary.
    async fn fetch(&self, url: &Url) -> Result<String> {
        let response = self
            .client
            .get(url.as_str())
            .send()
            .await?
            .error_for_status()?;

        Ok(response.text().await?)
    }
}
