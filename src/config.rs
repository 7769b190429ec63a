use config::{Config, ConfigError, Environment, File};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use url::Url;

use crate::models::TrackedItem;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_items")]
    pub items: Vec<ItemConfig>,
    #[serde(default)]
    pub fetcher: FetcherConfig,
    #[serde(default)]
    pub smtp: SmtpConfig,
    #[serde(default)]
    pub scheduler: SchedulerConfig,
}

/// One tracked item as it appears in configuration. The URL is kept as a
/// string here; it is validated when converted into a [`TrackedItem`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemConfig {
    pub name: String,
    pub url: String,
    pub target_price: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetcherConfig {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_accept_language")]
    pub accept_language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmtpConfig {
    #[serde(default = "default_smtp_host")]
    pub host: String,
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    #[serde(default = "default_check_interval_hours")]
    pub check_interval_hours: u64,
    #[serde(default = "default_item_delay_secs")]
    pub item_delay_secs: u64,
}

fn default_items() -> Vec<ItemConfig> {
    vec![ItemConfig {
        name: "Instant Pot Duo Plus".to_string(),
        url: "https://www.amazon.com/dp/B075CYMYK6".to_string(),
        target_price: Decimal::from(8000),
    }]
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_5) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/84.0.4147.125 Safari/537.36"
        .to_string()
}

fn default_accept_language() -> String {
    "en-GB,en-US;q=0.9,en;q=0.8".to_string()
}

fn default_smtp_host() -> String {
    "smtp.gmail.com".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_check_interval_hours() -> u64 {
    24
}

fn default_item_delay_secs() -> u64 {
    2
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            items: default_items(),
            fetcher: FetcherConfig::default(),
            smtp: SmtpConfig::default(),
            scheduler: SchedulerConfig::default(),
        }
    }
}

impl Default for FetcherConfig {
    fn default() -> Self {
        FetcherConfig {
            user_agent: default_user_agent(),
            accept_language: default_accept_language(),
        }
    }
}

impl Default for SmtpConfig {
    fn default() -> Self {
        SmtpConfig {
            host: default_smtp_host(),
            port: default_smtp_port(),
            username: None,
            password: None,
        }
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        SchedulerConfig {
            check_interval_hours: default_check_interval_hours(),
            item_delay_secs: default_item_delay_secs(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> crate::Result<Self> {
        let s = Config::builder()
            // Start with the optional default configuration file
            .add_source(File::with_name("config/default").required(false))
            // Add local config (ignored by git)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables with prefix "DEALWATCH"
            .add_source(Environment::with_prefix("DEALWATCH").separator("__"))
            .build()?;

        let mut config: AppConfig = s.try_deserialize()?;

        // Bare SMTP_ADDRESS / EMAIL_ADDRESS / EMAIL_PASSWORD variables (as
        // commonly set in a .env) fill in whatever the layered config left out.
        if let Ok(host) = env::var("SMTP_ADDRESS") {
            config.smtp.host = host;
        }
        if config.smtp.username.is_none() {
            config.smtp.username = env::var("EMAIL_ADDRESS").ok();
        }
        if config.smtp.password.is_none() {
            config.smtp.password = env::var("EMAIL_PASSWORD").ok();
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.items.is_empty() {
            return Err(ConfigError::Message(
                "At least one tracked item must be configured".into(),
            ));
        }

        if self.smtp.port == 0 {
            return Err(ConfigError::Message("SMTP port must be greater than 0".into()));
        }

        if self.scheduler.check_interval_hours == 0 {
            return Err(ConfigError::Message(
                "Scheduler check_interval_hours must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Parse the configured item list into validated tracked items.
    pub fn tracked_items(&self) -> crate::Result<Vec<TrackedItem>> {
        self.items
            .iter()
            .map(|item| {
                Ok(TrackedItem {
                    name: item.name.clone(),
                    url: Url::parse(&item.url)?,
                    target_price: item.target_price,
                })
            })
            .collect()
    }
}

impl SchedulerConfig {
    pub fn check_interval(&self) -> Duration {
        Duration::from_secs(self.check_interval_hours * 60 * 60)
    }

    pub fn item_delay(&self) -> Duration {
        Duration::from_secs(self.item_delay_secs)
    }
}
