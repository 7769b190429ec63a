use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor, message::Mailbox};
use tracing::info;

use crate::config::SmtpConfig;
use crate::models::Deal;
use crate::{AppError, Result};

pub const ALERT_SUBJECT: &str = "🛒 Price Alert - Deals Found!";

/// Sink for one aggregated deal alert per cycle. The SMTP implementation
/// lives in [`EmailNotifier`]; tests substitute a recording notifier.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, deals: &[Deal]) -> Result<()>;
}

pub struct EmailNotifier {
    config: SmtpConfig,
}

impl EmailNotifier {
    pub fn new(config: SmtpConfig) -> Self {
        EmailNotifier { config }
    }
}

/// One plaintext section per deal: title, prices, savings and link.
pub fn format_body(deals: &[Deal]) -> String {
    let mut body = String::from("🎊 Great news! The following items are on sale:\n\n");
    for deal in deals {
        body.push_str(&format!("📦 {}\n", deal.title));
        body.push_str(&format!("   Current Price: ₹{}\n", deal.current_price));
        body.push_str(&format!("   Target Price: ₹{}\n", deal.target_price));
        body.push_str(&format!("   Savings: ₹{:.2}\n", deal.savings()));
        body.push_str(&format!("   Link: {}\n\n", deal.url));
    }
    body
}

#[async_trait]
impl Notifier for EmailNotifier {
    /// Send the aggregated alert over a StartTLS-upgraded submission to the
    /// configured relay, authenticated, recipient equal to the sender.
    /// Credentials are resolved here rather than at startup, so a missing
    /// credential is a notify-time error for the caller to log.
    async fn notify(&self, deals: &[Deal]) -> Result<()> {
        let username = self
            .config
            .username
            .as_deref()
            .ok_or(AppError::MissingCredential {
                name: "smtp.username",
            })?;
        let password = self
            .config
            .password
            .as_deref()
            .ok_or(AppError::MissingCredential {
                name: "smtp.password",
            })?;

        let account: Mailbox = username.parse()?;
        let email = Message::builder()
            .from(account.clone())
            .to(account)
            .subject(ALERT_SUBJECT)
            .header(ContentType::TEXT_PLAIN)
            .body(format_body(deals))?;

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.host)?
            .port(self.config.port)
            .credentials(Credentials::new(username.to_string(), password.to_string()))
            .build();

        mailer.send(email).await?;
        info!(host = %self.config.host, deals = deals.len(), "price alert sent");
        Ok(())
    }
}
