/**
 * Outgoing Mail
 *
 * Password reset links are delivered through a `Mailer`. With SMTP settings
 * configured, `SmtpMailer` sends through lettre's async transport; otherwise
 * `LogMailer` writes the message to the log so local development still shows
 * the link.
 */

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;

use crate::shared::config::SmtpConfig;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("failed to build message: {0}")]
    Build(#[from] lettre::error::Error),

    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, html: String) -> Result<(), MailError>;
}

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self, MailError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?
            .credentials(Credentials::new(config.username.clone(), config.password.clone()))
            .build();
        Ok(Self {
            transport,
            from: config.from.parse()?,
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, to: &str, subject: &str, html: String) -> Result<(), MailError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(to.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html)?;
        self.transport.send(message).await?;
        tracing::info!(to, subject, "mail sent");
        Ok(())
    }
}

/// Logs instead of sending
#[derive(Debug, Default, Clone)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, to: &str, subject: &str, html: String) -> Result<(), MailError> {
        tracing::info!(to, subject, body = %html, "SMTP not configured; mail not sent");
        Ok(())
    }
}

/// Body of the admin password reset mail
pub fn reset_password_email(first_name: &str, link: &str) -> String {
    format!(
        "<p>Hi {},</p>\
         <p>We received a request to reset your password. The link below is valid for 10 minutes.</p>\
         <p><a href=\"{link}\">{link}</a></p>\
         <p>If you did not ask for this you can ignore this email.</p>",
        first_name,
        link = link
    )
}
