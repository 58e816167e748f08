//! Message submission.

use async_trait::async_trait;
use casewatch_common::{CaseWatchError, Result};
use casewatch_config::EmailConfig;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{info, warn};

/// Delivers one composed message.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: Message) -> Result<()>;

    /// Where messages go, for logs.
    fn describe(&self) -> String;
}

/// Authenticated SMTP submission with STARTTLS.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    endpoint: String,
}

impl SmtpMailer {
    /// Transport for the configured relay. No connection is made until `send`.
    pub fn from_config(config: &EmailConfig) -> Result<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            .map_err(|e| {
                CaseWatchError::mail_with_source(
                    format!("Cannot set up SMTP relay {}", config.smtp_host),
                    e,
                )
            })?
            .port(config.smtp_port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        Ok(Self {
            transport,
            endpoint: format!("{}:{}", config.smtp_host, config.smtp_port),
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, message: Message) -> Result<()> {
        let recipients = message.envelope().to().len();
        let response = self.transport.send(message).await.map_err(|e| {
            CaseWatchError::mail_with_source(format!("SMTP submission to {} failed", self.endpoint), e)
        })?;

        info!(
            endpoint = %self.endpoint,
            recipients,
            code = %response.code(),
            "Message accepted"
        );
        Ok(())
    }

    fn describe(&self) -> String {
        format!("smtp://{}", self.endpoint)
    }
}

/// Logs the message instead of sending it.
#[derive(Debug, Default)]
pub struct DryRunMailer;

#[async_trait]
impl Mailer for DryRunMailer {
    async fn send(&self, message: Message) -> Result<()> {
        let envelope = message.envelope();
        let recipients: Vec<String> = envelope.to().iter().map(ToString::to_string).collect();
        warn!(
            recipients = ?recipients,
            bytes = message.formatted().len(),
            "Dry run, message not sent"
        );
        Ok(())
    }

    fn describe(&self) -> String {
        "dry-run".to_string()
    }
}
