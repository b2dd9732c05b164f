//! SMTP delivery of alert emails over implicit TLS.
//!
//! # Security
//!
//! - The SMTP password is held as a `SecretString` and never logged
//! - A fresh connection is opened per delivery and closed when it completes

use crate::message::AlertMessage;
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use vault_watch_core::{AlertConfig, AlertNotifier, MailError, Position, SmtpConfig};

/// Upper bound on a single SMTP command round trip.
const SMTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Sends alert emails through an authenticated SMTPS relay.
pub struct SmtpNotifier {
    host: String,
    port: u16,
    username: String,
    password: SecretString,
    sender: Mailbox,
    recipient: Mailbox,
    alert: AlertConfig,
    vault_url: String,
}

impl std::fmt::Debug for SmtpNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpNotifier")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("recipient", &self.recipient.to_string())
            .finish_non_exhaustive()
    }
}

impl SmtpNotifier {
    /// Creates a notifier, validating sender and recipient addresses up front.
    ///
    /// # Errors
    /// Returns [`MailError::Address`] if either address does not parse.
    pub fn new(
        smtp: &SmtpConfig,
        alert: AlertConfig,
        vault_url: impl Into<String>,
    ) -> Result<Self, MailError> {
        let sender = parse_mailbox("sender", &smtp.sender)?;
        let recipient = parse_mailbox("recipient", &smtp.recipient)?;

        Ok(Self {
            host: smtp.host.clone(),
            port: smtp.port,
            username: smtp.username.clone(),
            password: SecretString::from(smtp.password.clone()),
            sender,
            recipient,
            alert,
            vault_url: vault_url.into(),
        })
    }

    /// Assembles the email for `alerts` without sending it.
    ///
    /// # Errors
    /// Returns [`MailError::Message`] if the message cannot be built.
    pub fn build_email(&self, alerts: &[Position]) -> Result<Message, MailError> {
        let content = AlertMessage::build(alerts, &self.alert, &self.vault_url);

        Message::builder()
            .from(self.sender.clone())
            .to(self.recipient.clone())
            .subject(content.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(content.body)
            .map_err(|e| MailError::Message(e.to_string()))
    }

    fn transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, MailError> {
        let credentials = Credentials::new(
            self.username.clone(),
            self.password.expose_secret().to_string(),
        );

        Ok(AsyncSmtpTransport::<Tokio1Executor>::relay(&self.host)
            .map_err(|e| MailError::Transport(format!("invalid SMTP relay {}: {e}", self.host)))?
            .port(self.port)
            .credentials(credentials)
            .timeout(Some(SMTP_TIMEOUT))
            .build())
    }
}

fn parse_mailbox(role: &str, address: &str) -> Result<Mailbox, MailError> {
    address
        .parse::<Mailbox>()
        .map_err(|e| MailError::Address(format!("{role} {address:?}: {e}")))
}

#[async_trait]
impl AlertNotifier for SmtpNotifier {
    async fn notify(&self, alerts: &[Position]) -> Result<(), MailError> {
        let email = self
            .build_email(alerts)
            .inspect_err(|e| tracing::error!("Failed to build alert email: {}", e))?;
        let transport = self.transport()?;

        match transport.send(email).await {
            Ok(_) => {
                tracing::info!("Alert email sent to {}", self.recipient);
                Ok(())
            }
            Err(e) => {
                tracing::error!(
                    host = %self.host,
                    port = self.port,
                    error = ?e,
                    "Failed to send alert email"
                );
                Err(MailError::Transport(e.to_string()))
            }
        }
    }
}
