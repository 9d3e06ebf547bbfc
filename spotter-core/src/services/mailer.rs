//! Outbound verification email dispatch
//!
//! The actual transport is a collaborator behind the [`Mailer`] trait; the
//! workflows hand it a fully built [`EmailMessage`] and never depend on its
//! outcome. [`VerificationMailer`] owns the message shape and the
//! fire-and-forget policy.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

/// A fully rendered outbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub from: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

#[derive(Debug, Error)]
pub enum MailerError {
    #[error("Transport error: {0}")]
    Transport(String),
}

/// Outbound email transport
#[async_trait]
pub trait Mailer: Send + Sync + 'static {
    async fn send(&self, message: &EmailMessage) -> Result<(), MailerError>;
}

/// Transport that logs messages instead of sending them.
///
/// Stands in for a real transport in development and demos.
#[derive(Debug, Clone, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), MailerError> {
        tracing::info!(to = %message.to, subject = %message.subject, "outbound email (log transport)");
        Ok(())
    }
}

/// Sender identity for outbound mail.
#[derive(Debug, Clone)]
pub struct MailerConfig {
    pub from_address: String,
}

impl MailerConfig {
    pub fn new(from_address: impl Into<String>) -> Self {
        Self {
            from_address: from_address.into(),
        }
    }

    /// Read the sender identity from the `MAIL_FROM_ADDRESS` environment
    /// variable.
    pub fn from_env() -> Result<Self, std::env::VarError> {
        Ok(Self {
            from_address: std::env::var("MAIL_FROM_ADDRESS")?,
        })
    }
}

/// Builds and dispatches verification emails.
///
/// Dispatch is fire-and-forget: the send result is logged and dropped, and
/// the method returns nothing, so no workflow can fail on a mail transport
/// problem. There is no retry.
pub struct VerificationMailer<M: Mailer> {
    mailer: Arc<M>,
    config: MailerConfig,
}

impl<M: Mailer> VerificationMailer<M> {
    pub fn new(mailer: Arc<M>, config: MailerConfig) -> Self {
        Self { mailer, config }
    }

    /// Send the verification link for a freshly registered account.
    pub async fn dispatch_verification(&self, to: &str, host: &str, email_token: &str) {
        let link = format!("http://{host}/verify?token={email_token}");
        let message = EmailMessage {
            to: to.to_string(),
            from: self.config.from_address.clone(),
            subject: "Email Verification for Spotter!".to_string(),
            text: format!("Click the link below to verify your email address!\nlink: {link}"),
            html: format!(r#"<strong>Almost there!</strong> <a href="{link}">Verify</a>"#),
        };

        match self.mailer.send(&message).await {
            Ok(()) => tracing::info!(to, "verification email sent"),
            Err(e) => tracing::error!(to, error = %e, "verification email failed"),
        }
    }
}
