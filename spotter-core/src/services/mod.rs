//! Service layer for business logic
//!
//! This module contains concrete service implementations that encapsulate
//! the registration, authentication, email verification, and profile
//! workflows. Every service is generic over the repository it persists
//! through and holds no state besides its collaborators.

use serde::Serialize;

use crate::account::Account;

pub mod authentication;
pub mod mailer;
pub mod profile;
pub mod registration;
pub mod verification;

pub use authentication::AuthenticationService;
pub use mailer::{EmailMessage, LogMailer, Mailer, MailerConfig, MailerError, VerificationMailer};
pub use profile::ProfileService;
pub use registration::{RegisterInput, RegistrationService};
pub use verification::VerificationService;

/// Outcome of a successful registration or login.
///
/// Serializes to the account's stored fields with the session token merged
/// in. The password hash never serializes, so this shape is safe to return
/// to clients directly.
#[derive(Debug, Clone, Serialize)]
pub struct AuthenticatedAccount {
    #[serde(flatten)]
    pub account: Account,
    pub token: String,
}

/// Ambient request context supplied by the transport layer.
///
/// Carries the externally visible host used to build verification links.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub host: String,
}

impl RequestContext {
    pub fn new(host: impl Into<String>) -> Self {
        Self { host: host.into() }
    }
}
