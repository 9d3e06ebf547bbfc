//! # Spotter
//!
//! Spotter is the account and identity layer for a gym buddy matching
//! application. It covers registration, password login, email verification,
//! and the training profile accounts are matched on, while leaving transport
//! concerns such as HTTP routing, request auth headers, and cookies to the
//! embedding application.
//!
//! The facade wires together the services from `spotter_core`:
//! - Registration with hashed passwords and a verification email
//! - Password login issuing signed session tokens
//! - Email verification driven by a signed, expiring token
//! - Match profile updates (availability, gym, preferences)
//!
//! Storage is pluggable through the [`AccountRepository`] trait, and mail
//! delivery through the [`Mailer`] trait. In-memory and log-only
//! implementations ship for tests and prototyping.
//!
//! ## Example
//!
//! ```rust,no_run
//! use spotter::{LogMailer, MailerConfig, MemoryAccountRepository, Spotter, TokenConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let spotter = Spotter::new(
//!         Arc::new(MemoryAccountRepository::new()),
//!         Arc::new(LogMailer),
//!         TokenConfig::new("session-secret", "email-secret"),
//!         MailerConfig::new("noreply@spotter.app"),
//!     );
//! }
//! ```
use std::sync::Arc;

use spotter_core::{
    AuthenticationService, CredentialService, ProfileService, RegistrationService,
    VerificationMailer, VerificationService,
};

/// Re-export core types from spotter_core
///
/// These types are commonly used when working with the Spotter API.
pub use spotter_core::{
    Account, AccountId, AuthError, AuthenticatedAccount, Error, FieldErrors, MatchProfile,
    RegisterInput, RequestContext, SessionClaims, StorageError, TokenConfig, TokenError,
};

/// Re-export repository types
///
/// These are the types needed to implement or consume an account store.
pub use spotter_core::{AccountDraft, AccountRepository, MemoryAccountRepository, UpdateReport};

/// Re-export mailer types
///
/// These are the types needed to implement or configure a mail transport.
pub use spotter_core::{EmailMessage, LogMailer, Mailer, MailerConfig, MailerError};

/// The main coordinator that wires the account services together.
///
/// `Spotter` assembles registration, authentication, email verification, and
/// profile updates over a shared repository and exposes them as one API
/// surface.
///
/// # Example
///
/// ```rust,no_run
/// use spotter::{
///     LogMailer, MailerConfig, MemoryAccountRepository, RegisterInput, RequestContext, Spotter,
///     TokenConfig,
/// };
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let spotter = Spotter::new(
///         Arc::new(MemoryAccountRepository::new()),
///         Arc::new(LogMailer),
///         TokenConfig::new("session-secret", "email-secret"),
///         MailerConfig::new("noreply@spotter.app"),
///     );
///
///     // Register an account and get back a session token
///     let registered = spotter
///         .register(
///             RegisterInput {
///                 username: "alice".to_string(),
///                 email: "alice@example.com".to_string(),
///                 password: "hunter2!".to_string(),
///                 confirm_password: "hunter2!".to_string(),
///                 phone_number: None,
///             },
///             &RequestContext::new("localhost:4000"),
///         )
///         .await?;
///     println!("registered: {}", registered.account.username);
///
///     // Log in with the same credentials
///     let logged_in = spotter.login("alice", "hunter2!").await?;
///     println!("token: {}", logged_in.token);
///
///     Ok(())
/// }
/// ```
pub struct Spotter<R: AccountRepository, M: Mailer> {
    repository: Arc<R>,
    credentials: Arc<CredentialService>,
    registration: Arc<RegistrationService<R, M>>,
    authentication: Arc<AuthenticationService<R>>,
    verification: Arc<VerificationService<R>>,
    profile: Arc<ProfileService<R>>,
}

impl<R: AccountRepository, M: Mailer> Spotter<R, M> {
    /// Create a new Spotter instance over a repository and a mailer
    ///
    /// This constructor builds the signing keys from `token_config` once,
    /// wires every service with the shared repository, and hands the mailer
    /// to the registration workflow for verification emails.
    ///
    /// # Arguments
    ///
    /// * `repository` - The account repository implementation
    /// * `mailer` - The mail transport used for verification emails
    /// * `token_config` - Signing secrets for session and email tokens
    /// * `mailer_config` - Sender settings for outgoing mail
    pub fn new(
        repository: Arc<R>,
        mailer: Arc<M>,
        token_config: TokenConfig,
        mailer_config: MailerConfig,
    ) -> Self {
        let credentials = Arc::new(CredentialService::new(&token_config));
        let verification_mailer = Arc::new(VerificationMailer::new(mailer, mailer_config));

        Self {
            registration: Arc::new(RegistrationService::new(
                repository.clone(),
                credentials.clone(),
                verification_mailer,
            )),
            authentication: Arc::new(AuthenticationService::new(
                repository.clone(),
                credentials.clone(),
            )),
            verification: Arc::new(VerificationService::new(
                repository.clone(),
                credentials.clone(),
            )),
            profile: Arc::new(ProfileService::new(repository.clone())),
            repository,
            credentials,
        }
    }

    /// Register a new account
    ///
    /// The account is stored with a hashed password and an unverified email,
    /// and a verification email is dispatched to the given address. A mail
    /// transport failure is logged but does not fail the registration.
    ///
    /// # Arguments
    ///
    /// * `input` - The registration payload
    /// * `context` - Request context carrying the host used in the
    ///   verification link
    ///
    /// # Returns
    ///
    /// Returns the stored account together with a signed session token
    pub async fn register(
        &self,
        input: RegisterInput,
        context: &RequestContext,
    ) -> Result<AuthenticatedAccount, Error> {
        self.registration.register(input, context).await
    }

    /// Log in with a username and password
    ///
    /// # Arguments
    ///
    /// * `username` - The username to authenticate
    /// * `password` - The password to check against the stored hash
    ///
    /// # Returns
    ///
    /// Returns the account together with a fresh session token if the
    /// credentials are correct
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AuthenticatedAccount, Error> {
        self.authentication.login(username, password).await
    }

    /// Mark the account named in a verification token as verified
    ///
    /// # Arguments
    ///
    /// * `token` - The email verification token from the emailed link
    ///
    /// # Returns
    ///
    /// Returns `Ok(false)` when the token is expired, malformed, or not an
    /// email verification token. Returns `Ok(true)` when the token is
    /// valid, whether or not a matching account was found.
    pub async fn verify_email(&self, token: &str) -> Result<bool, Error> {
        self.verification.verify_email(token).await
    }

    /// Verify a session token and return its claims
    ///
    /// Intended for request middleware that needs the identity behind a
    /// bearer token. Verification is purely cryptographic; no account
    /// lookup happens here.
    ///
    /// # Arguments
    ///
    /// * `token` - The session token to verify
    ///
    /// # Returns
    ///
    /// Returns the claims embedded in the token if it is valid and unexpired
    pub fn verify_session_token(&self, token: &str) -> Result<SessionClaims, Error> {
        self.credentials.verify_session_token(token)
    }

    /// Replace the match profile of the named account
    ///
    /// All five profile fields are overwritten as a group; inputs left
    /// unset clear their fields.
    ///
    /// # Arguments
    ///
    /// * `username` - The username of the account to update
    /// * `profile` - The new profile values
    ///
    /// # Returns
    ///
    /// Returns the raw update acknowledgment from the repository
    pub async fn update_match_profile(
        &self,
        username: &str,
        profile: MatchProfile,
    ) -> Result<UpdateReport, Error> {
        self.profile.update_match_profile(username, profile).await
    }

    /// Get an account by username
    ///
    /// # Arguments
    ///
    /// * `username` - The username of the account to retrieve
    ///
    /// # Returns
    ///
    /// Returns the account if found, otherwise `None`
    pub async fn get_account(&self, username: &str) -> Result<Option<Account>, Error> {
        self.repository.find_by_username(username).await
    }

    /// List all stored accounts
    ///
    /// # Returns
    ///
    /// Returns every account in the repository in a stable order
    pub async fn list_accounts(&self) -> Result<Vec<Account>, Error> {
        self.repository.find_all().await
    }
}
