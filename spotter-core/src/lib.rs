//! Core functionality for the Spotter identity layer
//!
//! This crate contains the account model, the two-kind credential service,
//! the password hasher, the repository contract, and the four account
//! workflows: registration, authentication, email verification, and
//! profile updates.
//!
//! It is designed to sit behind a transport layer; nothing here knows
//! about request routing or error-to-response mapping.
//!
//! See [`Account`] for the persisted identity record, [`CredentialService`]
//! for token issuance and verification, and the [`services`] module for
//! the workflows.

pub mod account;
pub mod crypto;
pub mod error;
pub mod id;
pub mod repositories;
pub mod services;
pub mod token;
pub mod validation;

pub use account::{Account, AccountDraft, AccountId, MatchProfile};
pub use error::{AuthError, Error, FieldErrors, StorageError, TokenError};
pub use repositories::{AccountRepository, MemoryAccountRepository, UpdateReport};
pub use services::{
    AuthenticatedAccount, AuthenticationService, EmailMessage, LogMailer, Mailer, MailerConfig,
    MailerError, ProfileService, RegisterInput, RegistrationService, RequestContext,
    VerificationMailer, VerificationService,
};
pub use token::{CredentialService, EmailClaims, SessionClaims, TokenConfig};
