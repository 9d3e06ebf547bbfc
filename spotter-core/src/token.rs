//! Signed credential issuance and verification
//!
//! Two token kinds exist and are never accepted interchangeably:
//!
//! | Kind          | Claims                      | Lifetime | Secret           |
//! | ------------- | --------------------------- | -------- | ---------------- |
//! | Session token | `{id, email, username}`     | 1 hour   | `session_secret` |
//! | Email token   | `{username}`                | 1 day    | `email_secret`   |
//!
//! Each kind carries its own claim struct and is signed with its own secret,
//! so a session token presented to the email verifier fails on signature
//! before claim shapes are ever considered, and vice versa.
//!
//! Tokens are not server-side revocable. Expiry is the only invalidation
//! mechanism.

use chrono::{Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};

use crate::{
    account::Account,
    error::{Error, TokenError},
};

/// Session token lifetime in seconds (one hour).
pub const SESSION_TOKEN_TTL_SECS: i64 = 60 * 60;

/// Email token lifetime in seconds (one day).
pub const EMAIL_TOKEN_TTL_SECS: i64 = 24 * 60 * 60;

/// Signing secrets for both token kinds.
///
/// Constructed once at startup and handed to [`CredentialService::new`].
/// Business logic never reads secrets from ambient state.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub session_secret: String,
    pub email_secret: String,
}

impl TokenConfig {
    pub fn new(session_secret: impl Into<String>, email_secret: impl Into<String>) -> Self {
        Self {
            session_secret: session_secret.into(),
            email_secret: email_secret.into(),
        }
    }

    /// Read both secrets from the `SESSION_SECRET` and `EMAIL_SECRET`
    /// environment variables.
    pub fn from_env() -> Result<Self, std::env::VarError> {
        let session_secret = std::env::var("SESSION_SECRET")?;
        let email_secret = std::env::var("EMAIL_SECRET")?;
        Ok(Self {
            session_secret,
            email_secret,
        })
    }
}

/// Claims carried by a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub id: String,
    pub email: String,
    pub username: String,
    pub iat: i64,
    pub exp: i64,
}

/// Claims carried by an email verification token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailClaims {
    pub username: String,
    pub iat: i64,
    pub exp: i64,
}

/// Issues and verifies both token kinds.
///
/// Keys are derived from the secrets once at construction time and reused
/// for every sign and verify call.
pub struct CredentialService {
    session_encoding: EncodingKey,
    session_decoding: DecodingKey,
    email_encoding: EncodingKey,
    email_decoding: DecodingKey,
}

impl CredentialService {
    pub fn new(config: &TokenConfig) -> Self {
        Self {
            session_encoding: EncodingKey::from_secret(config.session_secret.as_bytes()),
            session_decoding: DecodingKey::from_secret(config.session_secret.as_bytes()),
            email_encoding: EncodingKey::from_secret(config.email_secret.as_bytes()),
            email_decoding: DecodingKey::from_secret(config.email_secret.as_bytes()),
        }
    }

    /// Issue a session token for a persisted account.
    ///
    /// Claims are taken from the account as stored, so a token issued right
    /// after registration decodes to the same `id`, `email`, and `username`
    /// that were persisted.
    pub fn issue_session_token(&self, account: &Account) -> Result<String, Error> {
        let now = Utc::now();
        let claims = SessionClaims {
            id: account.id.to_string(),
            email: account.email.clone(),
            username: account.username.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(SESSION_TOKEN_TTL_SECS)).timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.session_encoding)
            .map_err(|e| TokenError::Signing(e.to_string()))?;

        tracing::debug!(username = %account.username, "session token issued");
        Ok(token)
    }

    /// Verify a session token and return its claims.
    pub fn verify_session_token(&self, token: &str) -> Result<SessionClaims, Error> {
        let data = decode::<SessionClaims>(
            token,
            &self.session_decoding,
            &Validation::new(Algorithm::HS256),
        )
        .map_err(map_token_error)?;

        Ok(data.claims)
    }

    /// Issue an email verification token for a username.
    pub fn issue_email_token(&self, username: &str) -> Result<String, Error> {
        let now = Utc::now();
        let claims = EmailClaims {
            username: username.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(EMAIL_TOKEN_TTL_SECS)).timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.email_encoding)
            .map_err(|e| TokenError::Signing(e.to_string()))?;

        tracing::debug!(username, "email token issued");
        Ok(token)
    }

    /// Verify an email token and return its claims.
    ///
    /// Fails on expiry, signature mismatch, or malformed structure. Callers
    /// that must not leak which check failed collapse any error here to a
    /// plain unsuccessful result.
    pub fn verify_email_token(&self, token: &str) -> Result<EmailClaims, Error> {
        let data = decode::<EmailClaims>(
            token,
            &self.email_decoding,
            &Validation::new(Algorithm::HS256),
        )
        .map_err(map_token_error)?;

        Ok(data.claims)
    }
}

fn map_token_error(e: jsonwebtoken::errors::Error) -> Error {
    match e.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired.into(),
        _ => TokenError::Invalid(e.to_string()).into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::{AccountDraft, AccountId};

    fn test_config() -> TokenConfig {
        TokenConfig::new("session-secret-for-tests", "email-secret-for-tests")
    }

    fn test_account() -> Account {
        Account::from_draft(
            AccountId::new_random(),
            AccountDraft::new("alice", "alice@example.com", "$2b$12$hash"),
        )
    }

    #[test]
    fn test_session_token_round_trip() {
        let service = CredentialService::new(&test_config());
        let account = test_account();

        let token = service.issue_session_token(&account).unwrap();
        let claims = service.verify_session_token(&token).unwrap();

        assert_eq!(claims.id, account.id.to_string());
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.exp - claims.iat, SESSION_TOKEN_TTL_SECS);
    }

    #[test]
    fn test_email_token_round_trip() {
        let service = CredentialService::new(&test_config());

        let token = service.issue_email_token("alice").unwrap();
        let claims = service.verify_email_token(&token).unwrap();

        assert_eq!(claims.username, "alice");
        assert_eq!(claims.exp - claims.iat, EMAIL_TOKEN_TTL_SECS);
    }

    #[test]
    fn test_cross_kind_rejection() {
        let service = CredentialService::new(&test_config());
        let account = test_account();

        let session_token = service.issue_session_token(&account).unwrap();
        let email_token = service.issue_email_token("alice").unwrap();

        // Signed with the other kind's secret, so signature verification
        // fails even though claim shapes overlap on `username`.
        assert!(service.verify_email_token(&session_token).is_err());
        assert!(service.verify_session_token(&email_token).is_err());
    }

    #[test]
    fn test_expired_email_token() {
        let config = test_config();
        let service = CredentialService::new(&config);

        let now = Utc::now();
        let claims = EmailClaims {
            username: "alice".to_string(),
            iat: (now - Duration::days(3)).timestamp(),
            exp: (now - Duration::days(2)).timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(config.email_secret.as_bytes()),
        )
        .unwrap();

        let result = service.verify_email_token(&token);
        assert!(matches!(result, Err(Error::Token(TokenError::Expired))));
    }

    #[test]
    fn test_malformed_token_rejected() {
        let service = CredentialService::new(&test_config());

        assert!(matches!(
            service.verify_email_token("not.a.jwt"),
            Err(Error::Token(TokenError::Invalid(_)))
        ));
        assert!(matches!(
            service.verify_session_token(""),
            Err(Error::Token(TokenError::Invalid(_)))
        ));
    }

    #[test]
    fn test_foreign_secret_rejected() {
        let service = CredentialService::new(&test_config());
        let other = CredentialService::new(&TokenConfig::new("other-session", "other-email"));

        let token = other.issue_email_token("alice").unwrap();
        assert!(service.verify_email_token(&token).is_err());
    }
}
