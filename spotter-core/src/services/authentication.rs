use std::sync::Arc;

use crate::{
    Error,
    crypto::verify_password,
    error::AuthError,
    repositories::AccountRepository,
    services::AuthenticatedAccount,
    token::CredentialService,
    validation::validate_login_input,
};

/// Service for the login workflow
pub struct AuthenticationService<R: AccountRepository> {
    repository: Arc<R>,
    credentials: Arc<CredentialService>,
}

impl<R: AccountRepository> AuthenticationService<R> {
    pub fn new(repository: Arc<R>, credentials: Arc<CredentialService>) -> Self {
        Self {
            repository,
            credentials,
        }
    }

    /// Authenticate a returning user and issue a session token.
    ///
    /// Structural validation and the repository lookup both run
    /// unconditionally; the validation verdict is checked first, then the
    /// lookup result. An unknown username fails as
    /// [`AuthError::UserNotFound`] while a wrong password fails as
    /// [`AuthError::InvalidCredentials`]; the two stages stay
    /// distinguishable to the caller.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AuthenticatedAccount, Error> {
        let report = validate_login_input(username, password);
        let account = self.repository.find_by_username(username).await?;

        if !report.is_valid() {
            return Err(AuthError::ValidationFailed {
                errors: report.into_errors(),
            }
            .into());
        }

        let Some(account) = account else {
            return Err(AuthError::UserNotFound.into());
        };

        if !verify_password(password, &account.password_hash) {
            tracing::debug!(username, "password mismatch");
            return Err(AuthError::InvalidCredentials.into());
        }

        let token = self.credentials.issue_session_token(&account)?;
        tracing::info!(username, "login succeeded");

        Ok(AuthenticatedAccount { account, token })
    }
}
