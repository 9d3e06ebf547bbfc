use std::sync::Arc;

use chrono::Utc;

use crate::{
    Error,
    account::AccountDraft,
    crypto::hash_password,
    error::{AuthError, FieldErrors},
    repositories::AccountRepository,
    services::{
        AuthenticatedAccount, RequestContext,
        mailer::{Mailer, VerificationMailer},
    },
    token::CredentialService,
    validation::validate_register_input,
};

/// The payload a caller submits to create an account.
#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub phone_number: Option<String>,
}

/// Service for the account registration workflow
pub struct RegistrationService<R: AccountRepository, M: Mailer> {
    repository: Arc<R>,
    credentials: Arc<CredentialService>,
    mailer: Arc<VerificationMailer<M>>,
}

impl<R: AccountRepository, M: Mailer> RegistrationService<R, M> {
    pub fn new(
        repository: Arc<R>,
        credentials: Arc<CredentialService>,
        mailer: Arc<VerificationMailer<M>>,
    ) -> Self {
        Self {
            repository,
            credentials,
            mailer,
        }
    }

    /// Register a new account.
    ///
    /// The steps run in a fixed order and each failure stops the workflow:
    /// uniqueness lookup, structural validation, password hashing, email
    /// token issuance, persistence, session token issuance, and finally the
    /// verification email. The email is fire-and-forget; a transport
    /// failure never rolls back or fails an otherwise complete
    /// registration.
    ///
    /// Nothing serializes the lookup against the insert, so two concurrent
    /// registrations for the same username can both pass the uniqueness
    /// check. The repository is the sole serialization point.
    pub async fn register(
        &self,
        input: RegisterInput,
        context: &RequestContext,
    ) -> Result<AuthenticatedAccount, Error> {
        // Uniqueness is checked before structural validation, so a taken
        // username is reported even for an otherwise invalid payload.
        if self
            .repository
            .find_by_username(&input.username)
            .await?
            .is_some()
        {
            let mut errors = FieldErrors::new();
            errors.insert("username".to_string(), "This username is taken".to_string());
            return Err(AuthError::UsernameTaken { errors }.into());
        }

        let report = validate_register_input(
            &input.username,
            &input.email,
            &input.password,
            &input.confirm_password,
        );
        if !report.is_valid() {
            return Err(AuthError::ValidationFailed {
                errors: report.into_errors(),
            }
            .into());
        }

        // An empty password is passed through unhashed. Validation has
        // already rejected empty passwords above, so the arm is latent.
        let password_hash = if input.password.is_empty() {
            input.password.clone()
        } else {
            hash_password(&input.password)?
        };

        let email_token = self.credentials.issue_email_token(&input.username)?;

        let draft = AccountDraft {
            username: input.username,
            email: input.email,
            password_hash,
            phone_number: input.phone_number,
            email_token: Some(email_token.clone()),
            created_at: Utc::now(),
        };
        let account = self.repository.insert(draft).await?;

        let token = self.credentials.issue_session_token(&account)?;

        self.mailer
            .dispatch_verification(&account.email, &context.host, &email_token)
            .await;

        tracing::info!(username = %account.username, "account registered");

        Ok(AuthenticatedAccount { account, token })
    }
}
