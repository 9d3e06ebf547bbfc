use std::collections::BTreeMap;

use thiserror::Error;

/// Per-field validation messages, keyed by input field name.
///
/// A `BTreeMap` keeps serialized output deterministic, which matters for the
/// transport layer echoing these back to clients.
pub type FieldErrors = BTreeMap<String, String>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),
}

/// Workflow-level failures. The first two variants carry the field-error map
/// for the caller to surface; the rest are general errors with no field
/// detail attached.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Validation failed")]
    ValidationFailed { errors: FieldErrors },

    #[error("Username is taken")]
    UsernameTaken { errors: FieldErrors },

    #[error("User not found")]
    UserNotFound,

    #[error("Wrong credentials")]
    InvalidCredentials,

    #[error("Password hash error: {0}")]
    PasswordHash(String),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Token expired")]
    Expired,

    #[error("Invalid token: {0}")]
    Invalid(String),

    #[error("Token signing failed: {0}")]
    Signing(String),
}

impl Error {
    /// True for failures the end user can fix by correcting their input.
    /// These are the only variants that carry a field-error map.
    pub fn is_user_correctable(&self) -> bool {
        matches!(
            self,
            Error::Auth(AuthError::ValidationFailed { .. })
                | Error::Auth(AuthError::UsernameTaken { .. })
        )
    }

    /// The field-error map attached to this error, if any.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Error::Auth(AuthError::ValidationFailed { errors }) => Some(errors),
            Error::Auth(AuthError::UsernameTaken { errors }) => Some(errors),
            _ => None,
        }
    }

    pub fn is_storage_error(&self) -> bool {
        matches!(self, Error::Storage(_))
    }
}
