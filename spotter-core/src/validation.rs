//! Structural validation for registration and login input
//!
//! Single source of truth for input-shape checks. Validators are pure
//! functions returning a [`ValidationReport`] with one message per failing
//! field; they never touch storage, so callers decide what a failure means.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::FieldErrors;

/// Lazy-loaded email validation regex
///
/// Validates email addresses according to a practical subset of RFC 5322.
/// Loaded once at runtime and reused across all validation calls.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("Invalid email regex pattern")
});

/// Outcome of a structural validation pass.
///
/// Valid input produces an empty error map. Each failing field appears at
/// most once, keyed by field name.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub errors: FieldErrors,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_errors(self) -> FieldErrors {
        self.errors
    }

    fn add(&mut self, field: &str, message: &str) {
        self.errors.insert(field.to_string(), message.to_string());
    }
}

/// Validates registration input
///
/// # Arguments
///
/// * `username` - Must be non-empty after trimming
/// * `email` - Must be non-empty and match the email regex
/// * `password` - Must be non-empty
/// * `confirm_password` - Must equal `password`
///
/// The password pair is only compared when the password itself is non-empty,
/// so an empty password reports one error, not two.
///
/// # Examples
///
/// ```rust
/// use spotter_core::validation::validate_register_input;
///
/// let report = validate_register_input("alice", "alice@example.com", "hunter2!", "hunter2!");
/// assert!(report.is_valid());
///
/// let report = validate_register_input("alice", "alice@example.com", "hunter2!", "different");
/// assert!(!report.is_valid());
/// ```
pub fn validate_register_input(
    username: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> ValidationReport {
    let mut report = ValidationReport::default();

    if username.trim().is_empty() {
        report.add("username", "Username must not be empty");
    }

    if email.trim().is_empty() {
        report.add("email", "Email must not be empty");
    } else if !EMAIL_REGEX.is_match(email) {
        report.add("email", "Email must be a valid email address");
    }

    if password.is_empty() {
        report.add("password", "Password must not be empty");
    } else if password != confirm_password {
        report.add("confirm_password", "Passwords must match");
    }

    report
}

/// Validates login input: both fields must be non-empty after trimming.
pub fn validate_login_input(username: &str, password: &str) -> ValidationReport {
    let mut report = ValidationReport::default();

    if username.trim().is_empty() {
        report.add("username", "Username must not be empty");
    }

    if password.trim().is_empty() {
        report.add("password", "Password must not be empty");
    }

    report
}
