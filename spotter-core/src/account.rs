//! Account records and identifiers
//!
//! This module contains the core account struct and related types.
//!
//! Accounts are the persisted identity records of the system. The core account
//! struct is defined as follows:
//!
//! | Field           | Type             | Description                                            |
//! | --------------- | ---------------- | ------------------------------------------------------ |
//! | `id`            | `AccountId`      | The unique identifier for the account.                 |
//! | `username`      | `String`         | Unique, case-sensitive, immutable after creation.      |
//! | `email`         | `String`         | Unique, used for verification and notification only.   |
//! | `password_hash` | `String`         | One-way hash of the password, never serialized.        |
//! | `phone_number`  | `Option<String>` | Contact number captured at registration.               |
//! | `created_at`    | `DateTime<Utc>`  | Set once at creation.                                  |
//! | `admin`         | `bool`           | Privilege flag, defaults false.                        |
//! | `verified`      | `bool`           | Email ownership confirmed, false until verification.   |
//! | `email_token`   | `Option<String>` | The verification token issued at registration.         |
//! | `profile`       | `MatchProfile`   | Optional matching preferences, flattened on the wire.  |
//! | `contacts`      | `Vec<AccountId>` | References to other accounts, read-only in this layer. |

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{generate_prefixed_id, validate_prefixed_id};

/// A unique, stable identifier for a specific account
///
/// This value should be treated as opaque. It is assigned by the repository
/// at insert time and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(id: &str) -> Self {
        AccountId(id.to_string())
    }

    pub fn new_random() -> Self {
        AccountId(generate_prefixed_id("acc"))
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validate that this ID has the correct format for an account ID
    pub fn is_valid(&self) -> bool {
        validate_prefixed_id(&self.0, "acc")
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new_random()
    }
}

impl From<String> for AccountId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for AccountId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Matching preferences collected after registration
///
/// All fields stay unset until the account owner submits them. Updates
/// replace the whole group at once, so a submission with missing values
/// clears the corresponding fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchProfile {
    pub time_availability: Option<String>,
    pub gym_name: Option<String>,
    pub gender_preference: Option<String>,
    pub goal_preference: Option<String>,
    pub frequency_preference: Option<String>,
}

/// Representation of a persisted account
///
/// The password hash is carried in memory for credential comparison but is
/// skipped during serialization, so serialized accounts are safe to hand to
/// transport layers as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,

    pub username: String,

    pub email: String,

    #[serde(skip_serializing, default)]
    pub password_hash: String,

    pub phone_number: Option<String>,

    pub created_at: DateTime<Utc>,

    pub admin: bool,

    pub verified: bool,

    pub email_token: Option<String>,

    #[serde(flatten)]
    pub profile: MatchProfile,

    #[serde(default)]
    pub contacts: Vec<AccountId>,
}

impl Account {
    /// Materialize an account from a draft, with the repository-assigned ID.
    ///
    /// New accounts always start unverified and without the admin flag; no
    /// code path in this layer sets `admin` to true.
    pub fn from_draft(id: AccountId, draft: AccountDraft) -> Self {
        Account {
            id,
            username: draft.username,
            email: draft.email,
            password_hash: draft.password_hash,
            phone_number: draft.phone_number,
            created_at: draft.created_at,
            admin: false,
            verified: false,
            email_token: draft.email_token,
            profile: MatchProfile::default(),
            contacts: Vec::new(),
        }
    }
}

/// The fields a caller supplies when inserting a new account
///
/// The repository assigns the ID; everything else is fixed here. `created_at`
/// defaults to the construction instant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountDraft {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub phone_number: Option<String>,
    pub email_token: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl AccountDraft {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        AccountDraft {
            username: username.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            phone_number: None,
            email_token: None,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_id() {
        let account_id = AccountId::new("test");
        assert_eq!(account_id.as_str(), "test");

        let account_id_from_str = AccountId::from(account_id.as_str());
        assert_eq!(account_id_from_str, account_id);

        let account_id_random = AccountId::new_random();
        assert_ne!(account_id_random, account_id);
    }

    #[test]
    fn test_account_id_prefixed() {
        let account_id = AccountId::new_random();
        assert!(account_id.as_str().starts_with("acc_"));
        assert!(account_id.is_valid());

        let account_id2 = AccountId::new_random();
        assert_ne!(account_id, account_id2);

        let invalid_id = AccountId::new("invalid");
        assert!(!invalid_id.is_valid());
    }

    #[test]
    fn test_from_draft_defaults() {
        let mut draft = AccountDraft::new("alice", "alice@example.com", "$2b$12$hash");
        draft.phone_number = Some("805-555-0100".into());
        draft.email_token = Some("signed-token".into());

        let account = Account::from_draft(AccountId::new_random(), draft);
        assert_eq!(account.username, "alice");
        assert_eq!(account.email, "alice@example.com");
        assert!(!account.admin);
        assert!(!account.verified);
        assert_eq!(account.profile, MatchProfile::default());
        assert!(account.contacts.is_empty());
        assert_eq!(account.phone_number.as_deref(), Some("805-555-0100"));
        assert_eq!(account.email_token.as_deref(), Some("signed-token"));
    }

    #[test]
    fn test_password_hash_never_serialized() {
        let account = Account::from_draft(
            AccountId::new_random(),
            AccountDraft::new("bob", "bob@example.com", "$2b$12$secret"),
        );

        let json = serde_json::to_value(&account).unwrap();
        let object = json.as_object().unwrap();
        assert!(!object.contains_key("password_hash"));
        assert_eq!(object["username"], "bob");

        // Profile fields are flattened onto the top-level object
        assert!(object.contains_key("gym_name"));
        assert!(object["gym_name"].is_null());
    }

    #[test]
    fn test_account_deserializes_without_hash() {
        let account = Account::from_draft(
            AccountId::new_random(),
            AccountDraft::new("carol", "carol@example.com", "$2b$12$secret"),
        );

        let json = serde_json::to_string(&account).unwrap();
        let restored: Account = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.username, account.username);
        assert_eq!(restored.password_hash, "");
    }
}
