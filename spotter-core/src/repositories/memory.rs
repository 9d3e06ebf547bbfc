//! In-memory account repository
//!
//! Backed by a concurrent map keyed by username. Single-record reads and
//! writes are atomic, but nothing serializes a lookup followed by an
//! insert, matching the guarantees the workflows assume of the production
//! store.

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::{Map, Value};

use crate::{
    Error,
    account::{Account, AccountDraft, AccountId, MatchProfile},
    error::StorageError,
    repositories::{AccountRepository, UpdateReport},
};

/// DashMap-backed repository, suitable for tests and demos.
///
/// A second insert under an existing username replaces the record; the
/// store enforces no uniqueness beyond the key itself.
#[derive(Debug, Default)]
pub struct MemoryAccountRepository {
    accounts: DashMap<String, Account>,
}

impl MemoryAccountRepository {
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
        }
    }
}

#[async_trait]
impl AccountRepository for MemoryAccountRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, Error> {
        Ok(self
            .accounts
            .get(username)
            .map(|entry| entry.value().clone()))
    }

    async fn find_by_username_projected(
        &self,
        username: &str,
        fields: &[&str],
    ) -> Result<Option<Map<String, Value>>, Error> {
        let Some(account) = self.accounts.get(username).map(|e| e.value().clone()) else {
            return Ok(None);
        };

        // Serialization drops the password hash, so it can never be
        // projected back out.
        let value =
            serde_json::to_value(&account).map_err(|e| StorageError::Database(e.to_string()))?;
        let Value::Object(full) = value else {
            return Err(StorageError::Database("account serialized to a non-object".into()).into());
        };

        let projected = full
            .into_iter()
            .filter(|(key, _)| fields.contains(&key.as_str()))
            .collect();

        Ok(Some(projected))
    }

    async fn find_all(&self) -> Result<Vec<Account>, Error> {
        let mut accounts: Vec<Account> = self
            .accounts
            .iter()
            .map(|entry| entry.value().clone())
            .collect();

        accounts.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.username.cmp(&b.username))
        });

        Ok(accounts)
    }

    async fn insert(&self, draft: AccountDraft) -> Result<Account, Error> {
        let account = Account::from_draft(AccountId::new_random(), draft);
        self.accounts
            .insert(account.username.clone(), account.clone());
        Ok(account)
    }

    async fn update_by_username(
        &self,
        username: &str,
        profile: MatchProfile,
    ) -> Result<UpdateReport, Error> {
        let Some(mut entry) = self.accounts.get_mut(username) else {
            return Ok(UpdateReport::default());
        };

        let modified = if entry.profile != profile { 1 } else { 0 };
        entry.profile = profile;

        Ok(UpdateReport {
            matched_count: 1,
            modified_count: modified,
        })
    }

    async fn update_verified_flag(&self, username: &str) -> Result<UpdateReport, Error> {
        let Some(mut entry) = self.accounts.get_mut(username) else {
            return Ok(UpdateReport::default());
        };

        let modified = if entry.verified { 0 } else { 1 };
        entry.verified = true;

        Ok(UpdateReport {
            matched_count: 1,
            modified_count: modified,
        })
    }
}
