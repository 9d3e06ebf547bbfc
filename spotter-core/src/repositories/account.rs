use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    Error,
    account::{Account, AccountDraft, MatchProfile},
};

/// Acknowledgment returned by update operations.
///
/// Carries the raw counts the persistence layer reports: how many records
/// matched the filter and how many were actually rewritten. An update
/// against a non-matching filter is a no-op reporting zero matches, not an
/// error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateReport {
    pub matched_count: u64,
    pub modified_count: u64,
}

/// Repository for account data access
///
/// Implementations must provide atomic single-record reads and writes but
/// are not expected to provide isolation across calls; callers that chain a
/// lookup and an insert get no uniqueness guarantee from this contract.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Find an account by username
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, Error>;

    /// Find an account by username, keeping only the named fields
    ///
    /// The password hash is excluded from projections regardless of the
    /// requested field list.
    async fn find_by_username_projected(
        &self,
        username: &str,
        fields: &[&str],
    ) -> Result<Option<Map<String, Value>>, Error>;

    /// All stored accounts
    async fn find_all(&self) -> Result<Vec<Account>, Error>;

    /// Insert a new account, assigning its ID
    async fn insert(&self, draft: AccountDraft) -> Result<Account, Error>;

    /// Replace the profile group of the account matching `username`
    async fn update_by_username(
        &self,
        username: &str,
        profile: MatchProfile,
    ) -> Result<UpdateReport, Error>;

    /// Set the verified flag on the account matching `username`
    ///
    /// The flag is monotonic: once set it is never cleared by this layer.
    async fn update_verified_flag(&self, username: &str) -> Result<UpdateReport, Error>;
}
