use std::sync::Arc;

use crate::{
    Error,
    account::MatchProfile,
    error::AuthError,
    repositories::{AccountRepository, UpdateReport},
};

/// Service for the profile-extension workflow
pub struct ProfileService<R: AccountRepository> {
    repository: Arc<R>,
}

impl<R: AccountRepository> ProfileService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Replace an account's matching preferences.
    ///
    /// All five profile fields are overwritten as a group on every call;
    /// an absent input clears its field. There are no partial-update
    /// semantics. Returns the raw update acknowledgment rather than the
    /// updated account, unlike the other workflows.
    pub async fn update_match_profile(
        &self,
        username: &str,
        profile: MatchProfile,
    ) -> Result<UpdateReport, Error> {
        if self
            .repository
            .find_by_username(username)
            .await?
            .is_none()
        {
            return Err(AuthError::UserNotFound.into());
        }

        let report = self.repository.update_by_username(username, profile).await?;
        tracing::info!(username, "match profile updated");
        Ok(report)
    }
}
