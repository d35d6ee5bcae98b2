use anyhow::anyhow;
use uuid::Uuid;

use crate::domain::repository::UserRepository;
use crate::domain::types::{ProfileChanges, User};
use crate::error::AuthServiceError;

pub struct UpdateProfileUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> UpdateProfileUseCase<R> {
    /// Apply the present fields and return the stored record afterwards.
    pub async fn execute(
        &self,
        user_id: Uuid,
        changes: ProfileChanges,
    ) -> Result<User, AuthServiceError> {
        if changes.is_empty() {
            return Err(AuthServiceError::NoRecordModified);
        }

        let modified = self.repo.update_profile(user_id, &changes).await?;
        if modified == 0 {
            return Err(AuthServiceError::NoRecordModified);
        }

        let user = self
            .repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| anyhow!("user {user_id} missing after profile update"))?;
        tracing::info!(user_id = %user_id, "profile updated");
        Ok(user)
    }
}
