//! Driving port for user mutations.

use async_trait::async_trait;

use crate::domain::{Error, UploadedFile, UserChanges, UserDocument, UserId};

/// Write-side port for users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Apply a partial profile update.
    async fn update_user(&self, id: &UserId, changes: UserChanges) -> Result<(), Error>;

    /// Remove a user.
    async fn delete_user(&self, id: &UserId) -> Result<(), Error>;

    /// Store uploaded files and attach them to the user.
    async fn upload_documents(
        &self,
        id: &UserId,
        files: Vec<UploadedFile>,
    ) -> Result<Vec<UserDocument>, Error>;
}
