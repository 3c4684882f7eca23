//! Driving port for reading users.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Read-side port for users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Every registered user.
    async fn list_users(&self) -> Result<Vec<User>, Error>;

    /// A single user, or `User not found` (404).
    async fn get_user(&self, id: &UserId) -> Result<User, Error>;
}
