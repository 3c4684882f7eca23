//! Driving port for account registration.

use async_trait::async_trait;

use crate::domain::{Error, Registration, UserId};

/// Use-case port for creating accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Hash the password and store a new `user`-role account.
    ///
    /// Fails with `User already exists` (400) when the email is taken.
    async fn register(&self, registration: Registration) -> Result<UserId, Error>;
}
