//! Driving port for login.
//!
//! Inbound adapters call it to authenticate credentials without knowing the
//! backing store, so handler tests can substitute a double.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, User};

/// Use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Verify credentials, stamp the login time and return the user.
    ///
    /// Fails with `User doesn't exist` (404) or `Incorrect password` (400).
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error>;
}
