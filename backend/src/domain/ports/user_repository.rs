//! Port abstraction for user persistence adapters and their errors.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Email, Error, User, UserDocument, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Another user already owns the email address.
        DuplicateEmail { email: String } => "email already registered: {email}",
    }
}

impl From<UserPersistenceError> for Error {
    fn from(value: UserPersistenceError) -> Self {
        match value {
            UserPersistenceError::Connection { message } => Error::service_unavailable(message),
            UserPersistenceError::Query { message } => Error::internal(message),
            UserPersistenceError::DuplicateEmail { .. } => {
                Error::invalid_request("User already exists")
            }
        }
    }
}

/// Identity store.
///
/// Mutating methods that target a single user return `Ok(false)` when the
/// user does not exist.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user; fails with `DuplicateEmail` when the email is taken.
    async fn create(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by email address.
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserPersistenceError>;

    /// List every user in insertion order.
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Replace the profile fields (names, email, role) of an existing user.
    async fn update_profile(&self, user: &User) -> Result<bool, UserPersistenceError>;

    /// Delete a user and return any pets they owned to the adoptable pool.
    async fn delete(&self, id: &UserId) -> Result<bool, UserPersistenceError>;

    /// Stamp the user's last successful login.
    async fn record_login(
        &self,
        id: &UserId,
        at: DateTime<Utc>,
    ) -> Result<bool, UserPersistenceError>;

    /// Append uploaded documents to the user's document list.
    async fn append_documents(
        &self,
        id: &UserId,
        documents: &[UserDocument],
    ) -> Result<bool, UserPersistenceError>;
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;

    #[rstest]
    #[case(UserPersistenceError::connection("down"), ErrorCode::ServiceUnavailable)]
    #[case(UserPersistenceError::query("bad sql"), ErrorCode::InternalError)]
    #[case(UserPersistenceError::duplicate_email("a@b.c"), ErrorCode::InvalidRequest)]
    fn maps_to_domain_codes(#[case] error: UserPersistenceError, #[case] code: ErrorCode) {
        assert_eq!(Error::from(error).code(), code);
    }

    #[rstest]
    fn duplicate_email_reports_existing_user() {
        let error = Error::from(UserPersistenceError::duplicate_email("a@b.c"));
        assert_eq!(error.message(), "User already exists");
    }
}
