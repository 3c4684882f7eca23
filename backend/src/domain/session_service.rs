//! Registration and login service.
//!
//! Password hashing and verification are CPU bound, so both run on the
//! blocking pool instead of the async worker threads.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{info, warn};
use zeroize::Zeroizing;

use crate::domain::ports::{LoginService, PasswordHasher, RegistrationService, UserRepository};
use crate::domain::{Error, LoginCredentials, PasswordHash, Registration, User, UserId};

/// Implements [`LoginService`] and [`RegistrationService`].
#[derive(Clone)]
pub struct SessionService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    clock: Arc<dyn Clock>,
}

impl SessionService {
    /// Create a service over the user store, a password hasher and a clock
    /// used to stamp `last_connection`.
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            hasher,
            clock,
        }
    }

    async fn hash_password(&self, plaintext: Zeroizing<String>) -> Result<PasswordHash, Error> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.hash(&plaintext))
            .await
            .map_err(|err| Error::internal(format!("password hashing task failed: {err}")))?
            .map_err(Error::from)
    }

    async fn verify_password(&self, plaintext: &str, hash: PasswordHash) -> Result<bool, Error> {
        let hasher = Arc::clone(&self.hasher);
        let plaintext = Zeroizing::new(plaintext.to_owned());
        tokio::task::spawn_blocking(move || hasher.verify(&plaintext, &hash))
            .await
            .map_err(|err| Error::internal(format!("password verification task failed: {err}")))?
            .map_err(Error::from)
    }
}

#[async_trait]
impl LoginService for SessionService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let Some(mut user) = self.users.find_by_email(credentials.email()).await? else {
            return Err(Error::not_found("User doesn't exist"));
        };

        if !self
            .verify_password(credentials.password(), user.password.clone())
            .await?
        {
            warn!(user_id = %user.id, "login rejected: incorrect password");
            return Err(Error::invalid_request("Incorrect password"));
        }

        let now = self.clock.utc();
        if !self.users.record_login(&user.id, now).await? {
            return Err(Error::not_found("User doesn't exist"));
        }
        user.last_connection = Some(now);
        info!(user_id = %user.id, "user logged in");
        Ok(user)
    }
}

#[async_trait]
impl RegistrationService for SessionService {
    async fn register(&self, registration: Registration) -> Result<UserId, Error> {
        if self
            .users
            .find_by_email(&registration.profile().email)
            .await?
            .is_some()
        {
            return Err(Error::invalid_request("User already exists"));
        }

        let (profile, password) = registration.into_parts();
        let hash = self.hash_password(password).await?;
        let user = User::new(UserId::random(), profile, hash);
        self.users.create(&user).await?;
        info!(user_id = %user.id, "user registered");
        Ok(user.id)
    }
}
