//! Port for one-way password hashing.

use crate::domain::{Error, PasswordHash};

use super::define_port_error;

define_port_error! {
    /// Errors raised by password hashing adapters.
    pub enum PasswordHashingError {
        /// The hasher could not produce a hash.
        Hash { message: String } => "password hashing failed: {message}",
        /// A stored hash could not be parsed.
        MalformedHash { message: String } => "stored password hash is malformed: {message}",
    }
}

impl From<PasswordHashingError> for Error {
    fn from(value: PasswordHashingError) -> Self {
        Error::internal(value.to_string())
    }
}

/// Hashes plaintext passwords and verifies them against stored hashes.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Hash `plaintext` with a fresh salt.
    fn hash(&self, plaintext: &str) -> Result<PasswordHash, PasswordHashingError>;

    /// Check `plaintext` against `hash`; `Ok(false)` on mismatch.
    fn verify(&self, plaintext: &str, hash: &PasswordHash) -> Result<bool, PasswordHashingError>;
}
