//! Short, non-reversible identifier for the active session key.
//!
//! Logged at start-up so operators can tell which key a replica loaded
//! without the key material reaching the logs.

use std::fmt;

use actix_web::cookie::Key;
use sha2::{Digest, Sha256};

const FINGERPRINT_BYTES: usize = 8;

/// Truncated SHA-256 digest of a key's signing half, shown as hex.
///
/// # Examples
///
/// ```rust
/// use actix_web::cookie::Key;
/// use adoptme::inbound::http::session_config::fingerprint::KeyFingerprint;
///
/// let fingerprint = KeyFingerprint::of(&Key::generate()).to_string();
/// assert_eq!(fingerprint.len(), 16);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyFingerprint([u8; FINGERPRINT_BYTES]);

impl KeyFingerprint {
    /// Fingerprint `key`.
    #[must_use]
    pub fn of(key: &Key) -> Self {
        let digest = Sha256::digest(key.signing());
        let mut prefix = [0_u8; FINGERPRINT_BYTES];
        prefix.copy_from_slice(&digest[..FINGERPRINT_BYTES]);
        Self(prefix)
    }
}

impl fmt::Display for KeyFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}
