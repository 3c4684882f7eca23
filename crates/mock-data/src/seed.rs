//! Generated record shapes.

use chrono::NaiveDate;

/// A generated pet, ready to be mapped onto a stored pet record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PetSeed {
    /// Pet name drawn from the first-name corpus.
    pub name: String,
    /// Species, one of [`crate::PET_SPECIES`].
    pub specie: &'static str,
    /// Birth date within the last ten years of the reference date.
    pub birth_date: NaiveDate,
}

/// Role assigned to a generated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoleSeed {
    /// Regular account.
    User,
    /// Administrative account.
    Admin,
}

impl RoleSeed {
    /// Lowercase role label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

/// A generated user without credentials.
///
/// Callers attach the hashed mock password when persisting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSeed {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Email address on the `test.com` domain, unique within its batch.
    pub email: String,
    /// Assigned role.
    pub role: RoleSeed,
}
