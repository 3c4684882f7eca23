//! Seeded pet and user generation.
//!
//! A [`MockGenerator`] wraps a `ChaCha8Rng`. Two generators built from the
//! same seed produce identical batches in identical order.

use std::collections::HashSet;

use chrono::{Days, NaiveDate};
use fake::Fake;
use fake::faker::name::raw::{FirstName, LastName};
use fake::locales::EN;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::GenerationError;
use crate::seed::{PetSeed, RoleSeed, UserSeed};

/// Species assigned to generated pets.
pub const PET_SPECIES: [&str; 5] = ["dog", "cat", "bird", "hamster", "rabbit"];

/// Largest batch accepted by [`MockGenerator::pets`] and [`MockGenerator::users`].
pub const MAX_BATCH_SIZE: usize = 10_000;

/// Oldest generated pet, in days before the reference date (ten years).
pub const MAX_PET_AGE_DAYS: u64 = 3_652;

/// Domain used for every generated email.
const EMAIL_DOMAIN: &str = "test.com";

/// Maximum number of attempts to find an unused email.
const MAX_EMAIL_ATTEMPTS: usize = 50;

/// Upper bound (exclusive) for the numeric suffix added on email collisions.
const EMAIL_SUFFIX_MAX: u32 = 10_000;

/// Local part used when a name sanitises to nothing.
const FALLBACK_LOCAL_PART: &str = "user";

/// Deterministic source of mock pets and users.
///
/// # Example
///
/// ```
/// use mock_data::MockGenerator;
///
/// let mut first = MockGenerator::from_seed(7);
/// let mut second = MockGenerator::from_seed(7);
/// assert_eq!(
///     first.users(5).expect("users"),
///     second.users(5).expect("users"),
/// );
/// ```
#[derive(Debug, Clone)]
pub struct MockGenerator {
    rng: ChaCha8Rng,
}

impl MockGenerator {
    /// Build a generator with a fixed seed.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Build a generator seeded from the operating system.
    #[must_use]
    pub fn from_os_rng() -> Self {
        Self {
            rng: ChaCha8Rng::from_os_rng(),
        }
    }

    /// Generate `count` pets born within ten years before `today`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::BatchTooLarge`] when `count` exceeds
    /// [`MAX_BATCH_SIZE`].
    pub fn pets(
        &mut self,
        count: usize,
        today: NaiveDate,
    ) -> Result<Vec<PetSeed>, GenerationError> {
        ensure_batch_size(count)?;
        Ok((0..count).map(|_| self.next_pet(today)).collect())
    }

    /// Generate `count` users whose emails are unique within the batch.
    ///
    /// Earlier batches are not remembered, so callers persisting users across
    /// batches must handle duplicate emails themselves.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::BatchTooLarge`] when `count` exceeds
    /// [`MAX_BATCH_SIZE`], or [`GenerationError::EmailGenerationFailed`] when
    /// no unused email can be found for a user.
    pub fn users(&mut self, count: usize) -> Result<Vec<UserSeed>, GenerationError> {
        ensure_batch_size(count)?;
        let mut issued = HashSet::with_capacity(count);
        (0..count).map(|_| self.next_user(&mut issued)).collect()
    }

    fn next_pet(&mut self, today: NaiveDate) -> PetSeed {
        let name: String = FirstName(EN).fake_with_rng(&mut self.rng);
        let specie = PET_SPECIES.choose(&mut self.rng).copied().unwrap_or("dog");
        let age_days = self.rng.random_range(1..=MAX_PET_AGE_DAYS);
        let birth_date = today.checked_sub_days(Days::new(age_days)).unwrap_or(today);

        PetSeed {
            name,
            specie,
            birth_date,
        }
    }

    fn next_user(&mut self, issued: &mut HashSet<String>) -> Result<UserSeed, GenerationError> {
        let first_name: String = FirstName(EN).fake_with_rng(&mut self.rng);
        let last_name: String = LastName(EN).fake_with_rng(&mut self.rng);
        let role = if self.rng.random_bool(0.5) {
            RoleSeed::Admin
        } else {
            RoleSeed::User
        };
        let email = self.unique_email(issued, &first_name, &last_name)?;

        Ok(UserSeed {
            first_name,
            last_name,
            email,
            role,
        })
    }

    /// Build `first.last@test.com`, adding a numeric suffix on collision.
    fn unique_email(
        &mut self,
        issued: &mut HashSet<String>,
        first: &str,
        last: &str,
    ) -> Result<String, GenerationError> {
        let base = email_local_part(first, last);
        let mut candidate = format!("{base}@{EMAIL_DOMAIN}");

        for _ in 0..MAX_EMAIL_ATTEMPTS {
            if issued.insert(candidate.clone()) {
                return Ok(candidate);
            }
            let suffix = self.rng.random_range(1..EMAIL_SUFFIX_MAX);
            candidate = format!("{base}{suffix}@{EMAIL_DOMAIN}");
        }

        Err(GenerationError::EmailGenerationFailed {
            max_attempts: MAX_EMAIL_ATTEMPTS,
        })
    }
}

const fn ensure_batch_size(count: usize) -> Result<(), GenerationError> {
    if count > MAX_BATCH_SIZE {
        return Err(GenerationError::BatchTooLarge {
            requested: count,
            max: MAX_BATCH_SIZE,
        });
    }
    Ok(())
}

fn email_local_part(first: &str, last: &str) -> String {
    let sanitise = |part: &str| -> String {
        part.chars()
            .filter(char::is_ascii_alphanumeric)
            .map(|ch| ch.to_ascii_lowercase())
            .collect()
    };
    let pieces: Vec<String> = [sanitise(first), sanitise(last)]
        .into_iter()
        .filter(|piece| !piece.is_empty())
        .collect();

    if pieces.is_empty() {
        FALLBACK_LOCAL_PART.to_owned()
    } else {
        pieces.join(".")
    }
}
