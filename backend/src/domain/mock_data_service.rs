//! Mock data generation service.
//!
//! Wraps a seeded [`MockGenerator`] and maps its seeds onto domain users and
//! pets. Every generated user shares the [`MOCK_PASSWORD`] credential; it is
//! hashed once per batch.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mock_data::{GenerationError, MockGenerator, PetSeed, RoleSeed, UserSeed};
use mockable::Clock;
use tracing::{debug, info};

use crate::domain::ports::{
    GeneratedData, MockDataCommand, PasswordHasher, PetRepository, UserPersistenceError,
    UserRepository,
};
use crate::domain::{
    Email, Error, NewPet, PasswordHash, Pet, PetId, Role, User, UserId, UserProfile,
};

/// Plaintext password shared by every generated user.
pub const MOCK_PASSWORD: &str = "coder123";

/// Replacement draws allowed when a generated email is already stored.
const MAX_EMAIL_REPLACEMENTS: usize = 5;

/// Implements [`MockDataCommand`].
#[derive(Clone)]
pub struct MockDataService {
    users: Arc<dyn UserRepository>,
    pets: Arc<dyn PetRepository>,
    hasher: Arc<dyn PasswordHasher>,
    clock: Arc<dyn Clock>,
    generator: Arc<Mutex<MockGenerator>>,
}

impl MockDataService {
    /// Create a service drawing from `generator`.
    pub fn new(
        users: Arc<dyn UserRepository>,
        pets: Arc<dyn PetRepository>,
        hasher: Arc<dyn PasswordHasher>,
        clock: Arc<dyn Clock>,
        generator: MockGenerator,
    ) -> Self {
        Self {
            users,
            pets,
            hasher,
            clock,
            generator: Arc::new(Mutex::new(generator)),
        }
    }

    fn with_generator<T>(
        &self,
        draw: impl FnOnce(&mut MockGenerator) -> Result<T, GenerationError>,
    ) -> Result<T, Error> {
        let mut generator = self
            .generator
            .lock()
            .map_err(|_| Error::internal("mock generator lock poisoned"))?;
        draw(&mut generator).map_err(map_generation_error)
    }

    fn draw_pets(&self, count: usize) -> Result<Vec<Pet>, Error> {
        let today = self.clock.utc().date_naive();
        let seeds = self.with_generator(|generator| generator.pets(count, today))?;
        Ok(seeds.into_iter().map(pet_from_seed).collect())
    }

    fn draw_users(&self, count: usize, password: &PasswordHash) -> Result<Vec<User>, Error> {
        let seeds = self.with_generator(|generator| generator.users(count))?;
        seeds
            .into_iter()
            .map(|seed| user_from_seed(seed, password.clone()))
            .collect()
    }

    async fn mock_password_hash(&self) -> Result<PasswordHash, Error> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.hash(MOCK_PASSWORD))
            .await
            .map_err(|err| Error::internal(format!("password hashing task failed: {err}")))?
            .map_err(Error::from)
    }

    /// Store `user`, drawing a fresh user whenever the email is taken.
    async fn insert_user(&self, mut user: User, password: &PasswordHash) -> Result<User, Error> {
        for _ in 0..MAX_EMAIL_REPLACEMENTS {
            match self.users.create(&user).await {
                Ok(()) => return Ok(user),
                Err(UserPersistenceError::DuplicateEmail { email }) => {
                    debug!(%email, "generated email already stored; drawing a replacement");
                    let mut replacement = self.draw_users(1, password)?;
                    user = replacement
                        .pop()
                        .ok_or_else(|| Error::internal("mock generator returned no user"))?;
                }
                Err(err) => return Err(err.into()),
            }
        }
        match self.users.create(&user).await {
            Ok(()) => Ok(user),
            Err(UserPersistenceError::DuplicateEmail { email }) => Err(Error::internal(format!(
                "no unused email after {MAX_EMAIL_REPLACEMENTS} replacement draws; last tried {email}"
            ))),
            Err(err) => Err(err.into()),
        }
    }
}

#[async_trait]
impl MockDataCommand for MockDataService {
    async fn mock_pets(&self, count: usize) -> Result<Vec<Pet>, Error> {
        self.draw_pets(count)
    }

    async fn mock_users(&self, count: usize) -> Result<Vec<User>, Error> {
        let password = self.mock_password_hash().await?;
        self.draw_users(count, &password)
    }

    async fn generate_data(&self, users: usize, pets: usize) -> Result<GeneratedData, Error> {
        let password = self.mock_password_hash().await?;
        let drafted_users = self.draw_users(users, &password)?;
        let drafted_pets = self.draw_pets(pets)?;

        let mut stored = GeneratedData {
            users: Vec::with_capacity(drafted_users.len()),
            pets: Vec::with_capacity(drafted_pets.len()),
        };
        for user in drafted_users {
            stored.users.push(self.insert_user(user, &password).await?);
        }
        for pet in drafted_pets {
            self.pets.create(&pet).await?;
            stored.pets.push(pet);
        }

        info!(
            users = stored.users.len(),
            pets = stored.pets.len(),
            "mock data inserted"
        );
        Ok(stored)
    }
}

fn map_generation_error(error: GenerationError) -> Error {
    match error {
        GenerationError::BatchTooLarge { .. } => Error::invalid_request(error.to_string()),
        GenerationError::EmailGenerationFailed { .. } => Error::internal(error.to_string()),
    }
}

fn pet_from_seed(seed: PetSeed) -> Pet {
    Pet::new(
        PetId::random(),
        NewPet {
            name: seed.name,
            specie: seed.specie.to_owned(),
            birth_date: seed.birth_date,
            image: String::new(),
        },
    )
}

fn user_from_seed(seed: UserSeed, password: PasswordHash) -> Result<User, Error> {
    let email = Email::new(&seed.email)
        .map_err(|err| Error::internal(format!("generated email rejected: {err}")))?;
    let role = match seed.role {
        RoleSeed::User => Role::User,
        RoleSeed::Admin => Role::Admin,
    };
    let profile = UserProfile {
        first_name: seed.first_name,
        last_name: seed.last_name,
        email,
        role,
    };
    Ok(User::new(UserId::random(), profile, password))
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
    use mock_data::{MAX_BATCH_SIZE, PET_SPECIES};

    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{MockPasswordHasher, MockPetRepository, MockUserRepository};

    struct FixtureClock;

    fn fixture_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0)
            .single()
            .expect("valid fixture timestamp")
    }

    impl Clock for FixtureClock {
        fn local(&self) -> DateTime<Local> {
            fixture_now().with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            fixture_now()
        }
    }

    fn hasher() -> MockPasswordHasher {
        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_hash()
            .withf(|plaintext| plaintext == MOCK_PASSWORD)
            .returning(|_| Ok(PasswordHash::from_encoded("$argon2id$mock")));
        hasher
    }

    fn service(users: MockUserRepository, pets: MockPetRepository, seed: u64) -> MockDataService {
        MockDataService::new(
            Arc::new(users),
            Arc::new(pets),
            Arc::new(hasher()),
            Arc::new(FixtureClock),
            MockGenerator::from_seed(seed),
        )
    }

    #[tokio::test]
    async fn mock_pets_are_unadopted_and_recent() {
        let pets = service(MockUserRepository::new(), MockPetRepository::new(), 3)
            .mock_pets(100)
            .await
            .expect("pets generated");

        let today = fixture_now().date_naive();
        let oldest = today - chrono::Days::new(mock_data::MAX_PET_AGE_DAYS);
        assert_eq!(pets.len(), 100);
        assert!(pets.iter().all(|pet| !pet.is_adopted() && pet.image.is_empty()));
        assert!(pets.iter().all(|pet| PET_SPECIES.contains(&pet.specie.as_str())));
        assert!(
            pets.iter()
                .all(|pet| pet.birth_date >= oldest && pet.birth_date < today)
        );
    }

    #[tokio::test]
    async fn mock_users_share_hashed_password_and_own_no_pets() {
        let mut users = MockUserRepository::new();
        users.expect_create().never();

        let generated = service(users, MockPetRepository::new(), 3)
            .mock_users(50)
            .await
            .expect("users generated");

        assert_eq!(generated.len(), 50);
        assert!(generated.iter().all(|user| user.pets.is_empty()));
        assert!(
            generated
                .iter()
                .all(|user| user.password.as_str() == "$argon2id$mock")
        );
        assert!(
            generated
                .iter()
                .all(|user| user.email.as_str().ends_with("@test.com"))
        );
    }

    #[tokio::test]
    async fn same_seed_produces_same_pets() {
        let first = service(MockUserRepository::new(), MockPetRepository::new(), 11)
            .mock_pets(5)
            .await
            .expect("pets generated");
        let second = service(MockUserRepository::new(), MockPetRepository::new(), 11)
            .mock_pets(5)
            .await
            .expect("pets generated");

        let names = |pets: &[Pet]| -> Vec<(String, String, NaiveDate)> {
            pets.iter()
                .map(|pet| (pet.name.clone(), pet.specie.clone(), pet.birth_date))
                .collect()
        };
        assert_eq!(names(&first), names(&second));
    }

    #[tokio::test]
    async fn generate_data_stores_every_record() {
        let mut users = MockUserRepository::new();
        users.expect_create().times(3).returning(|_| Ok(()));
        let mut pets = MockPetRepository::new();
        pets.expect_create().times(4).returning(|_| Ok(()));

        let data = service(users, pets, 5)
            .generate_data(3, 4)
            .await
            .expect("data generated");

        assert_eq!(data.users.len(), 3);
        assert_eq!(data.pets.len(), 4);
    }

    #[tokio::test]
    async fn generate_data_replaces_users_with_taken_emails() {
        let mut users = MockUserRepository::new();
        let mut seq = mockall::Sequence::new();
        users
            .expect_create()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|user| {
                Err(UserPersistenceError::duplicate_email(
                    user.email.as_str().to_owned(),
                ))
            });
        users
            .expect_create()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        let data = service(users, MockPetRepository::new(), 5)
            .generate_data(1, 0)
            .await
            .expect("data generated");

        assert_eq!(data.users.len(), 1);
    }

    #[tokio::test]
    async fn exhausted_email_replacements_are_an_internal_error() {
        let mut users = MockUserRepository::new();
        users
            .expect_create()
            .times(MAX_EMAIL_REPLACEMENTS + 1)
            .returning(|user| {
                Err(UserPersistenceError::duplicate_email(
                    user.email.as_str().to_owned(),
                ))
            });

        let error = service(users, MockPetRepository::new(), 5)
            .generate_data(1, 0)
            .await
            .expect_err("no free email");

        assert_eq!(error.code(), ErrorCode::InternalError);
        assert_ne!(error.message(), "User already exists");
    }

    #[tokio::test]
    async fn oversized_batch_is_invalid_request() {
        let error = service(MockUserRepository::new(), MockPetRepository::new(), 1)
            .mock_pets(MAX_BATCH_SIZE + 1)
            .await
            .expect_err("too large");

        assert_eq!(error.code(), ErrorCode::InvalidRequest);
    }
}
