//! Behavioural tests for the mock-data crate.
//!
//! These scenarios cover seeded determinism, the shape of generated pets and
//! users, and the batch size guard.

// `expect` is idiomatic in test code for failing fast on precondition violations.
#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use std::collections::HashSet;

use chrono::{Days, NaiveDate};
use mock_data::{
    GenerationError, MAX_PET_AGE_DAYS, MockGenerator, PET_SPECIES, PetSeed, UserSeed,
};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};

/// Reference date used for pet birth dates.
fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid reference date")
}

/// Test world holding generators and their output.
#[derive(Default, ScenarioState)]
struct World {
    generator: Slot<MockGenerator>,
    second_generator: Slot<MockGenerator>,
    pets: Slot<Vec<PetSeed>>,
    second_pets: Slot<Vec<PetSeed>>,
    users: Slot<Vec<UserSeed>>,
    failure: Slot<GenerationError>,
}

impl World {
    fn generator(&self) -> MockGenerator {
        self.generator.get().expect("generator should be set")
    }

    fn pets(&self) -> Vec<PetSeed> {
        self.pets.get().expect("pets should be generated")
    }

    fn users(&self) -> Vec<UserSeed> {
        self.users.get().expect("users should be generated")
    }
}

#[fixture]
fn world() -> World {
    World::default()
}

#[given("a mock generator seeded with {seed:u64}")]
fn a_mock_generator_seeded_with(world: &World, seed: u64) {
    world.generator.set(MockGenerator::from_seed(seed));
}

#[given("a second mock generator seeded with {seed:u64}")]
fn a_second_mock_generator_seeded_with(world: &World, seed: u64) {
    world.second_generator.set(MockGenerator::from_seed(seed));
}

#[when("both generators produce {count:usize} pets")]
fn both_generators_produce_pets(world: &World, count: usize) {
    let mut first = world.generator();
    let mut second = world
        .second_generator
        .get()
        .expect("second generator should be set");
    world
        .pets
        .set(first.pets(count, today()).expect("first batch"));
    world
        .second_pets
        .set(second.pets(count, today()).expect("second batch"));
}

#[when("the generator produces {count:usize} pets")]
fn the_generator_produces_pets(world: &World, count: usize) {
    let mut generator = world.generator();
    world
        .pets
        .set(generator.pets(count, today()).expect("pets generated"));
}

#[when("the generator produces {count:usize} users")]
fn the_generator_produces_users(world: &World, count: usize) {
    let mut generator = world.generator();
    world
        .users
        .set(generator.users(count).expect("users generated"));
}

#[when("the generator is asked for {count:usize} pets")]
fn the_generator_is_asked_for_pets(world: &World, count: usize) {
    let mut generator = world.generator();
    let err = generator
        .pets(count, today())
        .expect_err("oversized batch should fail");
    world.failure.set(err);
}

#[then("the two pet batches are identical")]
fn the_two_pet_batches_are_identical(world: &World) {
    let second = world.second_pets.get().expect("second batch");
    assert_eq!(world.pets(), second);
}

#[then("every pet has a known species")]
fn every_pet_has_a_known_species(world: &World) {
    for pet in world.pets() {
        assert!(PET_SPECIES.contains(&pet.specie), "unknown species: {pet:?}");
    }
}

#[then("every pet was born within the last ten years")]
fn every_pet_was_born_within_the_last_ten_years(world: &World) {
    let oldest = today()
        .checked_sub_days(Days::new(MAX_PET_AGE_DAYS))
        .expect("valid date");
    for pet in world.pets() {
        assert!(pet.birth_date >= oldest && pet.birth_date < today(), "{pet:?}");
    }
}

#[then("every user email is unique")]
fn every_user_email_is_unique(world: &World) {
    let users = world.users();
    let emails: HashSet<_> = users.iter().map(|user| user.email.as_str()).collect();
    assert_eq!(emails.len(), users.len());
}

#[then("every user email uses the test domain")]
fn every_user_email_uses_the_test_domain(world: &World) {
    for user in world.users() {
        assert!(
            user.email.ends_with("@test.com"),
            "unexpected email {}",
            user.email
        );
    }
}

#[then("generation fails because the batch is too large")]
fn generation_fails_because_the_batch_is_too_large(world: &World) {
    let failure = world.failure.get().expect("failure recorded");
    assert!(matches!(failure, GenerationError::BatchTooLarge { .. }));
}

#[scenario(
    path = "tests/features/mock_data.feature",
    name = "Seeded generators produce identical pets"
)]
fn seeded_generators_produce_identical_pets(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/mock_data.feature",
    name = "Generated pets are adoptable animals"
)]
fn generated_pets_are_adoptable_animals(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/mock_data.feature",
    name = "Generated users have unique test emails"
)]
fn generated_users_have_unique_test_emails(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/mock_data.feature",
    name = "Oversized batches are rejected"
)]
fn oversized_batches_are_rejected(world: World) {
    let _ = world;
}
