//! Behaviour tests for the mock data endpoints.
//!
//! Previews must leave the store untouched, inserted data must be usable
//! through the regular endpoints, and a fixed seed must replay the same data.
//
// rstest-bdd generates guard variables with double underscores, which trips
// the non_snake_case lint under -D warnings.
#![allow(non_snake_case)]

// Shared harness has helpers used by other integration suites.
#[allow(dead_code)]
#[path = "support/http_app.rs"]
mod http_app;

use std::cell::RefCell;

use actix_web::http::StatusCode;
use actix_web::test::TestRequest;
use adoptme::domain::MOCK_PASSWORD;
use http_app::{Reply, TestApp};
use mock_data::PET_SPECIES;
use rstest::fixture;
use rstest_bdd_macros::{scenario, then, when};
use serde_json::{Value, json};

struct MockWorld {
    app: TestApp,
    last: RefCell<Option<Reply>>,
}

impl MockWorld {
    fn new() -> Self {
        Self {
            app: TestApp::new(),
            last: RefCell::new(None),
        }
    }

    fn record(&self, reply: Reply) {
        *self.last.borrow_mut() = Some(reply);
    }

    fn payload(&self) -> Vec<Value> {
        let last = self.last.borrow();
        let reply = last.as_ref().expect("a request was sent");
        assert_eq!(reply.status, StatusCode::OK, "body: {:?}", reply.body);
        reply.body["payload"]
            .as_array()
            .cloned()
            .expect("payload list")
    }

    fn stored(&self, uri: &str) -> Vec<Value> {
        let reply = self.app.send(TestRequest::get().uri(uri));
        assert_eq!(reply.status, StatusCode::OK);
        reply.body["payload"]
            .as_array()
            .cloned()
            .expect("stored list")
    }
}

fn pet_fingerprint(pets: &[Value]) -> Vec<(Value, Value, Value)> {
    pets.iter()
        .map(|pet| {
            (
                pet["name"].clone(),
                pet["specie"].clone(),
                pet["birthDate"].clone(),
            )
        })
        .collect()
}

#[fixture]
fn world() -> MockWorld {
    MockWorld::new()
}

#[when("the client requests mock pets")]
fn the_client_requests_mock_pets(world: &MockWorld) {
    world.record(world.app.send(TestRequest::get().uri("/api/mocks/mockingpets")));
}

#[when("the client requests mock users")]
fn the_client_requests_mock_users(world: &MockWorld) {
    world.record(world.app.send(TestRequest::get().uri("/api/mocks/mockingusers")));
}

#[when("the client generates {users} users and {pets} pets")]
fn the_client_generates(world: &MockWorld, users: usize, pets: usize) {
    world.record(
        world.app.send(
            TestRequest::post()
                .uri("/api/mocks/generateData")
                .set_json(json!({ "users": users, "pets": pets.to_string() })),
        ),
    );
}

#[when("the client generates data without counts")]
fn the_client_generates_without_counts(world: &MockWorld) {
    world.record(
        world.app.send(
            TestRequest::post()
                .uri("/api/mocks/generateData")
                .set_json(json!({})),
        ),
    );
}

#[then("{count} pets are returned with known species")]
fn pets_are_returned(world: &MockWorld, count: usize) {
    let pets = world.payload();
    assert_eq!(pets.len(), count);
    for pet in &pets {
        let specie = pet["specie"].as_str().expect("specie");
        assert!(PET_SPECIES.contains(&specie), "unknown species {specie}");
        assert_eq!(pet["adopted"], false);
    }
}

#[then("{count} users are returned with hashed passwords")]
fn users_are_returned(world: &MockWorld, count: usize) {
    let users = world.payload();
    assert_eq!(users.len(), count);
    for user in &users {
        let hash = user["password"].as_str().expect("password hash");
        assert!(hash.starts_with("$argon2id$"), "unexpected hash {hash}");
        assert_ne!(hash, MOCK_PASSWORD);
        assert_eq!(user["pets"], json!([]));
    }
}

#[then("no pets are stored")]
fn no_pets_are_stored(world: &MockWorld) {
    assert!(world.stored("/api/pets").is_empty());
}

#[then("no users are stored")]
fn no_users_are_stored(world: &MockWorld) {
    assert!(world.stored("/api/users").is_empty());
}

#[then("a second server with the same seed previews the same pets")]
fn a_second_server_previews_the_same_pets(world: &MockWorld) {
    let first = pet_fingerprint(&world.payload());
    let replay = TestApp::new().send(TestRequest::get().uri("/api/mocks/mockingpets"));
    let replayed = replay.body["payload"]
        .as_array()
        .cloned()
        .expect("replayed pets");
    assert_eq!(first, pet_fingerprint(&replayed));
}

#[then("the response reports {users} users and {pets} pets inserted")]
fn the_response_reports_inserted(world: &MockWorld, users: usize, pets: usize) {
    let last = world.last.borrow();
    let reply = last.as_ref().expect("a request was sent");
    assert_eq!(reply.status, StatusCode::OK, "body: {:?}", reply.body);
    assert_eq!(
        reply.body["message"],
        format!("Se insertaron {users} usuarios y {pets} mascotas")
    );
    assert_eq!(reply.body["payload"]["users"].as_array().map(Vec::len), Some(users));
    assert_eq!(reply.body["payload"]["pets"].as_array().map(Vec::len), Some(pets));
}

#[then("{users} users and {pets} pets are stored")]
fn users_and_pets_are_stored(world: &MockWorld, users: usize, pets: usize) {
    assert_eq!(world.stored("/api/users").len(), users);
    assert_eq!(world.stored("/api/pets").len(), pets);
}

#[then("a generated user can log in with the mock password")]
fn a_generated_user_can_log_in(world: &MockWorld) {
    let users = world.stored("/api/users");
    let email = users[0]["email"].as_str().expect("email").to_owned();
    let reply = world.app.send(
        TestRequest::post()
            .uri("/api/sessions/login")
            .set_json(json!({ "email": email, "password": MOCK_PASSWORD })),
    );
    assert_eq!(reply.status, StatusCode::OK, "login: {:?}", reply.body);
}

#[then("the generation is rejected")]
fn the_generation_is_rejected(world: &MockWorld) {
    let last = world.last.borrow();
    let reply = last.as_ref().expect("a request was sent");
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["error"], "Se requieren los parametros users y pets");
    drop(last);
    assert!(world.stored("/api/users").is_empty());
}

#[scenario(path = "tests/features/mock_generation.feature")]
fn mock_generation_scenarios(world: MockWorld) {
    drop(world);
}
