//! Mock data handlers.
//!
//! ```text
//! GET  /api/mocks/mockingpets
//! GET  /api/mocks/mockingusers
//! POST /api/mocks/generateData {"users":2,"pets":"3"}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde_json::Value;

use crate::domain::{ApiResult, Error};
use crate::inbound::http::envelope;
use crate::inbound::http::schemas::{ErrorSchema, GeneratedDataResponse, PetsResponse, UsersResponse};
use crate::inbound::http::state::HttpState;

/// Pets returned by `mockingpets`.
pub const MOCK_PET_COUNT: usize = 100;
/// Users returned by `mockingusers`.
pub const MOCK_USER_COUNT: usize = 50;

const MISSING_COUNTS: &str = "Se requieren los parametros users y pets";
const INVALID_COUNTS: &str = "Los parametros deben ser numeros validos";

/// Body for `POST /api/mocks/generateData`; counts may be numbers or
/// numeric strings.
#[derive(utoipa::ToSchema)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct GenerateDataRequest {
    #[schema(example = 2)]
    users: u32,
    #[schema(example = 3)]
    pets: u32,
}

enum CountError {
    Missing,
    Invalid,
}

/// Parse one count. Empty values (absent, `null`, `false`, `0`, `""`) count
/// as missing; a numeric string such as `"0"` does not.
fn count(body: &Value, key: &str) -> Result<usize, CountError> {
    match body.get(key) {
        None | Some(Value::Null | Value::Bool(false)) => Err(CountError::Missing),
        Some(Value::Number(number)) if number.as_u64() == Some(0) => Err(CountError::Missing),
        Some(Value::String(text)) if text.is_empty() => Err(CountError::Missing),
        Some(Value::Number(number)) => number
            .as_u64()
            .and_then(|n| usize::try_from(n).ok())
            .ok_or(CountError::Invalid),
        Some(Value::String(text)) => text.trim().parse().map_err(|_| CountError::Invalid),
        Some(_) => Err(CountError::Invalid),
    }
}

/// Read both counts, reporting a missing key before a malformed one.
fn requested_counts(body: &Value) -> Result<(usize, usize), Error> {
    match (count(body, "users"), count(body, "pets")) {
        (Ok(users), Ok(pets)) => Ok((users, pets)),
        (Err(CountError::Missing), _) | (_, Err(CountError::Missing)) => {
            Err(Error::invalid_request(MISSING_COUNTS))
        }
        _ => Err(Error::invalid_request(INVALID_COUNTS)),
    }
}

/// Generate pets without storing them.
#[utoipa::path(
    get,
    path = "/api/mocks/mockingpets",
    responses((status = 200, description = "100 generated pets", body = PetsResponse)),
    tags = ["mocks"],
    operation_id = "mockingPets"
)]
#[get("/mocks/mockingpets")]
pub async fn mocking_pets(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let pets = state.mocks.mock_pets(MOCK_PET_COUNT).await?;
    Ok(envelope::payload(pets))
}

/// Generate users without storing them.
#[utoipa::path(
    get,
    path = "/api/mocks/mockingusers",
    responses((status = 200, description = "50 generated users", body = UsersResponse)),
    tags = ["mocks"],
    operation_id = "mockingUsers"
)]
#[get("/mocks/mockingusers")]
pub async fn mocking_users(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let users = state.mocks.mock_users(MOCK_USER_COUNT).await?;
    Ok(envelope::payload(users))
}

/// Generate and store the requested number of users and pets.
#[utoipa::path(
    post,
    path = "/api/mocks/generateData",
    request_body = GenerateDataRequest,
    responses(
        (status = 200, description = "Inserted records", body = GeneratedDataResponse),
        (status = 400, description = "Missing or invalid counts", body = ErrorSchema)
    ),
    tags = ["mocks"],
    operation_id = "generateData"
)]
#[post("/mocks/generateData")]
pub async fn generate_data(
    state: web::Data<HttpState>,
    payload: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    let (users, pets) = requested_counts(&payload)?;
    let generated = state.mocks.generate_data(users, pets).await?;
    let message = format!(
        "Se insertaron {} usuarios y {} mascotas",
        generated.users.len(),
        generated.pets.len()
    );
    Ok(envelope::message_with_payload(&message, generated))
}
