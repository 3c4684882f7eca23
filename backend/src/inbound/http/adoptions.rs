//! Adoption API handlers.
//!
//! ```text
//! GET  /api/adoptions
//! GET  /api/adoptions/{aid}
//! POST /api/adoptions/{uid}/{pid}
//! ```
//!
//! The adopt route resolves the user before it looks at the pet id: an
//! unknown user is reported as `user Not found` even when the pet id is
//! malformed.

use actix_web::{HttpResponse, get, post, web};

use crate::domain::{AdoptionError, AdoptionId, ApiResult, Error, ErrorCode, PetId, UserId};
use crate::inbound::http::envelope;
use crate::inbound::http::schemas::{
    AdoptionResponse, AdoptionsResponse, ErrorSchema, MessageResponse,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{ADOPTION_ID, PET_ID, USER_ID, parse_id};

/// List every adoption record.
#[utoipa::path(
    get,
    path = "/api/adoptions",
    responses(
        (status = 200, description = "Adoptions, empty when none exist", body = AdoptionsResponse),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["adoptions"],
    operation_id = "listAdoptions"
)]
#[get("/adoptions")]
pub async fn list_adoptions(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let adoptions = state.adoptions_query.list_adoptions().await?;
    Ok(envelope::payload(adoptions))
}

/// Fetch one adoption record.
#[utoipa::path(
    get,
    path = "/api/adoptions/{aid}",
    params(("aid" = String, Path, description = "Adoption id")),
    responses(
        (status = 200, description = "Adoption", body = AdoptionResponse),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 404, description = "Adoption not found", body = ErrorSchema)
    ),
    tags = ["adoptions"],
    operation_id = "getAdoption"
)]
#[get("/adoptions/{aid}")]
pub async fn get_adoption(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id: AdoptionId = parse_id(&path, ADOPTION_ID)?;
    let adoption = state.adoptions_query.get_adoption(&id).await?;
    Ok(envelope::payload(adoption))
}

/// Adopt a pet on behalf of a user.
#[utoipa::path(
    post,
    path = "/api/adoptions/{uid}/{pid}",
    params(
        ("uid" = String, Path, description = "Adopting user id"),
        ("pid" = String, Path, description = "Pet id")
    ),
    responses(
        (status = 200, description = "Pet adopted", body = MessageResponse),
        (status = 400, description = "Pet is already adopted or malformed id", body = ErrorSchema),
        (status = 404, description = "User or pet not found", body = ErrorSchema)
    ),
    tags = ["adoptions"],
    operation_id = "adoptPet"
)]
#[post("/adoptions/{uid}/{pid}")]
pub async fn adopt_pet(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let (uid, pid) = path.into_inner();
    let user: UserId = parse_id(&uid, USER_ID)?;
    let pet: PetId = match parse_id(&pid, PET_ID) {
        Ok(pet) => pet,
        Err(malformed) => return Err(adopter_error(&state, &user, malformed).await),
    };
    state.adoptions.adopt_pet(&user, &pet).await?;
    Ok(envelope::message("Pet adopted"))
}

/// Error for a malformed pet id, unless the adopter is missing first.
async fn adopter_error(state: &HttpState, user: &UserId, malformed: Error) -> Error {
    match state.users.get_user(user).await {
        Ok(_) => malformed,
        Err(err) if err.code() == ErrorCode::NotFound => AdoptionError::UserNotFound.into(),
        Err(err) => err,
    }
}
