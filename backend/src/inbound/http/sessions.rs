//! Session API handlers.
//!
//! ```text
//! POST /api/sessions/register {"first_name":"Ada","last_name":"Lovelace","email":"ada@example.com","password":"secret"}
//! POST /api/sessions/login    {"email":"ada@example.com","password":"secret"}
//! GET  /api/sessions/current
//! POST /api/sessions/logout
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{ApiResult, Error, ErrorCode, LoginCredentials, Registration, Role};
use crate::inbound::http::envelope;
use crate::inbound::http::schemas::{
    CurrentUserResponse, ErrorSchema, MessageResponse, RegisteredResponse,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::incomplete_values;

/// Registration body for `POST /api/sessions/register`.
///
/// Every field is optional on the wire so absent values surface as
/// `Incomplete values` rather than a JSON decoding error.
#[derive(Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct RegisterRequest {
    #[schema(example = "Ada")]
    pub first_name: Option<String>,
    #[schema(example = "Lovelace")]
    pub last_name: Option<String>,
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    #[schema(example = "secret")]
    pub password: Option<String>,
}

/// Login body for `POST /api/sessions/login`.
#[derive(Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct LoginRequest {
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    #[schema(example = "secret")]
    pub password: Option<String>,
}

/// Summary returned by `GET /api/sessions/current`.
#[derive(Debug, Serialize)]
struct CurrentUser {
    name: String,
    role: Role,
    email: String,
}

/// Create an account with the `user` role.
#[utoipa::path(
    post,
    path = "/api/sessions/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Registered", body = RegisteredResponse),
        (status = 400, description = "Incomplete values or user already exists", body = ErrorSchema)
    ),
    tags = ["sessions"],
    operation_id = "register",
    security([])
)]
#[post("/sessions/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let registration = Registration::try_from_parts(
        body.first_name.as_deref(),
        body.last_name.as_deref(),
        body.email.as_deref(),
        body.password.as_deref(),
    )
    .map_err(|err| incomplete_values(&err))?;
    let id = state.registration.register(registration).await?;
    Ok(envelope::payload(id.to_string()))
}

/// Verify credentials and establish a session.
#[utoipa::path(
    post,
    path = "/api/sessions/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = MessageResponse,
            headers(("Set-Cookie" = String, description = "coderCookie session cookie"))),
        (status = 400, description = "Incomplete values or incorrect password", body = ErrorSchema),
        (status = 404, description = "User doesn't exist", body = ErrorSchema)
    ),
    tags = ["sessions"],
    operation_id = "login",
    security([])
)]
#[post("/sessions/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let credentials =
        LoginCredentials::try_from_parts(body.email.as_deref(), body.password.as_deref())
            .map_err(|err| incomplete_values(&err))?;
    let user = state.login.authenticate(&credentials).await?;
    session.persist_user(&user.id)?;
    Ok(envelope::message("Logged in"))
}

/// Describe the signed-in user.
#[utoipa::path(
    get,
    path = "/api/sessions/current",
    responses(
        (status = 200, description = "Current user", body = CurrentUserResponse),
        (status = 401, description = "Not authenticated", body = ErrorSchema)
    ),
    tags = ["sessions"],
    operation_id = "currentUser"
)]
#[get("/sessions/current")]
pub async fn current(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let id = session.require_user_id()?;
    let user = match state.users.get_user(&id).await {
        Ok(user) => user,
        Err(err) if err.code() == ErrorCode::NotFound => {
            // The account was deleted after the cookie was issued.
            session.purge();
            return Err(Error::unauthorized("Not authenticated"));
        }
        Err(err) => return Err(err),
    };
    Ok(envelope::payload(CurrentUser {
        name: user.full_name(),
        role: user.role,
        email: user.email.to_string(),
    }))
}

/// End the session.
#[utoipa::path(
    post,
    path = "/api/sessions/logout",
    responses((status = 200, description = "Logged out", body = MessageResponse)),
    tags = ["sessions"],
    operation_id = "logout"
)]
#[post("/sessions/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.purge();
    envelope::message("Logged out")
}
