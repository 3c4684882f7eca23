//! Users API handlers.
//!
//! ```text
//! GET    /api/users
//! GET    /api/users/{uid}
//! PUT    /api/users/{uid}            {"first_name":"Ada","role":"admin"}
//! DELETE /api/users/{uid}
//! POST   /api/users/{uid}/documents  multipart/form-data
//! ```

use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};
use serde::Deserialize;
use serde_json::json;

use crate::domain::{ApiResult, Email, Error, Role, UserChanges, UserId};
use crate::inbound::http::envelope;
use crate::inbound::http::multipart::read_multipart;
use crate::inbound::http::schemas::{
    DocumentsResponse, ErrorSchema, MessageResponse, UserResponse, UsersResponse,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{USER_ID, parse_id};

/// Partial update body for `PUT /api/users/{uid}`.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct UpdateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    #[schema(value_type = Option<String>, example = "admin")]
    pub role: Option<Role>,
}

impl TryFrom<UpdateUserRequest> for UserChanges {
    type Error = Error;

    fn try_from(value: UpdateUserRequest) -> Result<Self, Self::Error> {
        let email = value
            .email
            .map(|raw| {
                Email::new(&raw).map_err(|err| {
                    Error::invalid_request(err.to_string())
                        .with_details(json!({ "field": "email", "value": raw }))
                })
            })
            .transpose()?;
        Ok(Self {
            first_name: value.first_name,
            last_name: value.last_name,
            email,
            role: value.role,
        })
    }
}

/// List every user.
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Users", body = UsersResponse),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let users = state.users.list_users().await?;
    Ok(envelope::payload(users))
}

/// Fetch one user.
#[utoipa::path(
    get,
    path = "/api/users/{uid}",
    params(("uid" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 404, description = "User not found", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{uid}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id: UserId = parse_id(&path, USER_ID)?;
    let user = state.users.get_user(&id).await?;
    Ok(envelope::payload(user))
}

/// Apply a partial profile update.
#[utoipa::path(
    put,
    path = "/api/users/{uid}",
    params(("uid" = String, Path, description = "User id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = MessageResponse),
        (status = 400, description = "Invalid body or email taken", body = ErrorSchema),
        (status = 404, description = "User not found", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{uid}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateUserRequest>,
) -> ApiResult<HttpResponse> {
    let id: UserId = parse_id(&path, USER_ID)?;
    let changes = UserChanges::try_from(payload.into_inner())?;
    state.users_command.update_user(&id, changes).await?;
    Ok(envelope::message("User updated"))
}

/// Delete a user; their pets return to the adoptable pool.
#[utoipa::path(
    delete,
    path = "/api/users/{uid}",
    params(("uid" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 404, description = "User not found", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{uid}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id: UserId = parse_id(&path, USER_ID)?;
    state.users_command.delete_user(&id).await?;
    Ok(envelope::message("User deleted"))
}

/// Store uploaded files and attach them to the user.
#[utoipa::path(
    post,
    path = "/api/users/{uid}/documents",
    params(("uid" = String, Path, description = "User id")),
    request_body(content_type = "multipart/form-data", description = "Any number of files"),
    responses(
        (status = 200, description = "Documents uploaded successfully", body = DocumentsResponse),
        (status = 400, description = "No files uploaded", body = ErrorSchema),
        (status = 404, description = "User not found", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "uploadDocuments"
)]
#[post("/users/{uid}/documents")]
pub async fn upload_documents(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    req: HttpRequest,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let id: UserId = parse_id(&path, USER_ID)?;
    let files = read_multipart(&req, body).await?.into_files();
    let documents = state.users_command.upload_documents(&id, files).await?;
    Ok(envelope::message_with_payload(
        "Documents uploaded successfully",
        documents,
    ))
}
