//! OpenAPI documentation for the AdoptMe API.
//!
//! [`ApiDoc`] collects every handler annotated with `utoipa::path`, the
//! schema wrappers from [`crate::inbound::http::schemas`] and the request
//! bodies declared beside their handlers. Swagger UI serves it at
//! `/api-docs/`, and the `openapi-dump` binary prints it for tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::mocks::GenerateDataRequest;
use crate::inbound::http::pets::{CreatePetRequest, UpdatePetRequest};
use crate::inbound::http::schemas::{
    AdoptionResponse, AdoptionSchema, AdoptionsResponse, CurrentUserResponse, CurrentUserSchema,
    DocumentsResponse, ErrorCodeSchema, ErrorSchema, GeneratedDataResponse, GeneratedDataSchema,
    MessageResponse, PetResponse, PetSchema, PetsResponse, RegisteredResponse, RoleSchema,
    UserDocumentSchema, UserResponse, UserSchema, UsersResponse,
};
use crate::inbound::http::session_config::SESSION_COOKIE_NAME;
use crate::inbound::http::sessions::{LoginRequest, RegisterRequest};
use crate::inbound::http::users::UpdateUserRequest;

/// Name of the cookie security scheme in the document.
pub const SESSION_SECURITY_SCHEME: &str = "SessionCookie";

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            SESSION_SECURITY_SCHEME,
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                SESSION_COOKIE_NAME,
                "Session cookie issued by POST /api/sessions/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "AdoptMe API",
        description = "Pet adoption service: users, pets, adoptions, sessions and demo data."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::home::index,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::users::upload_documents,
        crate::inbound::http::pets::list_pets,
        crate::inbound::http::pets::create_pet,
        crate::inbound::http::pets::create_pet_with_image,
        crate::inbound::http::pets::get_pet,
        crate::inbound::http::pets::update_pet,
        crate::inbound::http::pets::delete_pet,
        crate::inbound::http::adoptions::list_adoptions,
        crate::inbound::http::adoptions::get_adoption,
        crate::inbound::http::adoptions::adopt_pet,
        crate::inbound::http::sessions::register,
        crate::inbound::http::sessions::login,
        crate::inbound::http::sessions::current,
        crate::inbound::http::sessions::logout,
        crate::inbound::http::mocks::mocking_pets,
        crate::inbound::http::mocks::mocking_users,
        crate::inbound::http::mocks::generate_data,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        RoleSchema,
        UserSchema,
        UserDocumentSchema,
        PetSchema,
        AdoptionSchema,
        CurrentUserSchema,
        GeneratedDataSchema,
        MessageResponse,
        UsersResponse,
        UserResponse,
        PetsResponse,
        PetResponse,
        AdoptionsResponse,
        AdoptionResponse,
        DocumentsResponse,
        CurrentUserResponse,
        RegisteredResponse,
        GeneratedDataResponse,
        UpdateUserRequest,
        CreatePetRequest,
        UpdatePetRequest,
        RegisterRequest,
        LoginRequest,
        GenerateDataRequest,
    )),
    tags(
        (name = "users", description = "User administration and document uploads"),
        (name = "pets", description = "Pet catalogue"),
        (name = "adoptions", description = "Adoption workflow"),
        (name = "sessions", description = "Registration and cookie sessions"),
        (name = "mocks", description = "Generated demonstration data"),
        (name = "health", description = "Liveness and readiness probes"),
        (name = "home", description = "Landing page")
    )
)]
pub struct ApiDoc;
