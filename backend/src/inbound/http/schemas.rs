//! OpenAPI schema definitions for domain types and response envelopes.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. The
//! wrappers here mirror their wire shape and exist only for documentation.

#![expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]

use utoipa::ToSchema;

/// Stable machine-readable error codes returned in error responses.
#[derive(ToSchema)]
#[schema(as = ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed, fails validation, or breaks a precondition.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// A backing service is temporarily unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// Error envelope returned by every failing request.
#[derive(ToSchema)]
#[schema(as = Error)]
#[schema(rename_all = "camelCase")]
pub struct ErrorSchema {
    /// Always `error`.
    #[schema(example = "error")]
    status: String,
    /// Human-readable message.
    #[schema(example = "Pet is already adopted")]
    error: String,
    /// Machine-readable category.
    code: ErrorCodeSchema,
    /// Correlation identifier matching the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Field-level validation details.
    details: Option<serde_json::Value>,
}

/// Account role.
#[derive(ToSchema)]
#[schema(as = Role)]
pub enum RoleSchema {
    /// Regular adopter.
    #[schema(rename = "user")]
    User,
    /// Administrator.
    #[schema(rename = "admin")]
    Admin,
}

/// Reference to an uploaded document.
#[derive(ToSchema)]
#[schema(as = UserDocument)]
pub struct UserDocumentSchema {
    /// Original file name.
    #[schema(example = "passport.pdf")]
    name: String,
    /// Storage path.
    #[schema(example = "public/documents/1718000000000-passport.pdf")]
    reference: String,
}

/// Registered user.
#[derive(ToSchema)]
#[schema(as = User)]
pub struct UserSchema {
    /// Stable identifier.
    #[schema(rename = "_id", example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: String,
    /// Given name.
    first_name: String,
    /// Family name.
    last_name: String,
    /// Unique email address.
    #[schema(example = "ada@example.com")]
    email: String,
    /// Argon2id PHC string.
    password: String,
    /// Account role.
    role: RoleSchema,
    /// Adopted pet identifiers.
    pets: Vec<String>,
    /// Uploaded documents.
    documents: Vec<UserDocumentSchema>,
    /// Time of the most recent login.
    last_connection: Option<String>,
}

/// Pet available for adoption.
#[derive(ToSchema)]
#[schema(as = Pet)]
#[schema(rename_all = "camelCase")]
pub struct PetSchema {
    /// Stable identifier.
    #[schema(rename = "_id", example = "9b2c1f2e-8f3a-4a55-9d61-0b6f1f3c2a10")]
    id: String,
    /// Pet name.
    #[schema(example = "Rex")]
    name: String,
    /// Species label.
    #[schema(example = "dog")]
    specie: String,
    /// Date of birth.
    #[schema(format = Date, example = "2021-03-04")]
    birth_date: String,
    /// Whether the pet has an owner.
    adopted: bool,
    /// Owner id when adopted.
    owner: Option<String>,
    /// Image path, empty when none was uploaded.
    image: String,
}

/// Adoption record.
#[derive(ToSchema)]
#[schema(as = Adoption)]
pub struct AdoptionSchema {
    /// Stable identifier.
    #[schema(rename = "_id")]
    id: String,
    /// Adopting user id.
    owner: String,
    /// Adopted pet id.
    pet: String,
}

/// `{status: "success", message}`.
#[derive(ToSchema)]
pub struct MessageResponse {
    /// Always `success`.
    status: String,
    /// Outcome description.
    #[schema(example = "Pet adopted")]
    message: String,
}

/// `{status: "success", payload: User[]}`.
#[derive(ToSchema)]
pub struct UsersResponse {
    status: String,
    payload: Vec<UserSchema>,
}

/// `{status: "success", payload: User}`.
#[derive(ToSchema)]
pub struct UserResponse {
    status: String,
    payload: UserSchema,
}

/// `{status: "success", payload: Pet[]}`.
#[derive(ToSchema)]
pub struct PetsResponse {
    status: String,
    payload: Vec<PetSchema>,
}

/// `{status: "success", payload: Pet}`.
#[derive(ToSchema)]
pub struct PetResponse {
    status: String,
    payload: PetSchema,
}

/// `{status: "success", payload: Adoption[]}`.
#[derive(ToSchema)]
pub struct AdoptionsResponse {
    status: String,
    payload: Vec<AdoptionSchema>,
}

/// `{status: "success", payload: Adoption}`.
#[derive(ToSchema)]
pub struct AdoptionResponse {
    status: String,
    payload: AdoptionSchema,
}

/// Documents stored by an upload.
#[derive(ToSchema)]
pub struct DocumentsResponse {
    status: String,
    message: String,
    payload: Vec<UserDocumentSchema>,
}

/// Summary of the signed-in user.
#[derive(ToSchema)]
pub struct CurrentUserSchema {
    /// Full name.
    #[schema(example = "Ada Lovelace")]
    name: String,
    /// Account role.
    role: RoleSchema,
    /// Email address.
    email: String,
}

/// `{status: "success", payload: CurrentUser}`.
#[derive(ToSchema)]
pub struct CurrentUserResponse {
    status: String,
    payload: CurrentUserSchema,
}

/// `{status: "success", payload: "<user id>"}`.
#[derive(ToSchema)]
pub struct RegisteredResponse {
    status: String,
    /// Identifier of the new account.
    payload: String,
}

/// Records inserted by `generateData`.
#[derive(ToSchema)]
pub struct GeneratedDataSchema {
    users: Vec<UserSchema>,
    pets: Vec<PetSchema>,
}

/// `{status: "success", message, payload: {users, pets}}`.
#[derive(ToSchema)]
pub struct GeneratedDataResponse {
    status: String,
    #[schema(example = "Se insertaron 2 usuarios y 3 mascotas")]
    message: String,
    payload: GeneratedDataSchema,
}

#[cfg(test)]
mod tests {
    use utoipa::PartialSchema;

    use super::*;

    fn schema_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[test]
    fn error_schema_uses_envelope_keys() {
        let json = schema_json::<ErrorSchema>();
        assert_eq!(ErrorSchema::name(), "Error");
        for key in ["status", "error", "code", "traceId", "details"] {
            assert!(json.contains(key), "missing {key}");
        }
    }

    #[test]
    fn pet_schema_uses_wire_names() {
        let json = schema_json::<PetSchema>();
        assert!(json.contains("\"_id\""));
        assert!(json.contains("birthDate"));
        assert!(!json.contains("birth_date"));
    }

    #[test]
    fn error_codes_cover_every_variant() {
        let json = schema_json::<ErrorCodeSchema>();
        for code in [
            "invalid_request",
            "unauthorized",
            "not_found",
            "service_unavailable",
            "internal_error",
        ] {
            assert!(json.contains(code), "missing {code}");
        }
    }
}
